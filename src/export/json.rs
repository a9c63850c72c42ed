use crate::errors::AppResult;
use crate::models::Slot;
use std::io::Write;

/// Pretty-printed JSON array of slots.
pub fn write_json<W: Write>(mut writer: W, slots: &[Slot]) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut writer, slots)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
