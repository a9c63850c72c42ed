use crate::errors::AppResult;
use crate::models::Slot;
use crate::utils::time::format_timestamp;
use csv::Writer;
use std::io::Write;

pub const CSV_HEADER: [&str; 6] = ["id", "projectId", "activity", "start", "end", "description"];

/// One row per slot, in the given order. Absent `end` and `description`
/// are written as empty fields.
pub fn write_csv<W: Write>(writer: W, slots: &[Slot]) -> AppResult<()> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(CSV_HEADER)?;

    for slot in slots {
        wtr.write_record([
            slot.id.to_string(),
            slot.project_id.to_string(),
            slot.activity.as_str().to_string(),
            format_timestamp(&slot.start),
            slot.end.as_ref().map(format_timestamp).unwrap_or_default(),
            slot.description.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
