//! Slot export to CSV and JSON.

mod csv;
mod fs_utils;
mod json;

pub use self::csv::{CSV_HEADER, write_csv};
pub use self::json::write_json;

use crate::errors::AppResult;
use crate::models::Slot;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

pub(crate) fn notify_export_success(label: &str, count: usize, path: &Path) {
    success(format!(
        "{label} export completed: {count} slot(s) written to {}",
        path.display()
    ));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write `slots` to `path`. An existing file is only replaced with `force`.
pub fn export_slots(slots: &[Slot], format: ExportFormat, path: &Path, force: bool) -> AppResult<()> {
    fs_utils::ensure_writable(path, force)?;

    debug!(format = format.as_str(), path = %path.display(), count = slots.len(), "Exporting slots");

    let file = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Csv => write_csv(file, slots)?,
        ExportFormat::Json => write_json(file, slots)?,
    }

    notify_export_success(&format.as_str().to_uppercase(), slots.len(), path);
    Ok(())
}
