//! Unified application error type.
//! Services, repositories and CLI handlers all return `AppError`, so lifecycle
//! rejections reach the caller unchanged and storage failures stay opaque.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    /// Storage round-trip that did not do what was asked, e.g. an update or
    /// delete touching zero rows, or a failed foreign key check.
    #[error("Persistence failure: {0}")]
    Persistence(String),

    // ---------------------------
    // Slot lifecycle
    // ---------------------------
    #[error("open slot exists")]
    OpenSlotExists,

    #[error("slot ends before start")]
    SlotEndsBeforeStart,

    #[error("slot has no project")]
    InvalidProject,

    // ---------------------------
    // Request errors
    // ---------------------------
    #[error("field {0} not found")]
    UnknownSortField(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown activity: {0}")]
    InvalidActivity(String),

    #[error("Unknown comparator: {0}")]
    InvalidComparator(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
