use crate::errors::{AppError, AppResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What a slot was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    #[default]
    Work,
    Break,
}

impl Activity {
    pub fn all() -> &'static [Activity] {
        &[Activity::Work, Activity::Break]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Work => "work",
            Activity::Break => "break",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "work" => Some(Activity::Work),
            "break" => Some(Activity::Break),
            _ => None,
        }
    }

    /// Parse user input, ignoring case.
    pub fn parse(s: &str) -> AppResult<Self> {
        Self::from_db_str(&s.trim().to_lowercase())
            .ok_or_else(|| AppError::InvalidActivity(s.to_string()))
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
