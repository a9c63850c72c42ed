use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Relational operator applied to a timestamp filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareOperator {
    #[default]
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl CompareOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOperator::Equal => "=",
            CompareOperator::NotEqual => "<>",
            CompareOperator::LessThan => "<",
            CompareOperator::LessThanOrEqual => "<=",
            CompareOperator::GreaterThan => ">",
            CompareOperator::GreaterThanOrEqual => ">=",
        }
    }

    /// Accepts the short names (`eq`, `ne`, `lt`, `le`, `gt`, `ge`) or the
    /// operator itself (`=`, `<>`, `!=`, `<`, `<=`, `>`, `>=`).
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "eq" | "=" => Ok(CompareOperator::Equal),
            "ne" | "<>" | "!=" => Ok(CompareOperator::NotEqual),
            "lt" | "<" => Ok(CompareOperator::LessThan),
            "le" | "<=" => Ok(CompareOperator::LessThanOrEqual),
            "gt" | ">" => Ok(CompareOperator::GreaterThan),
            "ge" | ">=" => Ok(CompareOperator::GreaterThanOrEqual),
            _ => Err(AppError::InvalidComparator(s.to_string())),
        }
    }
}
