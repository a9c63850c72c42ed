//! Public sort keys → `ORDER BY` through a static column table.

use crate::errors::{AppError, AppResult};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub struct SortField {
    pub name: &'static str,
    /// Storage column; `None` means the public name is the column.
    pub column: Option<&'static str>,
}

impl SortField {
    pub const fn plain(name: &'static str) -> Self {
        Self { name, column: None }
    }

    pub const fn mapped(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column: Some(column),
        }
    }

    pub fn column(&self) -> &'static str {
        self.column.unwrap_or(self.name)
    }
}

/// Sortable fields of one entity.
#[derive(Debug)]
pub struct SortColumns {
    pub entity: &'static str,
    pub fields: &'static [SortField],
}

impl SortColumns {
    pub const fn new(entity: &'static str, fields: &'static [SortField]) -> Self {
        Self { entity, fields }
    }

    /// One key → `column` or `column DESC`. A leading `-` reverses the
    /// direction; names match case-insensitively.
    pub fn resolve(&self, key: &str) -> AppResult<String> {
        let (name, descending) = match key.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (key, false),
        };

        let field = self
            .fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::UnknownSortField(name.to_string()))?;

        if descending {
            Ok(format!("{} DESC", field.column()))
        } else {
            Ok(field.column().to_string())
        }
    }

    /// Empty when no keys are given.
    pub fn order_by(&self, keys: &[String]) -> AppResult<String> {
        if keys.is_empty() {
            return Ok(String::new());
        }
        let parts = keys
            .iter()
            .map(|k| self.resolve(k))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(format!("ORDER BY {}", parts.join(", ")))
    }

    /// Reject tables with empty or case-insensitively duplicated names.
    pub fn check(&self) -> AppResult<()> {
        let mut seen = HashSet::new();
        for field in self.fields {
            if field.name.is_empty() || field.column().is_empty() {
                return Err(AppError::Config(format!(
                    "sort table '{}' has an empty entry",
                    self.entity
                )));
            }
            if !seen.insert(field.name.to_ascii_lowercase()) {
                return Err(AppError::Config(format!(
                    "sort table '{}' lists '{}' twice",
                    self.entity, field.name
                )));
            }
        }
        Ok(())
    }
}
