//! Page requests and page results.

use super::query::NamedParams;
use serde::{Deserialize, Serialize};

/// `limit == -1` (any negative value) means no limit. `offset` counts rows
/// and only takes effect together with a limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Public field names, `-name` for descending.
    #[serde(default)]
    pub sort: Vec<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self::all()
    }
}

impl Page {
    pub const NO_LIMIT: i64 = -1;

    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset,
            sort: Vec::new(),
        }
    }

    pub fn all() -> Self {
        Self::new(Self::NO_LIMIT, 0)
    }

    /// At most one row.
    pub fn first() -> Self {
        Self::new(1, 0)
    }

    pub fn with_sort<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_unlimited(&self) -> bool {
        self.limit < 0
    }

    /// `LIMIT`/`OFFSET` clause for this page, binding `:limit` and `:offset`
    /// into `params`. Empty when unlimited.
    pub fn limit_clause(&self, params: &mut NamedParams) -> String {
        if self.is_unlimited() {
            return String::new();
        }
        params.insert("limit", self.limit);
        if self.offset != 0 {
            params.insert("offset", self.offset);
            "LIMIT :limit OFFSET :offset".to_string()
        } else {
            "LIMIT :limit".to_string()
        }
    }
}

/// One page of items plus the number of rows matching the filter overall.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: i64,
}

impl<T> PageResult<T> {
    pub fn into_first(self) -> Option<T> {
        self.items.into_iter().next()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
