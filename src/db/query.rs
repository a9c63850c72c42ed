//! Filter → `WHERE` fragment translation with named parameters.
//!
//! Every repository turns its typed filter into a [`Conditional`] through
//! [`ToConditional`]. Values never end up in the SQL text: each active
//! predicate contributes a `:name` placeholder and a bound value.

use crate::models::CompareOperator;
use rusqlite::ToSql;
use rusqlite::types::Value;
use std::fmt;

/// Parameter name → value pairs, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedParams {
    entries: Vec<(String, Value)>,
}

impl NamedParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `:name`, replacing an earlier binding of the same name.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        let key = format!(":{name}");
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        let key = format!(":{name}");
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names without the leading `:`.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| &k[1..])
    }

    pub(crate) fn as_refs(&self) -> Vec<(&str, &dyn ToSql)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v as &dyn ToSql))
            .collect()
    }
}

impl fmt::Display for NamedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match v {
                Value::Null => write!(f, "{k}=NULL")?,
                Value::Integer(n) => write!(f, "{k}={n}")?,
                Value::Real(n) => write!(f, "{k}={n}")?,
                Value::Text(s) => write!(f, "{k}={s:?}")?,
                Value::Blob(b) => write!(f, "{k}=<{} bytes>", b.len())?,
            }
        }
        f.write_str("]")
    }
}

/// The conditional part of a query plus the parameters it consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditional {
    /// Empty, or `WHERE a AND b ...`.
    pub clause: String,
    pub params: NamedParams,
}

impl Conditional {
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// `base` followed by the clause on its own line, if there is one.
    pub fn apply_to(&self, base: &str) -> String {
        if self.clause.is_empty() {
            base.to_string()
        } else {
            format!("{base}\n{}", self.clause)
        }
    }
}

/// Implemented by each filter type with an explicit column mapping.
pub trait ToConditional {
    fn to_conditional(&self) -> Conditional;
}

/// Accumulates `(predicate, parameter)` pairs. Predicates whose input is
/// `None` are skipped.
#[derive(Debug, Default)]
pub struct ConditionBuilder {
    parts: Vec<String>,
    params: NamedParams,
}

impl ConditionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `column = :name`
    pub fn equal<V: Into<Value>>(self, column: &str, name: &str, value: Option<V>) -> Self {
        self.compare(column, name, CompareOperator::Equal, value)
    }

    /// `column LIKE :name` with the lowercased text wrapped in `%`.
    ///
    /// Only case-insensitive when the store's LIKE is (SQLite: ASCII only).
    pub fn contains(mut self, column: &str, name: &str, text: Option<&str>) -> Self {
        if let Some(text) = text {
            self.params.insert(name, format!("%{}%", text.to_lowercase()));
            self.parts.push(format!("{column} LIKE :{name}"));
        }
        self
    }

    /// `column <op> :name`
    pub fn compare<V: Into<Value>>(
        mut self,
        column: &str,
        name: &str,
        op: CompareOperator,
        value: Option<V>,
    ) -> Self {
        if let Some(value) = value {
            self.params.insert(name, value);
            self.parts.push(format!("{column} {} :{name}", op.as_sql()));
        }
        self
    }

    /// `column IS NULL` for open, `column IS NOT NULL` for closed. No binding.
    pub fn open_state(mut self, column: &str, is_open: Option<bool>) -> Self {
        match is_open {
            Some(true) => self.parts.push(format!("{column} IS NULL")),
            Some(false) => self.parts.push(format!("{column} IS NOT NULL")),
            None => {}
        }
        self
    }

    pub fn build(self) -> Conditional {
        let clause = if self.parts.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.parts.join(" AND "))
        };
        Conditional {
            clause,
            params: self.params,
        }
    }
}
