use super::activity::Activity;
use super::compare::CompareOperator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A work or break interval of a project.
///
/// `end == None` marks the slot as open. Timestamps are kept in UTC; the
/// lifecycle service truncates them to the minute before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub id: i64,
    pub project_id: i64,
    pub activity: Activity,
    pub start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Slot {
    pub fn new(project_id: i64, activity: Activity, start: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            project_id,
            activity,
            start,
            end: None,
            description: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Length in whole minutes, measured up to `now` while still open.
    pub fn duration_minutes(&self, now: DateTime<Utc>) -> i64 {
        let end = self.end.unwrap_or(now);
        (end - self.start).num_minutes()
    }
}

/// Slot listing predicates. All set predicates are ANDed.
///
/// The comparators only matter when the matching time is set and default to
/// `Equal`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotFilter {
    #[serde(rename = "projectID")]
    pub project_id: Option<i64>,
    pub activity: Option<Activity>,
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time_comparator: CompareOperator,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time_comparator: CompareOperator,
    pub is_open: Option<bool>,
    pub description: Option<String>,
}

impl SlotFilter {
    pub fn for_project(project_id: i64) -> Self {
        Self {
            project_id: Some(project_id),
            ..Self::default()
        }
    }

    pub fn open_only(mut self) -> Self {
        self.is_open = Some(true);
        self
    }
}
