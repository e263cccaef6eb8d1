use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often a recurring task repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceKind {
    /// Number of instances materialized when a series is created. The
    /// series is built once, in full, and never auto-extends.
    pub fn horizon(self) -> usize {
        match self {
            RecurrenceKind::Daily => 365,
            RecurrenceKind::Weekly => 52,
            RecurrenceKind::Monthly => 12,
            RecurrenceKind::Yearly => 5,
        }
    }
}

/// A single schedulable item bound to one calendar day.
///
/// `id`, `date` and `series_id` are immutable after creation; edits touch
/// only `text`, `folder_id` and `time`, and `completed` changes only via
/// the completion toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    /// Weak reference to a folder; absent or dangling means "uncategorized"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    /// Display-only hour label (e.g. `9 Uhr`); orthogonal to scheduling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// The calendar day this task belongs to — a day, not an instant
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    /// Links sibling instances generated from one recurring definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
    /// The rule that generated the series; copied to every instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeating: Option<RecurrenceKind>,
}

impl Task {
    /// Create a one-off incomplete task with no folder, time or series
    pub fn new(id: String, text: String, date: NaiveDate) -> Self {
        Task {
            id,
            text,
            folder_id: None,
            time: None,
            date,
            completed: false,
            series_id: None,
            repeating: None,
        }
    }

    /// Membership key used for filtering and folder grouping
    /// (uncategorized tasks key as the empty string, sorting first)
    pub fn folder_key(&self) -> &str {
        self.folder_id.as_deref().unwrap_or("")
    }
}
