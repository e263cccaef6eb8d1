use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::model::task::Task;
use crate::util::dates;

/// Maximum number of small task markers rendered on one calendar cell
pub const MAX_DAY_MARKERS: usize = 5;

/// Markers for one calendar cell in the monthly overview
#[derive(Debug)]
pub struct DayIndicators<'a> {
    /// Up to [`MAX_DAY_MARKERS`] tasks, each flagged true when its
    /// original date lies strictly before the cell's day
    pub markers: Vec<(&'a Task, bool)>,
    /// True when more tasks exist than markers shown
    pub truncated: bool,
    /// Total task count behind the markers; the hidden excess is
    /// `total - markers.len()`
    pub total: usize,
}

/// A task counts as overdue when its original day lies strictly before
/// today — a calendar-day comparison, never time-of-day.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.date < today
}

/// Display label for a carried-forward task, always derived from its
/// *original* date (`1.Januar, Sonntag`), regardless of the day it is
/// shown on.
pub fn overdue_label(task: &Task) -> String {
    dates::overdue_label(task.date)
}

/// The ordered list of tasks to display for one calendar day.
///
/// Same-day tasks always appear. When the target day *is* today,
/// incomplete tasks from earlier days are carried forward as well;
/// completed tasks stay on their original date and never reappear.
/// A non-empty filter keeps only tasks whose folder membership key is
/// selected (uncategorized tasks key as `""`).
///
/// Order: incomplete before completed, then grouped by folder key in
/// lexicographic order (uncategorized first); ties keep insertion order.
pub fn tasks_for_day<'a>(
    tasks: &'a [Task],
    target: NaiveDate,
    today: NaiveDate,
    filter: &BTreeSet<String>,
) -> Vec<&'a Task> {
    let is_today = target == today;
    let mut out: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.date == target || (is_today && !t.completed && t.date < today))
        .filter(|t| filter.is_empty() || filter.contains(t.folder_key()))
        .collect();
    // Vec::sort_by is stable, so equal keys preserve insertion order
    out.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| a.folder_key().cmp(b.folder_key()))
    });
    out
}

/// Every incomplete task dated within the given calendar month. Used for
/// per-day indicator counts, not for full listings.
pub fn tasks_for_month(tasks: &[Task], year: i32, month: u32) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| !t.completed && t.date.year() == year && t.date.month() == month)
        .collect()
}

/// The small markers shown on one calendar cell: incomplete same-day
/// tasks, plus — on the cell representing today only — the incomplete
/// overdue carry-forward. At most [`MAX_DAY_MARKERS`] markers are kept.
pub fn day_indicators<'a>(
    tasks: &'a [Task],
    day: NaiveDate,
    today: NaiveDate,
) -> DayIndicators<'a> {
    let mut all: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.completed && t.date == day)
        .collect();
    if day == today {
        all.extend(tasks.iter().filter(|t| !t.completed && t.date < today));
    }

    let total = all.len();
    let markers = all
        .into_iter()
        .take(MAX_DAY_MARKERS)
        .map(|t| (t, t.date < day))
        .collect();
    DayIndicators {
        markers,
        truncated: total > MAX_DAY_MARKERS,
        total,
    }
}
