use chrono::NaiveDate;
use tracing::debug;

use crate::model::task::{RecurrenceKind, Task};
use crate::ops::recurrence;

use super::next_numeric_id;

/// Outcome of a delete request on a task that may belong to a series
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRequest {
    /// The task was deleted outright
    Deleted,
    /// The task's series still has other living members; the caller must
    /// offer the choice between deleting this instance and the whole series
    ChoiceRequired { series_id: String, members: usize },
    /// No task with that id
    NotFound,
}

/// Add a single task, or materialize a whole recurring series up front.
///
/// With a recurrence rule, one task is inserted per expanded day, all
/// sharing a freshly minted series id and identical text/folder/time.
/// Returns the inserted ids; empty (state unchanged) when the trimmed
/// text is empty.
pub fn add_task(
    tasks: &mut Vec<Task>,
    text: &str,
    folder_id: Option<&str>,
    time: Option<&str>,
    date: NaiveDate,
    repeating: Option<RecurrenceKind>,
) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let base = next_numeric_id(tasks.iter().map(|t| t.id.as_str()));
    let build = |id: String, day: NaiveDate| {
        let mut task = Task::new(id, text.to_string(), day);
        task.folder_id = folder_id.map(str::to_string);
        task.time = time.map(str::to_string);
        task
    };

    match repeating {
        None => {
            let id = base.to_string();
            tasks.push(build(id.clone(), date));
            vec![id]
        }
        Some(kind) => {
            // the series id comes first out of the counter, then one id
            // per instance
            let series_id = base.to_string();
            let days = recurrence::expand(date, kind);
            let mut ids = Vec::with_capacity(days.len());
            for (i, day) in days.into_iter().enumerate() {
                let id = (base + 1 + i as u64).to_string();
                let mut task = build(id.clone(), day);
                task.series_id = Some(series_id.clone());
                task.repeating = Some(kind);
                tasks.push(task);
                ids.push(id);
            }
            debug!(series = %series_id, count = ids.len(), "materialized recurring series");
            ids
        }
    }
}

/// Edit one instance: text, folder and time only. `date`, `series_id` and
/// `completed` are untouched. Returns false (state unchanged) when the id
/// is unknown or the trimmed text is empty.
pub fn update_task(
    tasks: &mut [Task],
    id: &str,
    text: &str,
    folder_id: Option<&str>,
    time: Option<&str>,
) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
        return false;
    };
    task.text = text.to_string();
    task.folder_id = folder_id.map(str::to_string);
    task.time = time.map(str::to_string);
    true
}

/// Flip `completed` on exactly one instance; series siblings are never
/// affected.
pub fn toggle_completion(tasks: &mut [Task], id: &str) -> bool {
    let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
        return false;
    };
    task.completed = !task.completed;
    true
}

/// Remove exactly one instance.
pub fn delete_task(tasks: &mut Vec<Task>, id: &str) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    tasks.len() != before
}

/// Remove every instance sharing the series id. Returns how many were
/// removed.
pub fn delete_series(tasks: &mut Vec<Task>, series_id: &str) -> usize {
    let before = tasks.len();
    tasks.retain(|t| t.series_id.as_deref() != Some(series_id));
    let removed = before - tasks.len();
    debug!(series = series_id, removed, "deleted series");
    removed
}

/// Number of living members of a series.
pub fn series_len(tasks: &[Task], series_id: &str) -> usize {
    tasks
        .iter()
        .filter(|t| t.series_id.as_deref() == Some(series_id))
        .count()
}

/// Delete protocol for a task that may belong to a series: when more than
/// one member is still alive the caller gets a choice instead of a
/// deletion; a series shrunk to a single member is deleted directly.
pub fn request_delete(tasks: &mut Vec<Task>, id: &str) -> DeleteRequest {
    let Some(task) = tasks.iter().find(|t| t.id == id) else {
        return DeleteRequest::NotFound;
    };
    if let Some(series_id) = task.series_id.clone() {
        let members = series_len(tasks, &series_id);
        if members > 1 {
            return DeleteRequest::ChoiceRequired { series_id, members };
        }
    }
    delete_task(tasks, id);
    DeleteRequest::Deleted
}
