pub mod folder_ops;
pub mod recurrence;
pub mod task_ops;
pub mod visibility;

/// Next id in a numeric-string id space: one past the largest existing
/// value. Non-numeric ids are skipped.
pub(crate) fn next_numeric_id<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1
}
