use std::collections::BTreeSet;

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::debug;

use crate::io::store::{self, KeyValue};
use crate::model::folder::Folder;
use crate::model::task::{RecurrenceKind, Task};
use crate::ops::task_ops::DeleteRequest;
use crate::ops::visibility::DayIndicators;
use crate::ops::{folder_ops, task_ops, visibility};
use crate::swipe::{Swipe, SwipeOutcome};
use crate::util::dates;

/// The task scheduling & interaction engine: the single source of truth
/// for folders and tasks, with write-through persistence.
///
/// Mutations run to completion on the calling thread and rewrite the
/// affected JSON blob(s) before returning. A failed write is logged and
/// otherwise ignored — the in-memory state stays authoritative for the
/// session.
pub struct Engine<S: KeyValue> {
    store: S,
    folders: Vec<Folder>,
    tasks: Vec<Task>,
    selected_day: NaiveDate,
    filter: BTreeSet<String>,
    /// Per-item swipe controllers, created lazily on first press
    swipes: IndexMap<String, Swipe>,
}

impl<S: KeyValue> Engine<S> {
    /// Load persisted state from the store. Missing keys (first run) and
    /// corrupt blobs both yield empty collections.
    pub fn new(store: S) -> Self {
        let folders = store::load_folders(&store);
        let tasks = store::load_tasks(&store);
        debug!(folders = folders.len(), tasks = tasks.len(), "engine loaded");
        Engine {
            store,
            folders,
            tasks,
            selected_day: dates::today(),
            filter: BTreeSet::new(),
            swipes: IndexMap::new(),
        }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn selected_day(&self) -> NaiveDate {
        self.selected_day
    }

    pub fn filter(&self) -> &BTreeSet<String> {
        &self.filter
    }

    // --- View selection ---

    pub fn select_day(&mut self, day: NaiveDate) {
        self.selected_day = day;
    }

    /// Replace the active filter selection. Empty means "show all"; the
    /// empty string selects uncategorized tasks.
    pub fn select_filter(&mut self, folder_ids: impl IntoIterator<Item = String>) {
        self.filter = folder_ids.into_iter().collect();
    }

    // --- Folder mutations ---

    /// Returns the new folder's id, or `None` when the trimmed name is
    /// empty (state unchanged).
    pub fn create_folder(&mut self, name: &str, color: &str) -> Option<String> {
        let id = folder_ops::add_folder(&mut self.folders, name, color)?;
        self.persist_folders();
        Some(id)
    }

    /// Delete a folder: referencing tasks become uncategorized (never
    /// cascade-deleted) and the id drops out of the active filter.
    pub fn delete_folder(&mut self, id: &str) -> bool {
        if !folder_ops::delete_folder(&mut self.folders, &mut self.tasks, id) {
            return false;
        }
        self.filter.remove(id);
        self.persist_folders();
        self.persist_tasks();
        true
    }

    // --- Task mutations ---

    /// Add a single task, or materialize a whole recurring series.
    /// Returns the inserted ids; empty when the trimmed text is empty.
    pub fn create_task(
        &mut self,
        text: &str,
        folder_id: Option<&str>,
        time: Option<&str>,
        date: NaiveDate,
        repeating: Option<RecurrenceKind>,
    ) -> Vec<String> {
        let ids = task_ops::add_task(&mut self.tasks, text, folder_id, time, date, repeating);
        if !ids.is_empty() {
            self.persist_tasks();
        }
        ids
    }

    /// Edit one instance (text/folder/time only).
    pub fn update_task(
        &mut self,
        id: &str,
        text: &str,
        folder_id: Option<&str>,
        time: Option<&str>,
    ) -> bool {
        if !task_ops::update_task(&mut self.tasks, id, text, folder_id, time) {
            return false;
        }
        self.persist_tasks();
        true
    }

    pub fn toggle_task(&mut self, id: &str) -> bool {
        if !task_ops::toggle_completion(&mut self.tasks, id) {
            return false;
        }
        self.persist_tasks();
        true
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        if !task_ops::delete_task(&mut self.tasks, id) {
            return false;
        }
        self.swipes.shift_remove(id);
        self.persist_tasks();
        true
    }

    /// Remove every instance of a series. Returns how many were removed.
    pub fn delete_series(&mut self, series_id: &str) -> usize {
        let removed = task_ops::delete_series(&mut self.tasks, series_id);
        if removed > 0 {
            let tasks = &self.tasks;
            self.swipes.retain(|id, _| tasks.iter().any(|t| t.id == *id));
            self.persist_tasks();
        }
        removed
    }

    /// Delete protocol: a task whose series still has other living
    /// members yields a choice instead of a deletion.
    pub fn request_delete(&mut self, id: &str) -> DeleteRequest {
        let request = task_ops::request_delete(&mut self.tasks, id);
        if request == DeleteRequest::Deleted {
            self.swipes.shift_remove(id);
            self.persist_tasks();
        }
        request
    }

    // --- Queries ---

    /// Ordered tasks for the currently selected day, under the active
    /// filter (overdue carry-forward applies when that day is today).
    pub fn visible_tasks(&self) -> Vec<&Task> {
        visibility::tasks_for_day(&self.tasks, self.selected_day, dates::today(), &self.filter)
    }

    /// Ordered tasks for an arbitrary day under the active filter.
    pub fn tasks_for_day(&self, day: NaiveDate) -> Vec<&Task> {
        visibility::tasks_for_day(&self.tasks, day, dates::today(), &self.filter)
    }

    /// Incomplete tasks dated within a calendar month.
    pub fn tasks_for_month(&self, year: i32, month: u32) -> Vec<&Task> {
        visibility::tasks_for_month(&self.tasks, year, month)
    }

    /// Markers for one calendar cell in the monthly overview.
    pub fn day_indicators(&self, day: NaiveDate) -> DayIndicators<'_> {
        visibility::day_indicators(&self.tasks, day, dates::today())
    }

    // --- Gesture events ---

    /// Pointer/touch down on a task row.
    pub fn press_start(&mut self, task_id: &str, x: f32, y: f32) {
        self.swipes
            .entry(task_id.to_string())
            .or_default()
            .press(x, y);
    }

    /// Pointer moved; accepted wherever the pointer is, so a fast swipe
    /// leaving the row keeps tracking.
    pub fn press_move(&mut self, task_id: &str, x: f32, y: f32) {
        if let Some(swipe) = self.swipes.get_mut(task_id) {
            swipe.drag(x, y);
        }
    }

    /// Pointer up. A tap on a closed row is forwarded as a completion
    /// toggle; a tap on an open row only closes the panel.
    pub fn press_end(&mut self, task_id: &str) -> Option<SwipeOutcome> {
        let outcome = self.swipes.get_mut(task_id)?.release()?;
        if outcome == SwipeOutcome::Tap {
            self.toggle_task(task_id);
        }
        Some(outcome)
    }

    /// Pointer lost mid-gesture: implicit release, snap rule only.
    pub fn press_cancel(&mut self, task_id: &str) -> Option<SwipeOutcome> {
        self.swipes.get_mut(task_id)?.cancel()
    }

    /// Current reveal offset for a row (0 when it has no gesture state).
    pub fn reveal_offset(&self, task_id: &str) -> f32 {
        self.swipes.get(task_id).map_or(0.0, Swipe::offset)
    }

    /// Whether page scrolling should be suppressed for a row's active
    /// gesture.
    pub fn scroll_suppressed(&self, task_id: &str) -> bool {
        self.swipes
            .get(task_id)
            .is_some_and(Swipe::scroll_suppressed)
    }

    fn persist_folders(&mut self) {
        store::save_folders(&mut self.store, &self.folders);
    }

    fn persist_tasks(&mut self) {
        store::save_tasks(&mut self.store, &self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;
    use pretty_assertions::assert_eq;

    use crate::io::store::MemoryStore;

    use super::*;

    fn engine() -> Engine<MemoryStore> {
        Engine::new(MemoryStore::default())
    }

    #[test]
    fn test_mutations_write_through_and_reload() {
        let mut engine = engine();
        let folder_id = engine.create_folder("Work", "#FFAA00").unwrap();
        engine.create_task(
            "Bericht",
            Some(&folder_id),
            Some("9 Uhr"),
            dates::today(),
            None,
        );

        // a second engine over the same store sees the persisted state
        let reloaded = Engine::new(engine.store.clone());
        assert_eq!(reloaded.folders().len(), 1);
        assert_eq!(reloaded.tasks().len(), 1);
        assert_eq!(reloaded.tasks()[0].text, "Bericht");
    }

    #[test]
    fn test_rejected_mutation_leaves_store_untouched() {
        let mut engine = engine();
        assert_eq!(engine.create_folder("   ", "#FFAA00"), None);
        assert!(engine.create_task("  ", None, None, dates::today(), None).is_empty());

        let reloaded = Engine::new(engine.store.clone());
        assert!(reloaded.folders().is_empty());
        assert!(reloaded.tasks().is_empty());
    }

    #[test]
    fn test_delete_folder_clears_refs_and_filter() {
        let mut engine = engine();
        let folder_id = engine.create_folder("Work", "#FFAA00").unwrap();
        engine.create_task("Bericht", Some(&folder_id), None, dates::today(), None);
        engine.select_filter([folder_id.clone()]);

        assert!(engine.delete_folder(&folder_id));
        assert!(engine.filter().is_empty());
        assert_eq!(engine.tasks().len(), 1);
        assert_eq!(engine.tasks()[0].folder_id, None);
    }

    #[test]
    fn test_overdue_task_carries_onto_today_until_completed() {
        let mut engine = engine();
        let yesterday = dates::today() - Days::new(1);
        let ids = engine.create_task("alt", None, None, yesterday, None);

        engine.select_day(dates::today());
        assert_eq!(engine.visible_tasks().len(), 1);

        engine.toggle_task(&ids[0]);
        assert!(engine.visible_tasks().is_empty());
        assert_eq!(engine.tasks_for_day(yesterday).len(), 1);
    }

    #[test]
    fn test_tap_gesture_toggles_completion() {
        let mut engine = engine();
        let ids = engine.create_task("x", None, None, dates::today(), None);

        engine.press_start(&ids[0], 100.0, 100.0);
        engine.press_move(&ids[0], 101.0, 101.0);
        assert_eq!(engine.press_end(&ids[0]), Some(SwipeOutcome::Tap));
        assert!(engine.tasks()[0].completed);
    }

    #[test]
    fn test_swipe_open_then_tap_closes_without_toggle() {
        let mut engine = engine();
        let ids = engine.create_task("x", None, None, dates::today(), None);

        engine.press_start(&ids[0], 200.0, 100.0);
        engine.press_move(&ids[0], 40.0, 100.0);
        assert_eq!(engine.press_end(&ids[0]), Some(SwipeOutcome::SnappedOpen));
        assert_eq!(engine.reveal_offset(&ids[0]), -crate::swipe::REVEAL_WIDTH);

        engine.press_start(&ids[0], 100.0, 100.0);
        assert_eq!(engine.press_end(&ids[0]), Some(SwipeOutcome::Closed));
        assert!(!engine.tasks()[0].completed);
        assert_eq!(engine.reveal_offset(&ids[0]), 0.0);
    }

    #[test]
    fn test_gestures_on_different_rows_are_independent() {
        let mut engine = engine();
        let a = engine.create_task("a", None, None, dates::today(), None)[0].clone();
        let b = engine.create_task("b", None, None, dates::today(), None)[0].clone();

        engine.press_start(&a, 200.0, 0.0);
        engine.press_move(&a, 100.0, 0.0);
        assert_eq!(engine.reveal_offset(&a), -100.0);
        assert_eq!(engine.reveal_offset(&b), 0.0);
    }

    #[test]
    fn test_deleting_task_drops_its_gesture_state() {
        let mut engine = engine();
        let ids = engine.create_task("x", None, None, dates::today(), None);
        engine.press_start(&ids[0], 200.0, 0.0);
        engine.press_move(&ids[0], 40.0, 0.0);
        engine.press_end(&ids[0]);

        assert!(engine.delete_task(&ids[0]));
        assert_eq!(engine.reveal_offset(&ids[0]), 0.0);
    }
}
