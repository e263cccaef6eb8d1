use tracing::debug;

use crate::model::folder::Folder;
use crate::model::task::Task;

use super::next_numeric_id;

/// Add a folder. Returns the new id, or `None` (state unchanged) when the
/// trimmed name is empty.
pub fn add_folder(folders: &mut Vec<Folder>, name: &str, color: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let id = next_numeric_id(folders.iter().map(|f| f.id.as_str())).to_string();
    folders.push(Folder {
        id: id.clone(),
        name: name.to_string(),
        color: color.to_string(),
    });
    Some(id)
}

/// Delete a folder and clear every task's weak reference to it. Tasks are
/// never cascade-deleted. Returns false when the id is unknown.
pub fn delete_folder(folders: &mut Vec<Folder>, tasks: &mut [Task], id: &str) -> bool {
    let before = folders.len();
    folders.retain(|f| f.id != id);
    if folders.len() == before {
        return false;
    }
    let mut cleared = 0;
    for task in tasks.iter_mut() {
        if task.folder_id.as_deref() == Some(id) {
            task.folder_id = None;
            cleared += 1;
        }
    }
    debug!(id, cleared, "deleted folder");
    true
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_folder_assigns_fresh_ids() {
        let mut folders = Vec::new();
        let a = add_folder(&mut folders, "Work", "#FFAA00").unwrap();
        let b = add_folder(&mut folders, "Privat", "#FFB6C1").unwrap();
        assert_ne!(a, b);
        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0].name, "Work");
    }

    #[test]
    fn test_add_folder_trims_name() {
        let mut folders = Vec::new();
        add_folder(&mut folders, "  Uni  ", "#AABBCC").unwrap();
        assert_eq!(folders[0].name, "Uni");
    }

    #[test]
    fn test_add_folder_rejects_blank_name() {
        let mut folders = Vec::new();
        assert_eq!(add_folder(&mut folders, "   ", "#AABBCC"), None);
        assert!(folders.is_empty());
    }

    #[test]
    fn test_delete_folder_clears_references_without_deleting_tasks() {
        let mut folders = Vec::new();
        let id = add_folder(&mut folders, "Work", "#FFAA00").unwrap();

        let mut task = Task::new("1".into(), "Report schreiben".into(), day("2025-03-10"));
        task.folder_id = Some(id.clone());
        let other = Task::new("2".into(), "Einkaufen".into(), day("2025-03-10"));
        let mut tasks = vec![task, other];

        assert!(delete_folder(&mut folders, &mut tasks, &id));
        assert!(folders.is_empty());
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].folder_id, None);
    }

    #[test]
    fn test_delete_unknown_folder_is_noop() {
        let mut folders = Vec::new();
        add_folder(&mut folders, "Work", "#FFAA00").unwrap();
        let mut tasks = Vec::new();
        assert!(!delete_folder(&mut folders, &mut tasks, "nope"));
        assert_eq!(folders.len(), 1);
    }
}
