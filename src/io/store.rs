use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::warn;

use crate::model::folder::Folder;
use crate::model::task::Task;

/// Storage key for the folder collection blob
pub const FOLDERS_KEY: &str = "blume.folders";
/// Storage key for the task collection blob
pub const TODOS_KEY: &str = "blume.todos";

/// Error type for persistent store writes
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {key}: {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },
}

/// String-keyed blob store the engine persists through. A missing key is
/// a first run, not an error. The engine reads exactly two keys and never
/// writes any other.
pub trait KeyValue {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory backend: the testing fake, and a stand-in for browser-style
/// key/value storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValue for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key, written
/// atomically through a temp file rename.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(FileStore {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValue for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_err = |source: std::io::Error| StoreError::Write {
            key: key.to_string(),
            source,
        };
        let mut temp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        temp.write_all(value.as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;
        temp.persist(self.path_for(key))
            .map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

/// Decode a persisted collection. A missing key yields an empty
/// collection; corrupt JSON is discarded with a warning so the
/// application can always start.
fn decode_collection<T: DeserializeOwned>(key: &str, raw: Option<String>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(err) => {
            warn!(key, %err, "discarding corrupt stored collection");
            Vec::new()
        }
    }
}

/// Serialize and write one collection in full. Best-effort: a failed
/// write is logged and the in-memory state stays authoritative for the
/// session.
fn save_collection<T: Serialize>(store: &mut impl KeyValue, key: &str, items: &[T]) {
    let json = match serde_json::to_string(items) {
        Ok(json) => json,
        Err(err) => {
            warn!(key, %err, "could not serialize collection");
            return;
        }
    };
    if let Err(err) = store.save(key, &json) {
        warn!(key, %err, "persist failed; keeping in-memory state");
    }
}

pub fn load_folders(store: &impl KeyValue) -> Vec<Folder> {
    decode_collection(FOLDERS_KEY, store.load(FOLDERS_KEY))
}

pub fn load_tasks(store: &impl KeyValue) -> Vec<Task> {
    decode_collection(TODOS_KEY, store.load(TODOS_KEY))
}

pub fn save_folders(store: &mut impl KeyValue, folders: &[Folder]) {
    save_collection(store, FOLDERS_KEY, folders);
}

pub fn save_tasks(store: &mut impl KeyValue, tasks: &[Task]) {
    save_collection(store, TODOS_KEY, tasks);
}
