//! Goal Store - flat JSON file backend
//!
//! The whole goal list lives in one file as a JSON array. Every mutation is
//! load, modify in memory, rewrite the whole file.
//!
//! # Key Points
//! - Missing file reads as an empty list
//! - Writes go to a sibling temp file, then rename over the target
//! - `update` serializes read-modify-write cycles within this process

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;

use super::goal::Goal;

pub const DEFAULT_FILE: &str = "goals.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Goal not found")]
    NotFound,

    #[error("goal file {path} is corrupt: {source}")]
    StorageCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    StorageWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Goal list storage bound to one file
#[derive(Debug)]
pub struct GoalStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl GoalStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full goal list
    pub fn load(&self) -> Result<Vec<Goal>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::StorageRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::StorageCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with the full goal list
    pub fn save(&self, goals: &[Goal]) -> Result<()> {
        let write_err = |source: std::io::Error| StoreError::StorageWriteError {
            path: self.path.clone(),
            source,
        };

        let body = serde_json::to_vec(goals).map_err(|e| write_err(e.into()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, body).map_err(write_err)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }

        debug!(path = %self.path.display(), count = goals.len(), "Saved goals");
        Ok(())
    }

    /// Load, mutate and save under the store lock.
    ///
    /// Nothing is written when `f` fails.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Goal>) -> Result<T>,
    {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut goals = self.load()?;
        let out = f(&mut goals)?;
        self.save(&goals)?;
        Ok(out)
    }

    /// Append a goal, returning its index
    pub fn append(&self, goal: Goal) -> Result<usize> {
        self.update(|goals| {
            goals.push(goal);
            Ok(goals.len() - 1)
        })
    }

    /// Remove the goal at `index`; later goals shift down by one
    pub fn remove(&self, index: usize) -> Result<Goal> {
        self.update(|goals| {
            if index >= goals.len() {
                return Err(StoreError::NotFound);
            }
            Ok(goals.remove(index))
        })
    }

    /// Overwrite the goal at `index`
    pub fn replace(&self, index: usize, goal: Goal) -> Result<()> {
        self.update(|goals| {
            let slot = goals.get_mut(index).ok_or(StoreError::NotFound)?;
            *slot = goal;
            Ok(())
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn goal(name: &str) -> Goal {
        Goal::new(name, 100.0, 10.0, "2030-01-01")
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = GoalStore::open(dir.path().join("goals.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let store = GoalStore::open(dir.path().join("goals.json"));

        let mut extra = goal("Bike");
        extra.insert("note", json!({"color": "blue"}));
        let goals = vec![goal("Trip"), extra];

        store.save(&goals).unwrap();
        assert_eq!(store.load().unwrap(), goals);
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.json");
        fs::write(&path, "{not json").unwrap();

        let store = GoalStore::open(&path);
        assert!(matches!(
            store.load(),
            Err(StoreError::StorageCorrupt { .. })
        ));
    }

    #[test]
    fn test_non_object_element_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.json");
        fs::write(&path, r#"[{"name": "a"}, null]"#).unwrap();

        let store = GoalStore::open(&path);
        assert!(matches!(
            store.load(),
            Err(StoreError::StorageCorrupt { .. })
        ));
        assert!(matches!(
            store.append(goal("b")),
            Err(StoreError::StorageCorrupt { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"[{"name": "a"}, null]"#);
    }

    #[test]
    fn test_append_in_order() {
        let dir = tempdir().unwrap();
        let store = GoalStore::open(dir.path().join("goals.json"));

        assert_eq!(store.append(goal("a")).unwrap(), 0);
        assert_eq!(store.append(goal("b")).unwrap(), 1);
        assert_eq!(store.append(goal("c")).unwrap(), 2);

        let names: Vec<_> = store
            .load()
            .unwrap()
            .iter()
            .map(|g| g.name().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_remove_shifts_later_goals() {
        let dir = tempdir().unwrap();
        let store = GoalStore::open(dir.path().join("goals.json"));
        store.save(&[goal("a"), goal("b"), goal("c")]).unwrap();

        let removed = store.remove(1).unwrap();
        assert_eq!(removed.name(), Some("b"));
        assert_eq!(store.load().unwrap(), vec![goal("a"), goal("c")]);
    }

    #[test]
    fn test_out_of_range_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.json");
        let store = GoalStore::open(&path);
        store.save(&[goal("a")]).unwrap();
        let before = fs::read(&path).unwrap();

        assert!(matches!(store.remove(1), Err(StoreError::NotFound)));
        assert!(matches!(
            store.replace(5, goal("x")),
            Err(StoreError::NotFound)
        ));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_replace() {
        let dir = tempdir().unwrap();
        let store = GoalStore::open(dir.path().join("goals.json"));
        store.save(&[goal("a"), goal("b")]).unwrap();

        let replacement: Goal = serde_json::from_value(json!({"name": "z", "extra": true})).unwrap();
        store.replace(0, replacement.clone()).unwrap();

        assert_eq!(store.load().unwrap(), vec![replacement, goal("b")]);
    }

    #[test]
    fn test_write_failure() {
        let dir = tempdir().unwrap();
        // The target path is an existing directory, so the rename fails
        let path = dir.path().join("goals.json");
        fs::create_dir(&path).unwrap();

        let store = GoalStore::open(&path);
        assert!(matches!(
            store.save(&[goal("a")]),
            Err(StoreError::StorageWriteError { .. })
        ));
    }
}
