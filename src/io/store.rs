use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::task::Task;
use crate::model::theme::ThemeChoice;

/// File name of the task collection key
pub const TASKS_KEY: &str = "tm_tasks_v1";
/// File name of the theme preference key
pub const THEME_KEY: &str = "tm_theme_v1";

/// The two keys the store knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Tasks,
    Theme,
}

impl StoreKey {
    pub fn file_name(self) -> &'static str {
        match self {
            StoreKey::Tasks => TASKS_KEY,
            StoreKey::Theme => THEME_KEY,
        }
    }

    /// Map a file name back to a key; anything else is not ours
    pub fn from_file_name(name: &str) -> Option<StoreKey> {
        match name {
            TASKS_KEY => Some(StoreKey::Tasks),
            THEME_KEY => Some(StoreKey::Theme),
            _ => None,
        }
    }
}

/// Error type for store writes. Reads never fail: missing or corrupt
/// content degrades to an empty collection / no preference.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not create store directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable key/value store: one file per key under a store directory.
///
/// Writes are atomic (temp file + rename) and synchronous, so a completed
/// call means the mutation is on disk. The store remembers the exact bytes
/// of its own last write per key; the reconciler uses that to tell a
/// foreign process's write from the file-watcher echo of a local one.
pub struct Store {
    dir: PathBuf,
    last_written: HashMap<StoreKey, String>,
}

impl Store {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Store, StoreError> {
        fs::create_dir_all(dir).map_err(|e| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        Ok(Store {
            dir: dir.to_path_buf(),
            last_written: HashMap::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StoreKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Load the task collection. Missing file or unparseable content
    /// yields an empty collection, never an error.
    pub fn load_tasks(&self) -> Vec<Task> {
        fs::read_to_string(self.path(StoreKey::Tasks))
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Persist the whole task collection as a JSON array.
    pub fn save_tasks(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let content = serde_json::to_string(tasks)?;
        self.write_key(StoreKey::Tasks, content)
    }

    /// Load the theme preference; `None` if unset or unrecognized.
    pub fn load_theme(&self) -> Option<ThemeChoice> {
        let raw = fs::read_to_string(self.path(StoreKey::Theme)).ok()?;
        raw.trim().parse().ok()
    }

    pub fn save_theme(&mut self, theme: ThemeChoice) -> Result<(), StoreError> {
        self.write_key(StoreKey::Theme, theme.as_str().to_string())
    }

    /// True if the file currently on disk holds exactly what this store
    /// instance last wrote to that key. Foreign writes change the bytes.
    pub fn is_self_write(&self, key: StoreKey) -> bool {
        let Some(own) = self.last_written.get(&key) else {
            return false;
        };
        match fs::read_to_string(self.path(key)) {
            Ok(current) => current == *own,
            Err(_) => false,
        }
    }

    fn write_key(&mut self, key: StoreKey, content: String) -> Result<(), StoreError> {
        let path = self.path(key);
        atomic_write(&path, content.as_bytes()).map_err(|e| StoreError::WriteFailed {
            path,
            source: e,
        })?;
        self.last_written.insert(key, content);
        Ok(())
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
