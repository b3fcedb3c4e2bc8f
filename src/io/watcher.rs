use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::store::StoreKey;

/// A file system watcher for the store directory.
///
/// Delivers a `StoreKey` whenever one of the two store files changes on
/// disk, including changes made by other processes on the same store.
/// Temp files from atomic writes do not map to a key and are dropped.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<StoreKey>,
}

impl StoreWatcher {
    /// Start watching the given store directory.
    /// Returns a `StoreWatcher` whose `poll()` method should be called each tick.
    pub fn start(store_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let store_dir_owned = store_dir.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                for path in event.paths {
                    if !path.starts_with(&store_dir_owned) {
                        continue;
                    }
                    if let Some(key) = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .and_then(StoreKey::from_file_name)
                    {
                        let _ = tx.send(key);
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(store_dir, RecursiveMode::NonRecursive)?;
        Ok(StoreWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending change notifications.
    /// Returns each changed key at most once (may be empty).
    pub fn poll(&self) -> Vec<StoreKey> {
        let mut keys = Vec::new();
        while let Ok(key) = self.rx.try_recv() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}
