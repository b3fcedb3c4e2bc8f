use std::path::Path;

use crate::board::repo::Board;
use crate::io::store::StoreKey;
use crate::io::watcher::StoreWatcher;

/// What an external change resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Another process rewrote the task key; the board was reloaded
    /// wholesale (last writer wins)
    TasksReloaded,
    /// Another process changed the theme key; re-application is the
    /// rendering layer's job
    ThemeChanged,
}

/// Reconciles the in-memory board with writes from other processes.
///
/// This is the only path by which the collection changes without a local
/// mutation call. Events that merely echo this process's own writes are
/// dropped via the store's self-write check, matching storage media that
/// do not self-notify.
pub struct Reconciler {
    watcher: StoreWatcher,
}

impl Reconciler {
    /// Start watching the store directory for foreign writes.
    pub fn start(store_dir: &Path) -> Result<Self, notify::Error> {
        Ok(Reconciler {
            watcher: StoreWatcher::start(store_dir)?,
        })
    }

    /// Drain pending change notifications, reloading the board for a
    /// foreign task write. Call once per tick; non-blocking.
    pub fn poll(&self, board: &mut Board) -> Vec<SyncOutcome> {
        let mut outcomes = Vec::new();
        for key in self.watcher.poll() {
            if board.store().is_self_write(key) {
                continue;
            }
            let outcome = match key {
                StoreKey::Tasks => {
                    board.reload();
                    SyncOutcome::TasksReloaded
                }
                StoreKey::Theme => SyncOutcome::ThemeChanged,
            };
            if !outcomes.contains(&outcome) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }
}
