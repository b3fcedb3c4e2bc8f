use indexmap::IndexMap;

use crate::io::store::{Store, StoreError};
use crate::model::task::{Status, Task, TaskDraft, fresh_id, now_millis};

/// Error type for board operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("task not found: {0}")]
    TaskNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The task repository: owns the authoritative in-memory collection.
///
/// Tasks are kept in insertion order, keyed by id. Every operation that
/// actually changes state performs exactly one synchronous store write
/// before returning; no-ops (stale ids, same-status drops) never touch
/// the store.
pub struct Board {
    tasks: IndexMap<String, Task>,
    store: Store,
}

impl Board {
    /// Open a board over the given store, loading whatever it holds.
    pub fn open(store: Store) -> Board {
        let tasks = store
            .load_tasks()
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();
        Board { tasks, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable store access for the theme key; task writes go through
    /// the board's own operations.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Create a task in the todo column from a form draft.
    /// Rejects a title that trims to empty.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, BoardError> {
        let draft = draft.normalized();
        if draft.title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        let task = Task {
            id: fresh_id(),
            title: draft.title,
            desc: draft.desc,
            due: draft.due,
            prio: draft.prio,
            status: Status::Todo,
            created_at: now_millis(),
        };
        self.tasks.insert(task.id.clone(), task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Overwrite the four mutable fields of an existing task.
    /// Status and createdAt are untouched. Rejects an empty title,
    /// same as creation.
    pub fn update(&mut self, id: &str, draft: TaskDraft) -> Result<(), BoardError> {
        if !self.tasks.contains_key(id) {
            return Err(BoardError::TaskNotFound(id.to_string()));
        }
        let draft = draft.normalized();
        if draft.title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        if let Some(task) = self.tasks.get_mut(id) {
            task.title = draft.title;
            task.desc = draft.desc;
            task.due = draft.due;
            task.prio = draft.prio;
        }
        self.persist()?;
        Ok(())
    }

    /// Remove a task. A stale id is a silent no-op (returns false).
    pub fn delete(&mut self, id: &str) -> Result<bool, BoardError> {
        if self.tasks.shift_remove(id).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Move a task to another column. Idempotent: a stale id or a move
    /// to the column the task already occupies changes nothing, writes
    /// nothing, and returns false.
    pub fn set_status(&mut self, id: &str, status: Status) -> Result<bool, BoardError> {
        match self.tasks.get_mut(id) {
            Some(task) if task.status != status => task.status = status,
            _ => return Ok(false),
        }
        self.persist()?;
        Ok(true)
    }

    /// Empty the board unconditionally. Confirmation, if any, is the
    /// caller's concern.
    pub fn clear_all(&mut self) -> Result<(), BoardError> {
        self.tasks.clear();
        self.persist()?;
        Ok(())
    }

    /// Read-only view of the collection, in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// How many tasks occupy a column (unfiltered)
    pub fn count_in(&self, status: Status) -> usize {
        self.tasks.values().filter(|t| t.status == status).count()
    }

    /// Discard the in-memory collection and reload it from the store.
    /// Only the reconciler calls this; last writer wins.
    pub fn reload(&mut self) {
        self.tasks = self
            .store
            .load_tasks()
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect();
    }

    fn persist(&mut self) -> Result<(), BoardError> {
        let snapshot: Vec<Task> = self.tasks.values().cloned().collect();
        self.store.save_tasks(&snapshot)?;
        Ok(())
    }
}
