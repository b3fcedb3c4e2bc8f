use crate::board::repo::{Board, BoardError};
use crate::model::task::TaskDraft;

/// How a commit resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Fields applied, session back to idle
    Updated,
    /// The task vanished while the form was open; nothing applied,
    /// session back to idle
    TaskGone,
    /// Empty title; nothing applied, session stays open for a re-prompt
    RejectedEmptyTitle,
    /// Commit called with no session open
    NotEditing,
}

/// A modal edit session over one task at a time.
///
/// `open` snapshots the task's mutable fields into a local draft; the
/// form layer mutates the draft, then either commits it back through the
/// repository or discards it. The session never assumes which exit the
/// UI takes and both leave it clean.
#[derive(Debug, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { id: String, draft: TaskDraft },
}

impl EditSession {
    /// Begin editing a task. Fails silently (stays idle) on an unknown id.
    pub fn open(&mut self, board: &Board, id: &str) -> bool {
        let Some(task) = board.get(id) else {
            return false;
        };
        *self = EditSession::Editing {
            id: id.to_string(),
            draft: TaskDraft::from_task(task),
        };
        true
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    /// The id under edit, if a session is open
    pub fn target(&self) -> Option<&str> {
        match self {
            EditSession::Editing { id, .. } => Some(id),
            EditSession::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&TaskDraft> {
        match self {
            EditSession::Editing { draft, .. } => Some(draft),
            EditSession::Idle => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut TaskDraft> {
        match self {
            EditSession::Editing { draft, .. } => Some(draft),
            EditSession::Idle => None,
        }
    }

    /// Apply the edited fields through the repository.
    ///
    /// A task deleted out from under the modal degrades to a no-op; an
    /// empty title keeps the session open so the form can re-prompt.
    pub fn commit(&mut self, board: &mut Board) -> Result<CommitOutcome, BoardError> {
        let EditSession::Editing { id, draft } = std::mem::take(self) else {
            return Ok(CommitOutcome::NotEditing);
        };
        match board.update(&id, draft.clone()) {
            Ok(()) => Ok(CommitOutcome::Updated),
            Err(BoardError::TaskNotFound(_)) => Ok(CommitOutcome::TaskGone),
            Err(BoardError::EmptyTitle) => {
                *self = EditSession::Editing { id, draft };
                Ok(CommitOutcome::RejectedEmptyTitle)
            }
            Err(e) => Err(e),
        }
    }

    /// Close the session without touching the repository.
    pub fn discard(&mut self) {
        *self = EditSession::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::Store;
    use crate::model::task::Priority;
    use tempfile::TempDir;

    fn board(dir: &TempDir) -> Board {
        Board::open(Store::open(dir.path()).unwrap())
    }

    fn create(board: &mut Board, title: &str) -> String {
        board
            .create(TaskDraft {
                title: title.into(),
                ..Default::default()
            })
            .unwrap()
            .id
    }

    #[test]
    fn open_snapshots_the_current_fields() {
        let dir = TempDir::new().unwrap();
        let mut b = board(&dir);
        let id = create(&mut b, "Original");
        let mut session = EditSession::default();

        assert!(session.open(&b, &id));
        assert_eq!(session.target(), Some(id.as_str()));
        assert_eq!(session.draft().unwrap().title, "Original");
    }

    #[test]
    fn open_on_unknown_id_stays_idle() {
        let dir = TempDir::new().unwrap();
        let b = board(&dir);
        let mut session = EditSession::default();
        assert!(!session.open(&b, "ghost"));
        assert!(!session.is_editing());
    }

    #[test]
    fn commit_applies_the_draft_and_closes() {
        let dir = TempDir::new().unwrap();
        let mut b = board(&dir);
        let id = create(&mut b, "Original");
        let mut session = EditSession::default();
        session.open(&b, &id);
        {
            let draft = session.draft_mut().unwrap();
            draft.title = "Edited".into();
            draft.prio = Priority::P1;
        }

        let outcome = session.commit(&mut b).unwrap();
        assert_eq!(outcome, CommitOutcome::Updated);
        assert!(!session.is_editing());
        let task = b.get(&id).unwrap();
        assert_eq!(task.title, "Edited");
        assert_eq!(task.prio, Priority::P1);
    }

    #[test]
    fn discard_leaves_the_board_untouched() {
        let dir = TempDir::new().unwrap();
        let mut b = board(&dir);
        let id = create(&mut b, "Original");
        let before: Vec<_> = b.tasks().cloned().collect();
        let raw_before = std::fs::read_to_string(dir.path().join("tm_tasks_v1")).unwrap();

        let mut session = EditSession::default();
        session.open(&b, &id);
        session.draft_mut().unwrap().title = "Scribbles".into();
        session.discard();

        assert!(!session.is_editing());
        let after: Vec<_> = b.tasks().cloned().collect();
        assert_eq!(before, after);
        let raw_after = std::fs::read_to_string(dir.path().join("tm_tasks_v1")).unwrap();
        assert_eq!(raw_before, raw_after);
    }

    #[test]
    fn commit_after_the_task_was_deleted_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut b = board(&dir);
        let id = create(&mut b, "Doomed");
        let mut session = EditSession::default();
        session.open(&b, &id);

        // Deleted by another code path while the modal is open
        b.delete(&id).unwrap();

        let outcome = session.commit(&mut b).unwrap();
        assert_eq!(outcome, CommitOutcome::TaskGone);
        assert!(!session.is_editing());
        assert!(b.is_empty());
    }

    #[test]
    fn empty_title_keeps_the_session_open() {
        let dir = TempDir::new().unwrap();
        let mut b = board(&dir);
        let id = create(&mut b, "Keep");
        let mut session = EditSession::default();
        session.open(&b, &id);
        session.draft_mut().unwrap().title = "   ".into();

        let outcome = session.commit(&mut b).unwrap();
        assert_eq!(outcome, CommitOutcome::RejectedEmptyTitle);
        assert!(session.is_editing());
        assert_eq!(b.get(&id).unwrap().title, "Keep");
    }

    #[test]
    fn commit_without_a_session_reports_not_editing() {
        let dir = TempDir::new().unwrap();
        let mut b = board(&dir);
        let mut session = EditSession::default();
        assert_eq!(session.commit(&mut b).unwrap(), CommitOutcome::NotEditing);
    }
}
