use crate::board::repo::{Board, BoardError};
use crate::model::task::Status;

/// What a drop resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The task changed column
    Moved,
    /// Nothing happened: no id, stale id, or same-column drop
    Ignored,
}

/// State held for the duration of one drag gesture: the dragged task's id.
#[derive(Debug, Default)]
pub struct DragGesture {
    dragging: Option<String>,
}

impl DragGesture {
    pub fn start(&mut self, id: impl Into<String>) {
        self.dragging = Some(id.into());
    }

    /// The id currently being dragged, if a gesture is live
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Resolve a drop onto a column. The live drag state wins; a fallback
    /// id carried by the drop event itself covers handlers that fire
    /// without live state. A drop that resolves to no task, or to a task
    /// already in the target column, is ignored without a spurious
    /// "moved" result.
    pub fn drop_on(
        &mut self,
        board: &mut Board,
        column: Status,
        fallback_id: Option<&str>,
    ) -> Result<DropOutcome, BoardError> {
        let Some(id) = self.dragging.as_deref().or(fallback_id) else {
            return Ok(DropOutcome::Ignored);
        };
        let id = id.to_string();
        if board.set_status(&id, column)? {
            Ok(DropOutcome::Moved)
        } else {
            Ok(DropOutcome::Ignored)
        }
    }

    /// Clear the gesture. Called unconditionally when the drag ends,
    /// whether or not a drop happened.
    pub fn end(&mut self) {
        self.dragging = None;
    }
}
