pub mod drag;
pub mod edit;
pub mod repo;
pub mod search;
pub mod sync;

pub use drag::{DragGesture, DropOutcome};
pub use edit::{CommitOutcome, EditSession};
pub use repo::{Board, BoardError};
pub use search::visible;
pub use sync::{Reconciler, SyncOutcome};
