pub mod config;
pub mod task;
pub mod theme;

pub use config::AppConfig;
pub use task::{Priority, Status, Task, TaskDraft};
pub use theme::ThemeChoice;
