pub mod config_io;
pub mod store;
pub mod watcher;
