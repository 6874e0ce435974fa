pub mod config_io;
pub mod lock;
pub mod storage;
pub mod store;
pub mod watcher;
