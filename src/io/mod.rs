pub mod csv_export;
pub mod settings;
pub mod storage;
pub mod tasks;

pub use storage::{FileStore, KeyValueStore};
pub use tasks::{load_tasks, save_tasks};
