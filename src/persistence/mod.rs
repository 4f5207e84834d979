pub mod diary_store;
pub mod files;
pub mod kv;
pub mod settings;
pub mod store;
pub mod task_store;

pub use diary_store::DiaryStore;
pub use files::{atomic_write, ensure_data_dir, init_local_data_dir, settings_file};
pub use kv::{DirStore, KeyValueStore};
pub use settings::{load_settings_or_default, save_settings, Settings};
pub use task_store::TaskStore;
