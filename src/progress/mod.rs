pub mod model;
pub mod storage;
pub mod store;

pub use model::PlayerProgress;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{ObserverId, ProgressStore, PROGRESS_KEY};
