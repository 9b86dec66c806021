//! File-backed storage using one JSON array per entity kind.

mod models;
mod storage;

pub use models::{CategoryRecord, NotificationRecord, PriorityRecord, TaskRecord};
pub use storage::JsonFileStorage;
