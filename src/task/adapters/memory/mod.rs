//! In-memory adapters for task storage.

mod storage;

pub use storage::InMemoryTaskStorage;
