//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod storage;

pub use storage::{StorageError, StorageResult, TaskStorage};
