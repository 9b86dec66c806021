//! Storage port: whole-collection load and save per entity kind.
//!
//! The core never persists individual mutations. It loads each collection
//! once when a workspace opens and hands each collection back once when the
//! workspace is saved.

use crate::task::domain::{Category, PersistedTaskData, Priority, Task};
use std::sync::Arc;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable storage for the three entity collections.
///
/// Loading a collection that has never been saved returns an empty vector.
/// Sentinel synthesis and record validation are the caller's concern.
#[cfg_attr(test, mockall::automock)]
pub trait TaskStorage {
    /// Loads every persisted task.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be read or
    /// its contents are malformed.
    fn load_tasks(&self) -> StorageResult<Vec<PersistedTaskData>>;

    /// Replaces the persisted task collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the write fails. The previous durable
    /// copy must remain intact in that case.
    fn save_tasks(&self, tasks: &[Task]) -> StorageResult<()>;

    /// Loads every persisted category, including any stored sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be read or
    /// its contents are malformed.
    fn load_categories(&self) -> StorageResult<Vec<Category>>;

    /// Replaces the persisted category collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the write fails.
    fn save_categories(&self, categories: &[Category]) -> StorageResult<()>;

    /// Loads every persisted priority, including any stored sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be read or
    /// its contents are malformed.
    fn load_priorities(&self) -> StorageResult<Vec<Priority>>;

    /// Replaces the persisted priority collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the write fails.
    fn save_priorities(&self, priorities: &[Priority]) -> StorageResult<()>;
}

/// Errors returned by storage implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("storage I/O error on {collection}: {source}")]
    Io {
        /// Collection being accessed.
        collection: &'static str,
        /// Underlying failure.
        source: Arc<std::io::Error>,
    },

    /// The stored data could not be decoded.
    #[error("malformed {collection} data: {reason}")]
    Malformed {
        /// Collection being decoded.
        collection: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// Storage-layer failure not tied to a single collection.
    #[error("storage unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps an I/O failure for `collection`.
    #[must_use]
    pub fn io(collection: &'static str, err: std::io::Error) -> Self {
        Self::Io {
            collection,
            source: Arc::new(err),
        }
    }

    /// Records a decoding failure for `collection`.
    #[must_use]
    pub fn malformed(collection: &'static str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            collection,
            reason: reason.into(),
        }
    }

    /// Wraps an arbitrary storage failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
