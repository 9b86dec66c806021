//! Errors returned by task services.

use crate::task::domain::{CatalogKind, ErrorKind, NotificationId, TaskDomainError, TaskId};
use thiserror::Error;

/// Service-level errors for task, notification and catalog commands.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// No task has the identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    /// The task exists but holds no notification with the identifier.
    #[error("notification {notification_id} not found on task {task_id}")]
    NotificationNotFound {
        /// Owning task.
        task_id: TaskId,
        /// Missing notification.
        notification_id: NotificationId,
    },

    /// A category or priority identifier does not resolve.
    #[error("{kind} {id} not found")]
    CatalogEntryNotFound {
        /// Catalog searched.
        kind: CatalogKind,
        /// Raw identifier looked up.
        id: i64,
    },

    /// Another entry of the same catalog already uses the label.
    #[error("{kind} \"{label}\" already exists")]
    DuplicateLabel {
        /// Catalog holding the clash.
        kind: CatalogKind,
        /// Rejected label.
        label: String,
    },

    /// The sentinel entry of a catalog cannot be renamed or deleted.
    #[error("the default {kind} cannot be modified or deleted")]
    ProtectedEntry {
        /// Catalog of the sentinel.
        kind: CatalogKind,
    },
}

impl TaskServiceError {
    /// Returns the taxonomy bucket for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::TaskNotFound(_)
            | Self::NotificationNotFound { .. }
            | Self::CatalogEntryNotFound { .. } => ErrorKind::NotFound,
            Self::DuplicateLabel { .. } => ErrorKind::Validation,
            Self::ProtectedEntry { .. } => ErrorKind::ProtectedEntity,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
