//! Error types for task domain validation and parsing.

use super::TaskId;
use chrono::NaiveDate;
use thiserror::Error;

/// Coarse error taxonomy shared by domain and service errors.
///
/// Callers use the kind to decide how to surface a failure without matching
/// on every individual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty required field, duplicate label, or a deadline in the past.
    Validation,
    /// A notification date outside `[today, deadline]`.
    InvalidNotificationDate,
    /// The referenced entity does not exist.
    NotFound,
    /// An attempt to change or delete a sentinel category or priority.
    ProtectedEntity,
}

/// Errors returned while constructing or mutating domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The deadline lies before the current date.
    #[error("deadline {deadline} is before today ({today})")]
    DeadlineInPast {
        /// Rejected deadline.
        deadline: NaiveDate,
        /// Date the check was evaluated against.
        today: NaiveDate,
    },

    /// The notification message is empty after trimming.
    #[error("notification message must not be empty")]
    EmptyNotificationMessage,

    /// The notification date lies outside `[today, deadline]`.
    #[error("notification date {date} must fall between {today} and the deadline {deadline}")]
    InvalidNotificationDate {
        /// Rejected notification date.
        date: NaiveDate,
        /// Date the check was evaluated against.
        today: NaiveDate,
        /// Deadline of the owning task.
        deadline: NaiveDate,
    },

    /// Completed tasks do not accept notifications.
    #[error("task {0} is completed and cannot hold notifications")]
    NotificationOnCompletedTask(TaskId),

    /// A category name or priority level is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyLabel(&'static str),

    /// Date arithmetic left the representable calendar range.
    #[error("date arithmetic overflowed relative to {0}")]
    DateOutOfRange(NaiveDate),
}

impl TaskDomainError {
    /// Returns the taxonomy bucket for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidNotificationDate { .. } | Self::DateOutOfRange(_) => {
                ErrorKind::InvalidNotificationDate
            }
            Self::EmptyTaskName
            | Self::DeadlineInPast { .. }
            | Self::EmptyNotificationMessage
            | Self::NotificationOnCompletedTask(_)
            | Self::EmptyLabel(_) => ErrorKind::Validation,
        }
    }
}

/// Error returned while strictly parsing task state labels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);
