//! Reminder notifications owned by a task.

use super::{NotificationId, TaskDomainError, TaskId};
use chrono::NaiveDate;
use std::hash::{Hash, Hasher};

/// A reminder message shown on a calendar date.
///
/// Notifications are owned by exactly one task and compare equal by
/// identifier alone.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    message: String,
    date: NaiveDate,
}

impl Notification {
    /// Creates a notification with a validated message.
    ///
    /// The date is not checked here; the owning task validates it against
    /// its deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyNotificationMessage`] when the message
    /// is empty after trimming.
    pub fn new(
        id: NotificationId,
        message: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, TaskDomainError> {
        let message = normalized_message(message.into())?;
        Ok(Self { id, message, date })
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: NotificationId, message: String, date: NaiveDate) -> Self {
        Self { id, message, date }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the reminder message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the date the reminder fires.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns `true` when the reminder is due on or before `today`.
    #[must_use]
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.date <= today
    }

    pub(crate) fn replace(&mut self, message: String, date: NaiveDate) {
        self.message = message;
        self.date = date;
    }
}

impl PartialEq for Notification {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Notification {}

impl Hash for Notification {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A notification together with the task that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledNotification {
    /// Owning task identifier.
    pub task_id: TaskId,
    /// Owning task name.
    pub task_name: String,
    /// The notification itself.
    pub notification: Notification,
}

pub(crate) fn normalized_message(message: String) -> Result<String, TaskDomainError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyNotificationMessage);
    }
    Ok(trimmed.to_owned())
}
