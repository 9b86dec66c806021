//! Serde record models for the JSON storage format.
//!
//! Field names follow the established file layout (`taskID`, `dueDate`,
//! `categoryID`, `priorityId`, ...), which is why they do not match the
//! domain naming.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::domain::{
    CatalogEntry, Category, CategoryId, Notification, NotificationId, PersistedTaskData, Priority,
    PriorityId, Task, TaskId, TaskState,
};

/// Stored form of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task identifier.
    #[serde(rename = "taskID")]
    pub task_id: i64,
    /// Task name.
    pub name: String,
    /// Task description.
    #[serde(default)]
    pub description: String,
    /// Deadline as `YYYY-MM-DD`.
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
    /// Category reference.
    #[serde(rename = "categoryID")]
    pub category_id: i64,
    /// Priority reference.
    #[serde(rename = "priorityID")]
    pub priority_id: i64,
    /// Owned notifications.
    #[serde(default)]
    pub notifications: Vec<NotificationRecord>,
    /// State display label. Missing or unknown labels load as `Open`.
    #[serde(default)]
    pub state: Option<String>,
}

/// Stored form of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Notification identifier.
    #[serde(rename = "notificationId")]
    pub notification_id: i64,
    /// Reminder message.
    pub message: String,
    /// Reminder date as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

/// Stored form of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Category identifier.
    #[serde(rename = "categoryID")]
    pub category_id: i64,
    /// Category name.
    pub name: String,
}

/// Stored form of a priority.
///
/// The label is stored under `name` even though it is the priority level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRecord {
    /// Priority identifier.
    #[serde(rename = "priorityId")]
    pub priority_id: i64,
    /// Priority level.
    pub name: String,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id().value(),
            name: task.name().to_owned(),
            description: task.description().to_owned(),
            due_date: task.deadline(),
            category_id: task.category_id().value(),
            priority_id: task.priority_id().value(),
            notifications: task
                .notifications()
                .iter()
                .map(NotificationRecord::from)
                .collect(),
            state: Some(task.state().label().to_owned()),
        }
    }
}

impl From<TaskRecord> for PersistedTaskData {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: TaskId::new(record.task_id),
            name: record.name,
            description: record.description,
            deadline: record.due_date,
            category_id: CategoryId::new(record.category_id),
            priority_id: PriorityId::new(record.priority_id),
            state: TaskState::from_label(record.state.as_deref()),
            notifications: record
                .notifications
                .into_iter()
                .map(Notification::from)
                .collect(),
        }
    }
}

impl From<&Notification> for NotificationRecord {
    fn from(notification: &Notification) -> Self {
        Self {
            notification_id: notification.id().value(),
            message: notification.message().to_owned(),
            date: notification.date(),
        }
    }
}

impl From<NotificationRecord> for Notification {
    fn from(record: NotificationRecord) -> Self {
        Self::from_persisted(
            NotificationId::new(record.notification_id),
            record.message,
            record.date,
        )
    }
}

impl From<&Category> for CategoryRecord {
    fn from(category: &Category) -> Self {
        Self {
            category_id: category.raw_id(),
            name: category.name().to_owned(),
        }
    }
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self::from_persisted(CategoryId::new(record.category_id), record.name)
    }
}

impl From<&Priority> for PriorityRecord {
    fn from(priority: &Priority) -> Self {
        Self {
            priority_id: priority.raw_id(),
            name: priority.level().to_owned(),
        }
    }
}

impl From<PriorityRecord> for Priority {
    fn from(record: PriorityRecord) -> Self {
        Self::from_persisted(PriorityId::new(record.priority_id), record.name)
    }
}
