//! Task aggregate root and its creation/update parameter objects.

use super::{
    CategoryId, Notification, NotificationId, PriorityId, TaskDomainError, TaskId, TaskState,
    schedule,
};
use chrono::NaiveDate;
use std::hash::{Hash, Hasher};

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    name: String,
    description: String,
    deadline: NaiveDate,
    category_id: CategoryId,
    priority_id: PriorityId,
    state: TaskState,
}

impl NewTask {
    /// Creates a request with the required fields.
    ///
    /// The task starts uncategorized, with the default priority, in
    /// [`TaskState::Open`].
    #[must_use]
    pub fn new(name: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            deadline,
            category_id: CategoryId::UNCATEGORIZED,
            priority_id: PriorityId::DEFAULT,
            state: TaskState::Open,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = category_id;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority_id: PriorityId) -> Self {
        self.priority_id = priority_id;
        self
    }

    /// Sets the initial state. [`TaskState::Delayed`] is replaced by
    /// [`TaskState::Open`] at creation.
    #[must_use]
    pub const fn with_state(mut self, state: TaskState) -> Self {
        self.state = state;
        self
    }

    /// Returns the requested category.
    #[must_use]
    pub const fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Returns the requested priority.
    #[must_use]
    pub const fn priority_id(&self) -> PriorityId {
        self.priority_id
    }
}

/// Field changes applied by a task update. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    name: Option<String>,
    description: Option<String>,
    deadline: Option<NaiveDate>,
    category_id: Option<CategoryId>,
    priority_id: Option<PriorityId>,
    state: Option<TaskState>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Changes the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Changes the category.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Changes the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority_id: PriorityId) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    /// Changes the state.
    #[must_use]
    pub const fn with_state(mut self, state: TaskState) -> Self {
        self.state = Some(state);
        self
    }

    /// Returns the requested category, if changed.
    #[must_use]
    pub const fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Returns the requested priority, if changed.
    #[must_use]
    pub const fn priority_id(&self) -> Option<PriorityId> {
        self.priority_id
    }
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted deadline.
    pub deadline: NaiveDate,
    /// Persisted category reference.
    pub category_id: CategoryId,
    /// Persisted priority reference.
    pub priority_id: PriorityId,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted notifications, in stored order.
    pub notifications: Vec<Notification>,
}

/// Task aggregate root.
///
/// Owns its notifications exclusively. Invariant: a completed task holds no
/// notifications.
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    name: String,
    description: String,
    deadline: NaiveDate,
    category_id: CategoryId,
    priority_id: PriorityId,
    state: TaskState,
    notifications: Vec<Notification>,
}

impl Task {
    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name is blank or
    /// [`TaskDomainError::DeadlineInPast`] when `deadline < today`.
    pub fn new(id: TaskId, request: NewTask, today: NaiveDate) -> Result<Self, TaskDomainError> {
        let name = normalized_name(request.name)?;
        ensure_deadline_not_past(request.deadline, today)?;

        Ok(Self {
            id,
            name,
            description: request.description,
            deadline: request.deadline,
            category_id: request.category_id,
            priority_id: request.priority_id,
            state: request.state.operator_selected(),
            notifications: Vec::new(),
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            deadline: data.deadline,
            category_id: data.category_id,
            priority_id: data.priority_id,
            state: data.state,
            notifications: data.notifications,
        }
    }

    /// Converts the task back into its persisted form.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedTaskData {
        PersistedTaskData {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            deadline: self.deadline,
            category_id: self.category_id,
            priority_id: self.priority_id,
            state: self.state,
            notifications: self.notifications.clone(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    /// Returns the category reference.
    #[must_use]
    pub const fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Returns the priority reference.
    #[must_use]
    pub const fn priority_id(&self) -> PriorityId {
        self.priority_id
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the notifications, in insertion order.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Returns the notification with the given identifier.
    #[must_use]
    pub fn notification(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications
            .iter()
            .find(|notification| notification.id() == id)
    }

    /// Returns `true` when the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    /// Returns `true` when the task is delayed.
    #[must_use]
    pub const fn is_delayed(&self) -> bool {
        self.state.is_delayed()
    }

    /// Returns `true` when the deadline falls within `[today, today + days]`.
    #[must_use]
    pub fn is_due_within(&self, today: NaiveDate, days: u32) -> bool {
        let remaining = self.deadline.signed_duration_since(today).num_days();
        (0..=i64::from(days)).contains(&remaining)
    }

    /// Applies the automatic delay rule against `today`.
    ///
    /// Returns `true` when the state changed.
    pub fn check_if_delayed(&mut self, today: NaiveDate) -> bool {
        let next = self.state.delayed_as_of(self.deadline, today);
        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Applies a change set.
    ///
    /// Validation happens before any field is touched, so a rejected update
    /// leaves the task unchanged. The resulting deadline must not be before
    /// `today`, even when the change set leaves it alone, so an overdue task
    /// only accepts an update that moves its deadline. A delayed task updated
    /// without an explicit state becomes open. Completing the task clears its
    /// notifications; any other explicit state, or a new deadline, prunes
    /// notifications dated after the deadline.
    ///
    /// Returns the notifications that were removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] or
    /// [`TaskDomainError::DeadlineInPast`].
    pub fn apply_changes(
        &mut self,
        changes: TaskChanges,
        today: NaiveDate,
    ) -> Result<Vec<Notification>, TaskDomainError> {
        let name = changes.name.map(normalized_name).transpose()?;
        ensure_deadline_not_past(changes.deadline.unwrap_or(self.deadline), today)?;
        let new_deadline = changes
            .deadline
            .filter(|deadline| *deadline != self.deadline);

        if let Some(value) = name {
            self.name = value;
        }
        if let Some(value) = changes.description {
            self.description = value;
        }
        if let Some(value) = new_deadline {
            self.deadline = value;
        }
        if let Some(value) = changes.category_id {
            self.category_id = value;
        }
        if let Some(value) = changes.priority_id {
            self.priority_id = value;
        }

        let requested_state = changes.state.map(TaskState::operator_selected);
        match requested_state {
            Some(state) => self.state = state,
            None if self.state.is_delayed() => self.state = TaskState::Open,
            None => {}
        }

        let removed = if self.state.is_completed() {
            self.clear_notifications()
        } else if requested_state.is_some() || new_deadline.is_some() {
            self.prune_stale_notifications()
        } else {
            Vec::new()
        };
        Ok(removed)
    }

    /// Adds a notification after checking it against the deadline and
    /// `today`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotificationOnCompletedTask`] for completed
    /// tasks or [`TaskDomainError::InvalidNotificationDate`] when the date is
    /// outside `[today, deadline]`.
    pub fn add_notification(
        &mut self,
        notification: Notification,
        today: NaiveDate,
    ) -> Result<(), TaskDomainError> {
        self.ensure_accepts_notifications()?;
        schedule::validate_date(self, notification.date(), today)?;
        self.notifications.push(notification);
        Ok(())
    }

    /// Replaces the message and date of an existing notification, keeping
    /// its identifier.
    ///
    /// Returns `Ok(None)` when no notification has the identifier.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::add_notification`], plus
    /// [`TaskDomainError::EmptyNotificationMessage`].
    pub fn update_notification(
        &mut self,
        id: NotificationId,
        message: impl Into<String>,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Option<&Notification>, TaskDomainError> {
        if self.notification(id).is_none() {
            return Ok(None);
        }
        self.ensure_accepts_notifications()?;
        let normalized = super::notification::normalized_message(message.into())?;
        schedule::validate_date(self, date, today)?;

        let Some(existing) = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id() == id)
        else {
            return Ok(None);
        };
        existing.replace(normalized, date);
        Ok(Some(&*existing))
    }

    /// Removes a notification, returning it when present.
    pub fn remove_notification(&mut self, id: NotificationId) -> Option<Notification> {
        let position = self
            .notifications
            .iter()
            .position(|notification| notification.id() == id)?;
        Some(self.notifications.remove(position))
    }

    /// Removes every notification.
    pub fn clear_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Removes notifications dated strictly after the deadline.
    pub fn prune_stale_notifications(&mut self) -> Vec<Notification> {
        let current = std::mem::take(&mut self.notifications);
        let (kept, stale) = schedule::partition_stale(current, self.deadline);
        self.notifications = kept;
        stale
    }

    pub(crate) const fn reassign_priority(&mut self, priority_id: PriorityId) {
        self.priority_id = priority_id;
    }

    const fn ensure_accepts_notifications(&self) -> Result<(), TaskDomainError> {
        if self.state.is_completed() {
            return Err(TaskDomainError::NotificationOnCompletedTask(self.id));
        }
        Ok(())
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn normalized_name(name: String) -> Result<String, TaskDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTaskName);
    }
    Ok(trimmed.to_owned())
}

fn ensure_deadline_not_past(deadline: NaiveDate, today: NaiveDate) -> Result<(), TaskDomainError> {
    if deadline < today {
        return Err(TaskDomainError::DeadlineInPast { deadline, today });
    }
    Ok(())
}
