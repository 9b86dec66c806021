//! Task Store: the authoritative in-memory task collection.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::domain::{
    CategoryId, EntityKind, IdentityAllocator, NewTask, Notification, NotificationId,
    NotificationTiming, PersistedTaskData, PresetMenu, PriorityId, ScheduledNotification, Task,
    TaskChanges, TaskId, schedule,
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;

/// Ordering applied to search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskOrder {
    /// Store order, which is insertion order.
    #[default]
    Insertion,
    /// Ascending category identifier, ties in store order.
    Category,
    /// Earliest deadline first, ties in store order.
    Deadline,
    /// Case-insensitive name, ties in store order.
    Name,
}

/// Search criteria for [`TaskStore::search`].
///
/// `None` for category or priority matches any value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    name_pattern: String,
    category_id: Option<CategoryId>,
    priority_id: Option<PriorityId>,
    order: TaskOrder,
}

impl TaskQuery {
    /// Creates a query matching every task in store order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to names containing `pattern`, ignoring case.
    ///
    /// The pattern is matched as given; surrounding whitespace is significant.
    #[must_use]
    pub fn with_name(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = pattern.into();
        self
    }

    /// Restricts results to one category.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Restricts results to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority_id: PriorityId) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    /// Sets the result ordering.
    #[must_use]
    pub const fn ordered_by(mut self, order: TaskOrder) -> Self {
        self.order = order;
        self
    }

    fn matches(&self, task: &Task, needle: &str) -> bool {
        (needle.is_empty() || task.name().to_lowercase().contains(needle))
            && self.category_id.is_none_or(|id| task.category_id() == id)
            && self.priority_id.is_none_or(|id| task.priority_id() == id)
    }
}

/// Aggregate counts over the task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    /// Number of tasks.
    pub total: usize,
    /// Tasks in the completed state.
    pub completed: usize,
    /// Tasks in the delayed state.
    pub delayed: usize,
    /// Tasks whose deadline falls within the due-soon window.
    pub due_soon: usize,
}

/// In-memory task collection.
///
/// Every command reads "today" from the clock once and uses that date for
/// all of its checks.
#[derive(Debug)]
pub struct TaskStore<C>
where
    C: Clock + Send + Sync,
{
    tasks: Vec<Task>,
    ids: IdentityAllocator,
    clock: Arc<C>,
}

impl<C> TaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            tasks: Vec::new(),
            ids: IdentityAllocator::new(),
            clock,
        }
    }

    /// Returns the current local calendar date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    /// Replaces the collection with persisted tasks.
    ///
    /// Restored identifiers advance the allocator watermarks. Each task then
    /// gets the delay rule applied, completed tasks drop any notifications,
    /// and notifications dated after the deadline are pruned. Records that
    /// repeat an already restored task identifier are skipped.
    ///
    /// Returns the number of tasks restored.
    pub fn load(&mut self, records: Vec<PersistedTaskData>) -> usize {
        let today = self.today();
        let mut seen = HashSet::new();
        self.tasks.clear();

        for record in records {
            if !seen.insert(record.id) {
                tracing::warn!(task_id = %record.id, "skipping duplicate task record");
                continue;
            }
            self.ids.reconcile(EntityKind::Task, record.id.value());
            for notification in &record.notifications {
                self.ids
                    .reconcile(EntityKind::Notification, notification.id().value());
            }

            let mut task = Task::from_persisted(record);
            task.check_if_delayed(today);
            if task.is_completed() {
                task.clear_notifications();
            } else {
                task.prune_stale_notifications();
            }
            self.tasks.push(task);
        }

        tracing::info!(count = self.tasks.len(), "restored tasks");
        self.tasks.len()
    }

    /// Returns the identifier allocator.
    #[must_use]
    pub fn allocator(&self) -> &IdentityAllocator {
        &self.ids
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank or the deadline is
    /// before today.
    pub fn add(&mut self, request: NewTask) -> TaskServiceResult<Task> {
        let today = self.today();
        let id = TaskId::new(self.ids.watermark(EntityKind::Task));
        let task = Task::new(id, request, today)?;
        self.ids.next(EntityKind::Task);

        tracing::debug!(task_id = %id, name = task.name(), "added task");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Applies a change set to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or the validation error
    /// that rejected the change. A rejected update changes nothing.
    pub fn update(&mut self, id: TaskId, changes: TaskChanges) -> TaskServiceResult<Task> {
        let today = self.today();
        let task = task_mut(&mut self.tasks, id)?;
        let removed = task.apply_changes(changes, today)?;

        tracing::debug!(
            task_id = %id,
            state = %task.state(),
            removed_notifications = removed.len(),
            "updated task"
        );
        Ok(task.clone())
    }

    /// Deletes a task together with its notifications.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when no task has the
    /// identifier.
    pub fn delete(&mut self, id: TaskId) -> TaskServiceResult<Task> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        let task = self.tasks.remove(position);
        tracing::debug!(task_id = %id, "deleted task");
        Ok(task)
    }

    /// Schedules a notification on a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`], a validation error for a
    /// blank message or completed task, or an invalid notification date when
    /// the resolved date is outside `[today, deadline]`.
    pub fn add_notification(
        &mut self,
        task_id: TaskId,
        message: impl Into<String>,
        timing: NotificationTiming,
    ) -> TaskServiceResult<Notification> {
        let today = self.today();
        let task = task_mut(&mut self.tasks, task_id)?;
        let date = schedule::resolve_date(task, timing)?;
        let id = NotificationId::new(self.ids.watermark(EntityKind::Notification));
        let notification = Notification::new(id, message, date)?;
        task.add_notification(notification.clone(), today)?;
        self.ids.next(EntityKind::Notification);

        tracing::debug!(task_id = %task_id, notification_id = %id, %date, "added notification");
        Ok(notification)
    }

    /// Replaces the message and date of a notification, keeping its
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`],
    /// [`TaskServiceError::NotificationNotFound`], or the same validation
    /// failures as [`Self::add_notification`].
    pub fn update_notification(
        &mut self,
        task_id: TaskId,
        notification_id: NotificationId,
        message: impl Into<String>,
        timing: NotificationTiming,
    ) -> TaskServiceResult<Notification> {
        let today = self.today();
        let task = task_mut(&mut self.tasks, task_id)?;
        let date = schedule::resolve_date(task, timing)?;
        let updated = task
            .update_notification(notification_id, message, date, today)?
            .cloned()
            .ok_or(TaskServiceError::NotificationNotFound {
                task_id,
                notification_id,
            })?;

        tracing::debug!(task_id = %task_id, %notification_id, %date, "updated notification");
        Ok(updated)
    }

    /// Removes a notification from a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] or
    /// [`TaskServiceError::NotificationNotFound`].
    pub fn delete_notification(
        &mut self,
        task_id: TaskId,
        notification_id: NotificationId,
    ) -> TaskServiceResult<Notification> {
        let task = task_mut(&mut self.tasks, task_id)?;
        let removed = task.remove_notification(notification_id).ok_or(
            TaskServiceError::NotificationNotFound {
                task_id,
                notification_id,
            },
        )?;
        tracing::debug!(task_id = %task_id, %notification_id, "deleted notification");
        Ok(removed)
    }

    /// Returns the presets currently offered for a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`].
    pub fn available_presets(&self, task_id: TaskId) -> TaskServiceResult<PresetMenu> {
        let task = self.find(task_id).ok_or(TaskServiceError::TaskNotFound(task_id))?;
        Ok(schedule::available_presets(task, self.today()))
    }

    /// Returns the task with the given identifier.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns every task in store order.
    #[must_use]
    pub fn find_all(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the tasks matching `query`, in the requested order.
    #[must_use]
    pub fn search(&self, query: &TaskQuery) -> Vec<&Task> {
        let needle = query.name_pattern.to_lowercase();
        let mut matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| query.matches(task, &needle))
            .collect();

        match query.order {
            TaskOrder::Insertion => {}
            TaskOrder::Category => matches.sort_by_key(|task| task.category_id()),
            TaskOrder::Deadline => matches.sort_by_key(|task| task.deadline()),
            TaskOrder::Name => matches.sort_by_cached_key(|task| task.name().to_lowercase()),
        }
        matches
    }

    /// Applies the delay rule to every task and counts the collection.
    ///
    /// `due_soon` counts deadlines within `[today, today + due_soon_days]`,
    /// whatever the task state.
    pub fn summary(&mut self, due_soon_days: u32) -> TaskSummary {
        let today = self.today();
        self.refresh_delays_on(today);

        self.tasks
            .iter()
            .fold(TaskSummary::default(), |mut summary, task| {
                summary.total += 1;
                summary.completed += usize::from(task.is_completed());
                summary.delayed += usize::from(task.is_delayed());
                summary.due_soon += usize::from(task.is_due_within(today, due_soon_days));
                summary
            })
    }

    /// Applies the delay rule to every task.
    ///
    /// Returns the identifiers of tasks that became delayed.
    pub fn refresh_delays(&mut self) -> Vec<TaskId> {
        let today = self.today();
        self.refresh_delays_on(today)
    }

    /// Returns `true` when any task is delayed as of today, whether or not
    /// its state has been refreshed yet.
    #[must_use]
    pub fn has_delayed_tasks(&self) -> bool {
        let today = self.today();
        self.tasks
            .iter()
            .any(|task| task.state().delayed_as_of(task.deadline(), today).is_delayed())
    }

    /// Returns every notification with its owning task, in store order.
    #[must_use]
    pub fn notification_overview(&self) -> Vec<ScheduledNotification> {
        self.scheduled(|_| true)
    }

    /// Returns the notifications dated today or earlier.
    #[must_use]
    pub fn due_notifications(&self) -> Vec<ScheduledNotification> {
        let today = self.today();
        self.scheduled(|notification| notification.is_due(today))
    }

    /// Removes every task in `category_id`, returning them in store order.
    pub(crate) fn remove_by_category(&mut self, category_id: CategoryId) -> Vec<Task> {
        let (removed, kept): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.category_id() == category_id);
        self.tasks = kept;
        removed
    }

    /// Moves every task with `priority_id` to the default priority.
    pub(crate) fn reassign_priority(&mut self, priority_id: PriorityId) -> Vec<TaskId> {
        self.tasks
            .iter_mut()
            .filter(|task| task.priority_id() == priority_id)
            .map(|task| {
                task.reassign_priority(PriorityId::DEFAULT);
                task.id()
            })
            .collect()
    }

    fn refresh_delays_on(&mut self, today: NaiveDate) -> Vec<TaskId> {
        let delayed: Vec<TaskId> = self
            .tasks
            .iter_mut()
            .filter_map(|task| {
                (task.check_if_delayed(today) && task.is_delayed()).then_some(task.id())
            })
            .collect();
        if !delayed.is_empty() {
            tracing::info!(count = delayed.len(), "tasks became delayed");
        }
        delayed
    }

    fn scheduled(&self, keep: impl Fn(&Notification) -> bool) -> Vec<ScheduledNotification> {
        self.tasks
            .iter()
            .flat_map(|task| {
                task.notifications()
                    .iter()
                    .filter(|notification| keep(notification))
                    .map(|notification| ScheduledNotification {
                        task_id: task.id(),
                        task_name: task.name().to_owned(),
                        notification: notification.clone(),
                    })
            })
            .collect()
    }
}

fn task_mut(tasks: &mut [Task], id: TaskId) -> TaskServiceResult<&mut Task> {
    tasks
        .iter_mut()
        .find(|task| task.id() == id)
        .ok_or(TaskServiceError::TaskNotFound(id))
}
