//! The workspace aggregate: every store plus the storage they load from and
//! save to.

use super::{
    CategoryCascade, CategoryStore, PriorityCascade, PriorityStore, TaskQuery, TaskServiceError,
    TaskServiceResult, TaskStore, TaskSummary, integrity,
};
use crate::task::{
    domain::{
        CatalogKind, Category, CategoryId, NewTask, Notification, NotificationId,
        NotificationTiming, PresetMenu, Priority, PriorityId, Task, TaskChanges, TaskId,
    },
    ports::{StorageResult, TaskStorage},
};
use mockable::Clock;
use std::sync::Arc;

/// Owns the task, category and priority stores for one data set.
///
/// Collections are loaded once by [`Self::open`] and written back in one
/// batch by [`Self::save_all`]; individual commands never touch storage.
/// Commands return the updated entity so callers re-query instead of
/// sharing references into the stores.
#[derive(Debug)]
pub struct TaskWorkspace<S, C>
where
    S: TaskStorage,
    C: Clock + Send + Sync,
{
    storage: Arc<S>,
    tasks: TaskStore<C>,
    categories: CategoryStore,
    priorities: PriorityStore,
}

impl<S, C> TaskWorkspace<S, C>
where
    S: TaskStorage,
    C: Clock + Send + Sync,
{
    /// Loads every collection from `storage`.
    ///
    /// A collection that cannot be read or decoded is logged and replaced by
    /// its empty form: no tasks, or only the sentinel category or priority.
    /// Opening never fails.
    #[must_use]
    pub fn open(storage: Arc<S>, clock: Arc<C>) -> Self {
        let mut categories = CategoryStore::new();
        categories.load(recovered("categories", storage.load_categories()));

        let mut priorities = PriorityStore::new();
        priorities.load(recovered("priorities", storage.load_priorities()));

        let mut tasks = TaskStore::new(clock);
        tasks.load(recovered("tasks", storage.load_tasks()));

        Self {
            storage,
            tasks,
            categories,
            priorities,
        }
    }

    /// Writes each collection to storage, once per entity kind.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::task::ports::StorageError`]; collections
    /// after the failing one are not written.
    pub fn save_all(&self) -> StorageResult<()> {
        self.storage.save_categories(self.categories.find_all())?;
        self.storage.save_priorities(self.priorities.find_all())?;
        self.storage.save_tasks(self.tasks.find_all())?;
        tracing::info!(
            tasks = self.tasks.len(),
            categories = self.categories.find_all().len(),
            priorities = self.priorities.find_all().len(),
            "saved workspace"
        );
        Ok(())
    }

    /// Returns the task store.
    #[must_use]
    pub const fn tasks(&self) -> &TaskStore<C> {
        &self.tasks
    }

    /// Returns the category store.
    #[must_use]
    pub const fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    /// Returns the priority store.
    #[must_use]
    pub const fn priorities(&self) -> &PriorityStore {
        &self.priorities
    }

    /// Creates a task after checking its category and priority exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::CatalogEntryNotFound`] for an unknown
    /// reference, otherwise the errors of [`TaskStore::add`].
    pub fn add_task(&mut self, request: NewTask) -> TaskServiceResult<Task> {
        self.ensure_references(Some(request.category_id()), Some(request.priority_id()))?;
        self.tasks.add(request)
    }

    /// Updates a task after checking any new category or priority exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::CatalogEntryNotFound`] for an unknown
    /// reference, otherwise the errors of [`TaskStore::update`].
    pub fn update_task(&mut self, id: TaskId, changes: TaskChanges) -> TaskServiceResult<Task> {
        self.ensure_references(changes.category_id(), changes.priority_id())?;
        self.tasks.update(id, changes)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`].
    pub fn delete_task(&mut self, id: TaskId) -> TaskServiceResult<Task> {
        self.tasks.delete(id)
    }

    /// Schedules a notification on a task.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::add_notification`].
    pub fn add_notification(
        &mut self,
        task_id: TaskId,
        message: impl Into<String>,
        timing: NotificationTiming,
    ) -> TaskServiceResult<Notification> {
        self.tasks.add_notification(task_id, message, timing)
    }

    /// Reschedules a notification.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::update_notification`].
    pub fn update_notification(
        &mut self,
        task_id: TaskId,
        notification_id: NotificationId,
        message: impl Into<String>,
        timing: NotificationTiming,
    ) -> TaskServiceResult<Notification> {
        self.tasks
            .update_notification(task_id, notification_id, message, timing)
    }

    /// Removes a notification.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::delete_notification`].
    pub fn delete_notification(
        &mut self,
        task_id: TaskId,
        notification_id: NotificationId,
    ) -> TaskServiceResult<Notification> {
        self.tasks.delete_notification(task_id, notification_id)
    }

    /// Returns the presets currently offered for a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`].
    pub fn available_presets(&self, task_id: TaskId) -> TaskServiceResult<PresetMenu> {
        self.tasks.available_presets(task_id)
    }

    /// Returns the tasks matching `query`.
    #[must_use]
    pub fn search(&self, query: &TaskQuery) -> Vec<&Task> {
        self.tasks.search(query)
    }

    /// Refreshes delays and counts tasks. See [`TaskStore::summary`].
    pub fn summary(&mut self, due_soon_days: u32) -> TaskSummary {
        self.tasks.summary(due_soon_days)
    }

    /// Applies the delay rule to every task. See [`TaskStore::refresh_delays`].
    pub fn refresh_delays(&mut self) -> Vec<TaskId> {
        self.tasks.refresh_delays()
    }

    /// Adds a category.
    ///
    /// # Errors
    ///
    /// See [`CategoryStore::add`](super::CatalogStore::add).
    pub fn add_category(&mut self, name: impl Into<String>) -> TaskServiceResult<Category> {
        self.categories.add(name)
    }

    /// Renames a category.
    ///
    /// # Errors
    ///
    /// See [`CategoryStore::rename`](super::CatalogStore::rename).
    pub fn rename_category(
        &mut self,
        id: CategoryId,
        name: impl Into<String>,
    ) -> TaskServiceResult<Category> {
        self.categories.rename(id, name)
    }

    /// Deletes a category together with its tasks.
    ///
    /// # Errors
    ///
    /// See [`integrity::delete_category`].
    pub fn delete_category(&mut self, id: CategoryId) -> TaskServiceResult<CategoryCascade> {
        integrity::delete_category(&mut self.categories, &mut self.tasks, id)
    }

    /// Adds a priority.
    ///
    /// # Errors
    ///
    /// See [`PriorityStore::add`](super::CatalogStore::add).
    pub fn add_priority(&mut self, level: impl Into<String>) -> TaskServiceResult<Priority> {
        self.priorities.add(level)
    }

    /// Changes the level of a priority.
    ///
    /// # Errors
    ///
    /// See [`PriorityStore::rename`](super::CatalogStore::rename).
    pub fn rename_priority(
        &mut self,
        id: PriorityId,
        level: impl Into<String>,
    ) -> TaskServiceResult<Priority> {
        self.priorities.rename(id, level)
    }

    /// Deletes a priority and moves its tasks to the default priority.
    ///
    /// # Errors
    ///
    /// See [`integrity::delete_priority`].
    pub fn delete_priority(&mut self, id: PriorityId) -> TaskServiceResult<PriorityCascade> {
        integrity::delete_priority(&mut self.priorities, &mut self.tasks, id)
    }

    fn ensure_references(
        &self,
        category_id: Option<CategoryId>,
        priority_id: Option<PriorityId>,
    ) -> TaskServiceResult<()> {
        if let Some(id) = category_id.filter(|id| !self.categories.contains(*id)) {
            return Err(TaskServiceError::CatalogEntryNotFound {
                kind: CatalogKind::Category,
                id: id.value(),
            });
        }
        if let Some(id) = priority_id.filter(|id| !self.priorities.contains(*id)) {
            return Err(TaskServiceError::CatalogEntryNotFound {
                kind: CatalogKind::Priority,
                id: id.value(),
            });
        }
        Ok(())
    }
}

fn recovered<T>(collection: &'static str, loaded: StorageResult<Vec<T>>) -> Vec<T> {
    loaded.unwrap_or_else(|err| {
        tracing::warn!(collection, error = %err, "falling back to an empty collection");
        Vec::new()
    })
}
