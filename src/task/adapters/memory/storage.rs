//! In-memory storage for tests and embedders without a durable store.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Category, PersistedTaskData, Priority, Task},
    ports::{StorageError, StorageResult, TaskStorage},
};

/// Thread-safe in-memory task storage.
///
/// Clones share the same collections, so a test can keep a handle and
/// inspect what a workspace saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStorage {
    state: Arc<RwLock<InMemoryStorageState>>,
}

#[derive(Debug, Default)]
struct InMemoryStorageState {
    tasks: Vec<PersistedTaskData>,
    categories: Vec<Category>,
    priorities: Vec<Priority>,
    save_count: usize,
}

impl InMemoryTaskStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-populated with the given collections.
    #[must_use]
    pub fn seeded(
        tasks: Vec<PersistedTaskData>,
        categories: Vec<Category>,
        priorities: Vec<Priority>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStorageState {
                tasks,
                categories,
                priorities,
                save_count: 0,
            })),
        }
    }

    /// Returns the stored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the lock is poisoned.
    pub fn stored_tasks(&self) -> StorageResult<Vec<PersistedTaskData>> {
        Ok(self.read()?.tasks.clone())
    }

    /// Returns the stored categories.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the lock is poisoned.
    pub fn stored_categories(&self) -> StorageResult<Vec<Category>> {
        Ok(self.read()?.categories.clone())
    }

    /// Returns the stored priorities.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the lock is poisoned.
    pub fn stored_priorities(&self) -> StorageResult<Vec<Priority>> {
        Ok(self.read()?.priorities.clone())
    }

    /// Returns how many collection saves have been performed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the lock is poisoned.
    pub fn save_count(&self) -> StorageResult<usize> {
        Ok(self.read()?.save_count)
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, InMemoryStorageState>> {
        self.state.read().map_err(poisoned)
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, InMemoryStorageState>> {
        self.state.write().map_err(poisoned)
    }
}

fn poisoned<T>(err: PoisonError<T>) -> StorageError {
    StorageError::unavailable(std::io::Error::other(err.to_string()))
}

impl TaskStorage for InMemoryTaskStorage {
    fn load_tasks(&self) -> StorageResult<Vec<PersistedTaskData>> {
        self.stored_tasks()
    }

    fn save_tasks(&self, tasks: &[Task]) -> StorageResult<()> {
        let mut state = self.write()?;
        state.tasks = tasks.iter().map(Task::to_persisted).collect();
        state.save_count += 1;
        Ok(())
    }

    fn load_categories(&self) -> StorageResult<Vec<Category>> {
        self.stored_categories()
    }

    fn save_categories(&self, categories: &[Category]) -> StorageResult<()> {
        let mut state = self.write()?;
        state.categories = categories.to_vec();
        state.save_count += 1;
        Ok(())
    }

    fn load_priorities(&self) -> StorageResult<Vec<Priority>> {
        self.stored_priorities()
    }

    fn save_priorities(&self, priorities: &[Priority]) -> StorageResult<()> {
        let mut state = self.write()?;
        state.priorities = priorities.to_vec();
        state.save_count += 1;
        Ok(())
    }
}
