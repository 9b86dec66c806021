//! JSON file storage inside a capability directory.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io;
use uuid::Uuid;

use super::models::{CategoryRecord, PriorityRecord, TaskRecord};
use crate::config::StorageConfig;
use crate::task::{
    domain::{Category, PersistedTaskData, Priority, Task},
    ports::{StorageError, StorageResult, TaskStorage},
};

const TASKS: &str = "tasks";
const CATEGORIES: &str = "categories";
const PRIORITIES: &str = "priorities";

/// Stores each collection as a JSON array in its own file.
///
/// Saves write a uniquely named sibling file and rename it over the target,
/// so an interrupted or failed save never truncates the previous copy.
#[derive(Debug)]
pub struct JsonFileStorage {
    dir: Dir,
    config: StorageConfig,
}

impl JsonFileStorage {
    /// Opens (creating if necessary) the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the directory cannot be
    /// created or opened.
    pub fn open(config: StorageConfig) -> StorageResult<Self> {
        Dir::create_ambient_dir_all(&config.data_dir, ambient_authority())
            .map_err(StorageError::unavailable)?;
        let dir = Dir::open_ambient_dir(&config.data_dir, ambient_authority())
            .map_err(StorageError::unavailable)?;
        tracing::debug!(data_dir = %config.data_dir, "opened JSON task storage");
        Ok(Self { dir, config })
    }

    /// Returns the configuration the storage was opened with.
    #[must_use]
    pub const fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn read_collection<R: DeserializeOwned>(
        &self,
        file: &Utf8Path,
        collection: &'static str,
    ) -> StorageResult<Vec<R>> {
        let contents = match self.dir.read_to_string(file) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StorageError::io(collection, err)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents)
            .map_err(|err| StorageError::malformed(collection, err.to_string()))
    }

    fn write_collection<R: Serialize>(
        &self,
        file: &Utf8Path,
        collection: &'static str,
        records: &[R],
    ) -> StorageResult<()> {
        let payload = serde_json::to_string_pretty(records)
            .map_err(|err| StorageError::malformed(collection, err.to_string()))?;
        let staging = staging_path(file);

        let written = self
            .dir
            .write(&staging, payload)
            .and_then(|()| self.dir.rename(&staging, &self.dir, file));
        if let Err(err) = written {
            if let Err(cleanup) = self.dir.remove_file(&staging) {
                tracing::debug!(file = %staging, error = %cleanup, "staging file not removed");
            }
            return Err(StorageError::io(collection, err));
        }

        tracing::debug!(file = %file, count = records.len(), "saved {collection}");
        Ok(())
    }
}

fn staging_path(file: &Utf8Path) -> Utf8PathBuf {
    let name = file.file_name().unwrap_or("collection");
    file.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4()))
}

impl TaskStorage for JsonFileStorage {
    fn load_tasks(&self) -> StorageResult<Vec<PersistedTaskData>> {
        let records: Vec<TaskRecord> = self.read_collection(&self.config.tasks_file, TASKS)?;
        Ok(records.into_iter().map(PersistedTaskData::from).collect())
    }

    fn save_tasks(&self, tasks: &[Task]) -> StorageResult<()> {
        let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
        self.write_collection(&self.config.tasks_file, TASKS, &records)
    }

    fn load_categories(&self) -> StorageResult<Vec<Category>> {
        let records: Vec<CategoryRecord> =
            self.read_collection(&self.config.categories_file, CATEGORIES)?;
        Ok(records.into_iter().map(Category::from).collect())
    }

    fn save_categories(&self, categories: &[Category]) -> StorageResult<()> {
        let records: Vec<CategoryRecord> = categories.iter().map(CategoryRecord::from).collect();
        self.write_collection(&self.config.categories_file, CATEGORIES, &records)
    }

    fn load_priorities(&self) -> StorageResult<Vec<Priority>> {
        let records: Vec<PriorityRecord> =
            self.read_collection(&self.config.priorities_file, PRIORITIES)?;
        Ok(records.into_iter().map(Priority::from).collect())
    }

    fn save_priorities(&self, priorities: &[Priority]) -> StorageResult<()> {
        let records: Vec<PriorityRecord> = priorities.iter().map(PriorityRecord::from).collect();
        self.write_collection(&self.config.priorities_file, PRIORITIES, &records)
    }
}
