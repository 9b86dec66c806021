//! Shared world state for referential integrity BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskdesk::task::{
    adapters::memory::InMemoryTaskStorage,
    domain::{CategoryId, PriorityId, Task},
    services::{TaskServiceError, TaskWorkspace},
};

use crate::test_helpers::{TestClock, date};

/// Workspace type used by the BDD world.
pub type TestWorkspace = TaskWorkspace<InMemoryTaskStorage, TestClock>;

/// Scenario world for cascade behaviour tests.
pub struct IntegrityWorld {
    pub workspace: TestWorkspace,
    pub reassigned: Option<usize>,
    pub last_error: Option<TaskServiceError>,
}

impl IntegrityWorld {
    /// Creates a world over empty storage.
    #[must_use]
    pub fn new() -> Self {
        let workspace = TaskWorkspace::open(
            Arc::new(InMemoryTaskStorage::new()),
            Arc::new(TestClock::on(date(2025, 1, 1))),
        );
        Self {
            workspace,
            reassigned: None,
            last_error: None,
        }
    }

    /// Finds a task by its exact name.
    #[must_use]
    pub fn task_named(&self, name: &str) -> Option<&Task> {
        self.workspace
            .tasks()
            .find_all()
            .iter()
            .find(|task| task.name() == name)
    }

    /// Resolves a category name to its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no category has the name.
    pub fn category(&self, name: &str) -> Result<CategoryId, eyre::Report> {
        self.workspace
            .categories()
            .id_of(name)
            .ok_or_else(|| eyre::eyre!("unknown category {name:?} in scenario"))
    }

    /// Resolves a priority level to its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no priority has the level.
    pub fn priority(&self, level: &str) -> Result<PriorityId, eyre::Report> {
        self.workspace
            .priorities()
            .id_of(level)
            .ok_or_else(|| eyre::eyre!("unknown priority {level:?} in scenario"))
    }
}

impl Default for IntegrityWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> IntegrityWorld {
    IntegrityWorld::default()
}
