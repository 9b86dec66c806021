//! Shared world state for notification BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskdesk::task::{
    adapters::memory::InMemoryTaskStorage,
    domain::{PresetMenu, Task, TaskId},
    services::{TaskServiceError, TaskSummary, TaskWorkspace},
};

use crate::test_helpers::{TestClock, date};

/// Workspace type used by the BDD world.
pub type TestWorkspace = TaskWorkspace<InMemoryTaskStorage, TestClock>;

/// Scenario world for notification behaviour tests.
pub struct NotificationWorld {
    pub clock: Arc<TestClock>,
    pub workspace: TestWorkspace,
    pub task_id: Option<TaskId>,
    pub last_menu: Option<PresetMenu>,
    pub last_error: Option<TaskServiceError>,
    pub last_summary: Option<TaskSummary>,
}

impl NotificationWorld {
    /// Creates a world over empty storage.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(TestClock::on(date(2025, 1, 1)));
        let workspace =
            TaskWorkspace::open(Arc::new(InMemoryTaskStorage::new()), Arc::clone(&clock));

        Self {
            clock,
            workspace,
            task_id: None,
            last_menu: None,
            last_error: None,
            last_summary: None,
        }
    }

    /// Returns the identifier of the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created yet.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Returns the current state of the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error if the task does not exist.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        let id = self.task_id()?;
        self.workspace
            .tasks()
            .find(id)
            .ok_or_else(|| eyre::eyre!("task {id} missing from workspace"))
    }
}

impl Default for NotificationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> NotificationWorld {
    NotificationWorld::default()
}
