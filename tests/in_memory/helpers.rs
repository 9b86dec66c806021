//! Shared fixtures for in-memory workspace integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::fixture;
use taskdesk::task::{adapters::memory::InMemoryTaskStorage, services::TaskWorkspace};

use crate::test_helpers::{TestClock, date, init_test_logging};

/// Workspace type exercised by these tests.
pub type Workspace = TaskWorkspace<InMemoryTaskStorage, TestClock>;

/// Calendar date every test starts on.
pub fn start_date() -> NaiveDate {
    date(2025, 1, 1)
}

/// Everything a test needs to drive and inspect a workspace.
pub struct Harness {
    /// Backing storage, shared with the workspace.
    pub storage: InMemoryTaskStorage,
    /// Clock the workspace reads "today" from.
    pub clock: Arc<TestClock>,
    /// Workspace under test.
    pub workspace: Workspace,
}

/// Opens another workspace over the same storage and clock.
pub fn reopen(storage: &InMemoryTaskStorage, clock: &Arc<TestClock>) -> Workspace {
    TaskWorkspace::open(Arc::new(storage.clone()), Arc::clone(clock))
}

/// Provides a workspace over empty storage.
#[fixture]
pub fn harness() -> Harness {
    init_test_logging();
    let storage = InMemoryTaskStorage::new();
    let clock = Arc::new(TestClock::on(start_date()));
    let workspace = TaskWorkspace::open(Arc::new(storage.clone()), Arc::clone(&clock));
    Harness {
        storage,
        clock,
        workspace,
    }
}
