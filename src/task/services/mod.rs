//! Application services: the task and catalog stores, cascades between
//! them, and the workspace that loads and saves them as one unit.

mod catalog;
mod error;
pub mod integrity;
mod store;
mod workspace;

pub use catalog::{CatalogStore, CategoryStore, PriorityStore};
pub use error::{TaskServiceError, TaskServiceResult};
pub use integrity::{CategoryCascade, PriorityCascade};
pub use store::{TaskOrder, TaskQuery, TaskStore, TaskSummary};
pub use workspace::TaskWorkspace;
