//! Referential Integrity Manager.
//!
//! Category and priority removal propagate onto tasks asymmetrically:
//! removing a category deletes its tasks, while removing a priority moves
//! its tasks to the default priority and deletes none of them.

use super::{CategoryStore, PriorityStore, TaskServiceResult, TaskStore};
use crate::task::domain::{Category, CategoryId, Priority, PriorityId, Task, TaskId};
use mockable::Clock;

/// Outcome of removing a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCascade {
    /// The removed category.
    pub category: Category,
    /// Tasks deleted with it, in former store order.
    pub deleted_tasks: Vec<Task>,
}

/// Outcome of removing a priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityCascade {
    /// The removed priority.
    pub priority: Priority,
    /// Tasks moved to the default priority.
    pub reassigned_tasks: Vec<TaskId>,
}

/// Removes a category and every task filed under it.
///
/// # Errors
///
/// Returns [`super::TaskServiceError::ProtectedEntry`] for the
/// uncategorized sentinel or
/// [`super::TaskServiceError::CatalogEntryNotFound`] for an unknown
/// category. Tasks are untouched on failure.
pub fn delete_category<C>(
    categories: &mut CategoryStore,
    tasks: &mut TaskStore<C>,
    id: CategoryId,
) -> TaskServiceResult<CategoryCascade>
where
    C: Clock + Send + Sync,
{
    let category = categories.remove(id)?;
    let deleted_tasks = tasks.remove_by_category(id);
    tracing::info!(
        category_id = %id,
        deleted_tasks = deleted_tasks.len(),
        "deleted category and its tasks"
    );
    Ok(CategoryCascade {
        category,
        deleted_tasks,
    })
}

/// Removes a priority and moves its tasks to the default priority.
///
/// # Errors
///
/// Returns [`super::TaskServiceError::ProtectedEntry`] for the default
/// sentinel or [`super::TaskServiceError::CatalogEntryNotFound`] for an
/// unknown priority. Tasks are untouched on failure.
pub fn delete_priority<C>(
    priorities: &mut PriorityStore,
    tasks: &mut TaskStore<C>,
    id: PriorityId,
) -> TaskServiceResult<PriorityCascade>
where
    C: Clock + Send + Sync,
{
    let priority = priorities.remove(id)?;
    let reassigned_tasks = tasks.reassign_priority(id);
    tracing::info!(
        priority_id = %id,
        reassigned_tasks = reassigned_tasks.len(),
        "deleted priority and reassigned its tasks"
    );
    Ok(PriorityCascade {
        priority,
        reassigned_tasks,
    })
}
