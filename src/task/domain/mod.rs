//! Domain model for task and reminder management.
//!
//! Tasks own their notifications, reference a category and a priority, and
//! move through a small state machine whose only automatic transition is
//! driven by the calendar. Every temporal rule takes `today` as an argument;
//! nothing in the domain reads a clock.

mod allocator;
mod catalog;
mod error;
mod ids;
mod notification;
pub mod schedule;
mod state;
mod task;

pub use allocator::{EntityKind, IdentityAllocator};
pub use catalog::{CatalogEntry, CatalogKind, Category, Priority, normalized_label};
pub use error::{ErrorKind, ParseTaskStateError, TaskDomainError};
pub use ids::{CategoryId, NotificationId, PriorityId, SENTINEL_ID, TaskId};
pub use notification::{Notification, ScheduledNotification};
pub use schedule::{NotificationPreset, NotificationTiming, PresetMenu, PresetOption};
pub use state::TaskState;
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
