//! Taskdesk: a personal task list manager.
//!
//! Tasks carry a deadline, a category, a priority, a lifecycle state, and
//! dated reminder notifications. The crate keeps the collections in memory,
//! enforces their invariants, and loads and saves them through a storage
//! port.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: entities, the state machine and notification scheduling,
//!   with "today" passed in rather than read
//! - **Ports**: the storage trait the services depend on
//! - **Adapters**: in-memory and JSON file storage
//! - **Services**: task and catalog stores, cascades, and the workspace
//!
//! # Modules
//!
//! - [`task`]: the task management bounded context
//! - [`config`]: runtime configuration
//! - [`logging`]: tracing subscriber bootstrap

pub mod config;
pub mod logging;
pub mod task;
