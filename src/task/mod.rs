//! Task management.
//!
//! Tasks reference a category and a priority, own their notifications, and
//! become delayed automatically once their deadline passes. Removing a
//! category deletes its tasks; removing a priority reassigns them to the
//! default priority. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Stores and orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
