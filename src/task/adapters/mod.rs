//! Adapter implementations for task storage.

pub mod json;
pub mod memory;
