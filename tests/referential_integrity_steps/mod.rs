//! Step definitions for referential integrity scenarios.

pub mod world;

mod given;
mod then;
