//! Step definitions for notification scheduling scenarios.

pub mod world;

mod then;
mod when;
