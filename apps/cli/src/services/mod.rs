//! Shared services of the command handlers.

pub mod context;
pub mod render;
