//! CLI data models.

pub mod args;
