//! One module per command group.

pub mod assign;
pub mod roster;
pub mod window;
