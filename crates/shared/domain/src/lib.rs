//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `strum`).
//! Keep it lean: no I/O, no randomness and no allocation logic, just data and simple helpers.
//!
//! * [`registrant`]: who signed up, with which role, leadership preference, proficiency,
//!   region and time slot.
//! * [`allocation`]: the shape of an allocation run (teams, standby, warnings).
//! * [`snapshot`]: an immutable copy of the roster as published by the registry.
//! * [`config`]: workspace configuration, deserialized by the kernel loader.

pub mod allocation;
pub mod config;
pub mod registrant;
pub mod snapshot;

pub use allocation::{AllocationResult, SlotAllocation, Team, Warning, WarningReason};
pub use registrant::{Leadership, Proficiency, Region, Registrant, Role, TimeSlot};
pub use snapshot::{RosterSnapshot, WindowOverride};
