//! # Roster
//!
//! Splits registrants into teams. The input is grouped by time slot ([`pool::partition`]) and
//! every pool is allocated independently ([`allocate_pool`]) into full teams of
//! `team_size`, a standby group and domestic-region warnings.
//!
//! Allocation is pure: the input is never mutated and nothing is shared between calls. The only
//! non-determinism is the shuffling, which comes from the supplied RNG; pass a seeded one to
//! [`assign_with_rng`] for reproducible output.
//!
//! ```rust
//! use rally_domain::{Registrant, Role};
//!
//! let roster: Vec<Registrant> = (0..23)
//!     .map(|i| {
//!         let role = if i < 5 { Role::Healer } else { Role::Ranged };
//!         Registrant::new(format!("player-{i}"), "国内周一晚6:30").with_role(role)
//!     })
//!     .collect();
//!
//! let result = rally_roster::assign(&roster);
//! let slot = result.slot("国内周一晚6:30").unwrap();
//!
//! assert_eq!(slot.teams.len(), 2);
//! assert_eq!(slot.standby.len(), 3);
//! assert!(slot.teams.iter().all(|team| team.healer_count() >= 1));
//! ```

mod allocator;
pub mod pool;

pub use crate::allocator::allocate_pool;

use rally_domain::AllocationResult;
use rally_domain::Registrant;
use rally_domain::config::RosterRules;
use rand::Rng;

/// Allocates every time slot with the default rules and the thread-local RNG.
#[must_use]
pub fn assign(registrants: &[Registrant]) -> AllocationResult {
    assign_with(registrants, &RosterRules::default())
}

/// Allocates every time slot with `rules` and the thread-local RNG.
#[must_use]
pub fn assign_with(registrants: &[Registrant], rules: &RosterRules) -> AllocationResult {
    assign_with_rng(registrants, rules, &mut rand::rng())
}

/// Allocates every time slot with `rules`, drawing every shuffle from `rng`.
///
/// Slots appear in configured order followed by unconfigured ones in first-seen order; empty
/// slots produce no entry.
pub fn assign_with_rng<R>(
    registrants: &[Registrant],
    rules: &RosterRules,
    rng: &mut R,
) -> AllocationResult
where
    R: Rng + ?Sized,
{
    let slots: Vec<_> = pool::partition(registrants, &rules.time_slots)
        .iter()
        .map(|pool| allocate_pool(&pool.time_slot, &pool.members, rules, rng))
        .filter(|slot| !slot.is_empty())
        .collect();

    tracing::debug!(
        registrants = registrants.len(),
        slots = slots.len(),
        "Allocation finished"
    );

    AllocationResult { slots }
}
