//! Allocation output model.
//!
//! These values are produced fresh by every allocation run and are never persisted.

use crate::registrant::{Registrant, TimeSlot};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

/// An order-irrelevant group of registrants. Full teams hold exactly `team_size` members;
/// the standby group holds whatever is left over.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    members: Vec<Registrant>,
}

impl Team {
    #[must_use]
    pub const fn new(members: Vec<Registrant>) -> Self {
        Self { members }
    }

    #[must_use]
    pub fn members(&self) -> &[Registrant] {
        &self.members
    }

    #[must_use]
    pub fn into_members(self) -> Vec<Registrant> {
        self.members
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Registrant> {
        self.members.iter()
    }

    #[must_use]
    pub fn healer_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_healer()).count()
    }

    #[must_use]
    pub fn domestic_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_domestic()).count()
    }

    #[must_use]
    pub fn has_leader(&self) -> bool {
        self.members.iter().any(Registrant::can_lead)
    }

    /// The member shown as the team's commander: the first willing or semi-willing member.
    #[must_use]
    pub fn leader(&self) -> Option<&Registrant> {
        self.members.iter().find(|m| m.can_lead())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m.id == id)
    }
}

impl<'a> IntoIterator for &'a Team {
    type Item = &'a Registrant;
    type IntoIter = std::slice::Iter<'a, Registrant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl FromIterator<Registrant> for Team {
    fn from_iter<I: IntoIterator<Item = Registrant>>(iter: I) -> Self {
        Self { members: iter.into_iter().collect() }
    }
}

/// Why a team was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WarningReason {
    /// Fewer domestic-region members than the configured minimum.
    MissingDomestic,
}

/// A flag raised against one team of one time slot.
///
/// `team_index` equal to the number of full teams designates the standby group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub time_slot: TimeSlot,
    pub team_index: usize,
    pub reason: WarningReason,
}

/// Allocation of a single time slot's pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAllocation {
    pub time_slot: TimeSlot,
    pub teams: Vec<Team>,
    pub standby: Team,
    pub warnings: Vec<Warning>,
}

impl SlotAllocation {
    /// Index used by warnings that refer to the standby group.
    #[must_use]
    pub const fn standby_index(&self) -> usize {
        self.teams.len()
    }

    #[must_use]
    pub fn total_members(&self) -> usize {
        self.teams.iter().map(Team::len).sum::<usize>() + self.standby.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty() && self.standby.is_empty()
    }

    #[must_use]
    pub fn has_warning(&self, team_index: usize) -> bool {
        self.warnings.iter().any(|w| w.team_index == team_index)
    }
}

/// Result of one allocation run: one entry per non-empty time slot.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub slots: Vec<SlotAllocation>,
}

impl AllocationResult {
    /// All warnings across every slot, in slot order.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.slots.iter().flat_map(|s| s.warnings.iter())
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.slots.iter().map(|s| s.warnings.len()).sum()
    }

    #[must_use]
    pub fn has_warning(&self, time_slot: &str, team_index: usize) -> bool {
        self.warnings().any(|w| w.time_slot.as_str() == time_slot && w.team_index == team_index)
    }

    #[must_use]
    pub fn slot(&self, time_slot: &str) -> Option<&SlotAllocation> {
        self.slots.iter().find(|s| s.time_slot.as_str() == time_slot)
    }

    #[must_use]
    pub fn total_members(&self) -> usize {
        self.slots.iter().map(SlotAllocation::total_members).sum()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
