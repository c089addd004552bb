use fxhash::FxHashMap;
use rally_domain::config::RosterRules;
use rally_domain::{Proficiency, Region, Registrant, Role, TimeSlot};
use serde::Serialize;
use strum::IntoEnumIterator;

/// Headcount split the way the allocator will split it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStats {
    pub total: usize,
    /// Registrants that fit into full teams.
    pub assignable: usize,
    /// Registrants left over after the full teams.
    pub standby: usize,
    pub full_teams: usize,
}

impl RosterStats {
    #[must_use]
    pub const fn from_count(total: usize, team_size: usize) -> Self {
        let team_size = if team_size == 0 { 1 } else { team_size };
        let full_teams = total / team_size;
        Self { total, assignable: full_teams * team_size, standby: total % team_size, full_teams }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStats {
    pub time_slot: TimeSlot,
    pub stats: RosterStats,
}

/// Overview of the whole roster.
///
/// Every configured slot is listed, even when empty; unconfigured slots follow in first-seen
/// order. Breakdowns list every enum value in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    pub overall: RosterStats,
    pub slots: Vec<SlotStats>,
    pub roles: Vec<(Role, usize)>,
    pub proficiencies: Vec<(Proficiency, usize)>,
    pub regions: Vec<(Region, usize)>,
}

impl RosterSummary {
    #[must_use]
    pub fn slot(&self, time_slot: &str) -> Option<&RosterStats> {
        self.slots.iter().find(|s| s.time_slot.as_str() == time_slot).map(|s| &s.stats)
    }
}

#[must_use]
pub fn summarize(registrants: &[Registrant], rules: &RosterRules) -> RosterSummary {
    let mut labels: Vec<TimeSlot> = Vec::new();
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();

    let configured = rules.time_slots.iter().map(String::as_str);
    let seen = registrants.iter().map(|r| r.time_slot.as_str());
    for label in configured.chain(seen) {
        if !counts.contains_key(label) {
            counts.insert(label, 0);
            labels.push(TimeSlot::new(label));
        }
    }
    for registrant in registrants {
        *counts.entry(registrant.time_slot.as_str()).or_default() += 1;
    }

    let slots = labels
        .into_iter()
        .map(|time_slot| {
            let total = counts.get(time_slot.as_str()).copied().unwrap_or_default();
            SlotStats { stats: RosterStats::from_count(total, rules.team_size), time_slot }
        })
        .collect();

    RosterSummary {
        overall: RosterStats::from_count(registrants.len(), rules.team_size),
        slots,
        roles: breakdown(registrants, |r| r.role),
        proficiencies: breakdown(registrants, |r| r.proficiency),
        regions: breakdown(registrants, |r| r.region),
    }
}

fn breakdown<E>(registrants: &[Registrant], key: impl Fn(&Registrant) -> E) -> Vec<(E, usize)>
where
    E: IntoEnumIterator + PartialEq,
{
    E::iter()
        .map(|value| {
            let count = registrants.iter().filter(|r| key(r) == value).count();
            (value, count)
        })
        .collect()
}
