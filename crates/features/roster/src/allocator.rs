//! Per-pool team allocation.
//!
//! One pool is split into `floor(len / team_size)` full teams plus a standby group, in five
//! passes that each see the previous ones' placements:
//!
//! 1. team count,
//! 2. healer distribution (shuffled, two passes),
//! 3. one leader for every full team that has none,
//! 4. stratified round-robin fill of the remaining members by proficiency,
//! 5. domestic-region warnings.
//!
//! Overflow healers and leaders are parked in standby. When that leaves a full team short after
//! the fill, the team is topped up from the back of standby before warnings are computed, so a
//! full team always ends with exactly `team_size` members.

use fxhash::FxHashSet;
use rally_domain::config::RosterRules;
use rally_domain::{
    Leadership, Proficiency, Registrant, SlotAllocation, Team, TimeSlot, Warning, WarningReason,
};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use strum::IntoEnumIterator;
use tracing::debug;

/// Working state of one allocation: seats hold pool positions, the last seat is standby.
struct Placement<'p, 'r> {
    pool: &'p [&'r Registrant],
    seats: Vec<Vec<usize>>,
    placed: FxHashSet<usize>,
    team_size: usize,
}

impl<'p, 'r> Placement<'p, 'r> {
    fn new(pool: &'p [&'r Registrant], full_teams: usize, team_size: usize) -> Self {
        let mut seats = Vec::with_capacity(full_teams + 1);
        seats.resize_with(full_teams, || Vec::with_capacity(team_size));
        seats.push(Vec::new());

        Self { pool, seats, placed: FxHashSet::default(), team_size }
    }

    const fn full_teams(&self) -> usize {
        self.seats.len() - 1
    }

    const fn standby(&self) -> usize {
        self.seats.len() - 1
    }

    fn is_placed(&self, member: usize) -> bool {
        self.placed.contains(&member)
    }

    fn is_full(&self, seat: usize) -> bool {
        seat != self.standby() && self.seats[seat].len() >= self.team_size
    }

    /// Places `member` into `seat` unless it is already seated somewhere.
    fn place(&mut self, seat: usize, member: usize) {
        if self.placed.insert(member) {
            self.seats[seat].push(member);
        }
    }

    fn healers_in(&self, seat: usize) -> usize {
        self.seats[seat].iter().filter(|&&m| self.pool[m].is_healer()).count()
    }

    fn has_leader(&self, seat: usize) -> bool {
        self.seats[seat].iter().any(|&m| self.pool[m].can_lead())
    }

    fn unplaced(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.pool.len()).filter(|m| !self.is_placed(*m))
    }

    /// Unplaced members matching `filter`, shuffled into a queue.
    fn shuffled_queue<R, F>(&self, rng: &mut R, filter: F) -> VecDeque<usize>
    where
        R: Rng + ?Sized,
        F: Fn(&Registrant) -> bool,
    {
        let mut members: Vec<usize> = self.unplaced().filter(|&m| filter(self.pool[m])).collect();
        members.shuffle(rng);
        members.into()
    }

    /// First unplaced member, in pool order, of the highest proficiency tier still available.
    fn most_proficient_unplaced(&self) -> Option<usize> {
        Proficiency::iter()
            .rev()
            .find_map(|tier| self.unplaced().find(|&m| self.pool[m].proficiency == tier))
    }

    fn into_allocation(self, time_slot: &TimeSlot, rules: &RosterRules) -> SlotAllocation {
        let Self { pool, mut seats, .. } = self;
        let team = |seat: Vec<usize>| -> Team { seat.into_iter().map(|m| pool[m].clone()).collect() };

        let standby = team(seats.pop().unwrap_or_default());
        let teams: Vec<Team> = seats.into_iter().map(team).collect();
        let warnings = warnings(time_slot, &teams, &standby, rules.min_domestic_per_team);

        SlotAllocation { time_slot: time_slot.clone(), teams, standby, warnings }
    }
}

/// Allocates a single time slot's pool into full teams, standby and warnings.
///
/// Never fails and never mutates `pool`. Members are identified by their position in `pool`, so
/// entries that happen to share an id are still placed exactly once each.
///
/// # Examples
/// ```rust
/// use rally_domain::config::RosterRules;
/// use rally_domain::{Registrant, TimeSlot};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let slot = TimeSlot::new("国内周一晚6:30");
/// let roster: Vec<Registrant> = (0..23).map(|i| Registrant::new(format!("p{i}"), slot.clone())).collect();
/// let pool: Vec<&Registrant> = roster.iter().collect();
///
/// let allocation = rally_roster::allocate_pool(
///     &slot,
///     &pool,
///     &RosterRules::default(),
///     &mut StdRng::seed_from_u64(7),
/// );
///
/// assert_eq!(allocation.teams.len(), 2);
/// assert_eq!(allocation.standby.len(), 3);
/// ```
pub fn allocate_pool<R>(
    time_slot: &TimeSlot,
    pool: &[&Registrant],
    rules: &RosterRules,
    rng: &mut R,
) -> SlotAllocation
where
    R: Rng + ?Sized,
{
    let team_size = rules.team_size.max(1);
    let full_teams = pool.len() / team_size;

    if full_teams == 0 {
        debug!(time_slot = %time_slot, pool = pool.len(), "Pool smaller than one team, all on standby");
        return SlotAllocation {
            time_slot: time_slot.clone(),
            teams: Vec::new(),
            standby: pool.iter().map(|&r| r.clone()).collect(),
            warnings: Vec::new(),
        };
    }

    let mut placement = Placement::new(pool, full_teams, team_size);

    distribute_healers(&mut placement, rules.healers_per_team, rng);
    assign_leaders(&mut placement, rng);
    fill_remaining(&mut placement, rng);
    top_up_from_standby(&mut placement);

    let allocation = placement.into_allocation(time_slot, rules);
    debug!(
        time_slot = %time_slot,
        teams = allocation.teams.len(),
        standby = allocation.standby.len(),
        warnings = allocation.warnings.len(),
        "Pool allocated"
    );
    allocation
}

/// One healer per seat (standby included) in shuffled order, then leftovers: standby until it
/// holds `per_team`, otherwise a random full team still below `per_team`, otherwise standby.
fn distribute_healers<R>(placement: &mut Placement<'_, '_>, per_team: usize, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let mut healers = placement.shuffled_queue(rng, Registrant::is_healer);
    let total = healers.len();

    for seat in 0..placement.seats.len() {
        let Some(healer) = healers.pop_front() else {
            break;
        };
        placement.place(seat, healer);
    }

    if healers.is_empty() {
        debug!(healers = total, "Healers distributed in a single pass");
        return;
    }

    let mut needing: Vec<usize> = (0..placement.full_teams())
        .filter(|&team| placement.healers_in(team) < per_team && !placement.is_full(team))
        .collect();
    needing.shuffle(rng);
    let mut needing = VecDeque::from(needing);

    let standby = placement.standby();
    for healer in healers {
        let seat = if placement.healers_in(standby) < per_team {
            standby
        } else {
            needing.pop_front().unwrap_or(standby)
        };
        placement.place(seat, healer);
    }

    debug!(healers = total, "Healers distributed in two passes");
}

/// Gives every full team without a willing or semi-willing member one leader, in team order.
fn assign_leaders<R>(placement: &mut Placement<'_, '_>, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let mut willing = placement.shuffled_queue(rng, |r| r.leadership == Leadership::Willing);
    let mut semi = placement.shuffled_queue(rng, |r| r.leadership == Leadership::SemiWilling);
    let mut fallbacks = 0_usize;

    for team in 0..placement.full_teams() {
        if placement.has_leader(team) || placement.is_full(team) {
            continue;
        }

        let leader = willing.pop_front().or_else(|| semi.pop_front()).or_else(|| {
            fallbacks += 1;
            placement.most_proficient_unplaced()
        });

        if let Some(leader) = leader {
            placement.place(team, leader);
        }
    }

    let standby = placement.standby();
    let parked = willing.len() + semi.len();
    for member in willing.into_iter().chain(semi) {
        placement.place(standby, member);
    }

    debug!(fallbacks, parked, "Leaders assigned");
}

/// Interleaves the remaining members by proficiency tier and fills full teams in order.
fn fill_remaining<R>(placement: &mut Placement<'_, '_>, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let mut tiers: Vec<VecDeque<usize>> = Proficiency::iter()
        .map(|tier| placement.shuffled_queue(rng, |r| r.proficiency == tier))
        .collect();

    let mut sequence = VecDeque::with_capacity(tiers.iter().map(VecDeque::len).sum());
    while tiers.iter().any(|tier| !tier.is_empty()) {
        sequence.extend(tiers.iter_mut().filter_map(VecDeque::pop_front));
    }

    for team in 0..placement.full_teams() {
        while !placement.is_full(team) {
            let Some(member) = sequence.pop_front() else {
                break;
            };
            placement.place(team, member);
        }
    }

    let standby = placement.standby();
    for member in sequence {
        placement.place(standby, member);
    }
}

/// Moves members from the back of standby into any full team left short by overflow parking.
fn top_up_from_standby(placement: &mut Placement<'_, '_>) {
    let standby = placement.standby();
    let mut moved = 0_usize;

    for team in 0..placement.full_teams() {
        while !placement.is_full(team) {
            let Some(member) = placement.seats[standby].pop() else {
                break;
            };
            placement.seats[team].push(member);
            moved += 1;
        }
    }

    if moved > 0 {
        debug!(moved, "Short teams topped up from standby");
    }
}

fn warnings(time_slot: &TimeSlot, teams: &[Team], standby: &Team, minimum: usize) -> Vec<Warning> {
    let warning = |team_index| Warning {
        time_slot: time_slot.clone(),
        team_index,
        reason: WarningReason::MissingDomestic,
    };

    let mut warnings: Vec<Warning> = teams
        .iter()
        .enumerate()
        .filter(|(_, team)| team.domestic_count() < minimum)
        .map(|(index, _)| warning(index))
        .collect();

    if !standby.is_empty() && standby.domestic_count() < minimum {
        warnings.push(warning(teams.len()));
    }

    warnings
}
