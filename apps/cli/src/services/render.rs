//! Plain-text views of the roster and of allocation results.

use rally_domain::{AllocationResult, Registrant, SlotAllocation, Team, WarningReason};
use rally_registry::{RegistrationStatus, RosterSummary, StatusSource};
use std::fmt::Write;

/// One registrant per line: id, role, leadership, proficiency, region, time slot.
pub fn registrant_line(registrant: &Registrant) -> String {
    format!(
        "{:<20} {:<7} {:<13} {:<14} {:<14} {}",
        registrant.id,
        registrant.role,
        registrant.leadership,
        registrant.proficiency,
        registrant.region,
        registrant.time_slot
    )
}

pub fn registrants<'a>(registrants: impl IntoIterator<Item = &'a Registrant>) -> String {
    let mut out = String::new();
    for registrant in registrants {
        let _ = writeln!(out, "{}", registrant_line(registrant));
    }
    if out.is_empty() {
        out.push_str("No registrants\n");
    }
    out
}

pub fn status(status: RegistrationStatus) -> String {
    let state = if status.open { "open" } else { "closed" };
    let source = match status.source {
        StatusSource::Automatic => "weekly schedule",
        StatusSource::Override => "administrator override",
    };
    format!("Registration is {state} ({source})")
}

pub fn summary(summary: &RosterSummary) -> String {
    let mut out = String::new();
    let overall = summary.overall;
    let _ = writeln!(
        out,
        "Total {}: {} in {} full teams, {} on standby",
        overall.total, overall.assignable, overall.full_teams, overall.standby
    );

    for slot in &summary.slots {
        let stats = slot.stats;
        let _ = writeln!(
            out,
            "  {}: {} registered, {} teams, {} standby",
            slot.time_slot, stats.total, stats.full_teams, stats.standby
        );
    }

    let _ = writeln!(out, "Roles: {}", counts(&summary.roles));
    let _ = writeln!(out, "Proficiency: {}", counts(&summary.proficiencies));
    let _ = writeln!(out, "Regions: {}", counts(&summary.regions));
    out
}

fn counts<E: std::fmt::Display>(counts: &[(E, usize)]) -> String {
    counts.iter().map(|(value, n)| format!("{value} {n}")).collect::<Vec<_>>().join(", ")
}

pub fn allocation(result: &AllocationResult) -> String {
    if result.is_empty() {
        return "No registrants to assign\n".to_owned();
    }

    let mut out = String::new();
    for slot in &result.slots {
        slot_allocation(&mut out, slot);
    }
    let _ = writeln!(out, "Warnings: {}", result.warning_count());
    out
}

fn slot_allocation(out: &mut String, slot: &SlotAllocation) {
    let _ = writeln!(out, "== {} ==", slot.time_slot);

    for (index, team) in slot.teams.iter().enumerate() {
        let title = format!("Team {}", index + 1);
        group(out, &title, team, slot, index);
    }

    if !slot.standby.is_empty() {
        group(out, "Standby", &slot.standby, slot, slot.standby_index());
    }
    out.push('\n');
}

fn group(out: &mut String, title: &str, team: &Team, slot: &SlotAllocation, index: usize) {
    let leader = team.leader().map_or("none", |l| l.id.as_str());
    let _ = writeln!(
        out,
        "{title} ({} members, {} healers, leader: {leader})",
        team.len(),
        team.healer_count()
    );

    for warning in slot.warnings.iter().filter(|w| w.team_index == index) {
        let _ = writeln!(out, "  ! {}", warning_text(warning.reason));
    }
    for member in team {
        let _ = writeln!(out, "  - {}", registrant_line(member));
    }
}

const fn warning_text(reason: WarningReason) -> &'static str {
    match reason {
        WarningReason::MissingDomestic => "fewer than 2 domestic members",
    }
}
