use proptest::prelude::*;
use rally_domain::config::RosterRules;
use rally_domain::{Leadership, Proficiency, Region, Registrant, Role, SlotAllocation};
use rally_roster::assign_with_rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;

const SLOT: &str = "国内周一晚6:30";

fn registrant() -> impl Strategy<Value = (Role, Leadership, Proficiency, Region)> {
    (
        prop_oneof![Just(Role::Melee), Just(Role::Ranged), Just(Role::Healer)],
        prop_oneof![
            Just(Leadership::Willing),
            Just(Leadership::Unwilling),
            Just(Leadership::SemiWilling)
        ],
        prop_oneof![
            Just(Proficiency::Novice),
            Just(Proficiency::Familiar),
            Just(Proficiency::VeryFamiliar),
            Just(Proficiency::Expert)
        ],
        prop_oneof![Just(Region::Domestic), Just(Region::NorthAmerica), Just(Region::Other)],
    )
}

fn pool(max: usize) -> impl Strategy<Value = Vec<Registrant>> {
    proptest::collection::vec(registrant(), 0..max).prop_map(|attrs| {
        attrs
            .into_iter()
            .enumerate()
            .map(|(i, (role, leadership, proficiency, region))| {
                Registrant::new(format!("r{i}"), SLOT)
                    .with_role(role)
                    .with_leadership(leadership)
                    .with_proficiency(proficiency)
                    .with_region(region)
            })
            .collect()
    })
}

fn allocate(roster: &[Registrant], seed: u64) -> Option<SlotAllocation> {
    let result = assign_with_rng(roster, &RosterRules::default(), &mut StdRng::seed_from_u64(seed));
    result.slots.into_iter().next()
}

fn id_counts<'a>(members: impl Iterator<Item = &'a Registrant>) -> BTreeMap<&'a str, usize> {
    let mut counts = BTreeMap::new();
    for member in members {
        *counts.entry(member.id.as_str()).or_insert(0) += 1;
    }
    counts
}

proptest! {
    #[test]
    fn sizes_follow_pool_size(roster in pool(64), seed in any::<u64>()) {
        let full = roster.len() / 10;
        match allocate(&roster, seed) {
            None => prop_assert!(roster.is_empty()),
            Some(slot) => {
                prop_assert_eq!(slot.teams.len(), full);
                prop_assert!(slot.teams.iter().all(|team| team.len() == 10));
                prop_assert_eq!(slot.standby.len(), roster.len() - 10 * full);
            },
        }
    }

    #[test]
    fn every_registrant_is_placed_exactly_once(roster in pool(64), seed in any::<u64>()) {
        let Some(slot) = allocate(&roster, seed) else {
            prop_assert!(roster.is_empty());
            return Ok(());
        };

        let placed = id_counts(slot.teams.iter().flat_map(|t| t.iter()).chain(slot.standby.iter()));
        let expected = id_counts(roster.iter());
        prop_assert_eq!(placed, expected);
    }

    #[test]
    fn small_pools_are_all_standby(roster in pool(10), seed in any::<u64>()) {
        if let Some(slot) = allocate(&roster, seed) {
            prop_assert!(slot.teams.is_empty());
            prop_assert!(slot.warnings.is_empty());
            prop_assert_eq!(slot.standby.members(), roster.as_slice());
        }
    }

    #[test]
    fn enough_healers_cover_every_group(roster in pool(64), seed in any::<u64>()) {
        let full = roster.len() / 10;
        let healers = roster.iter().filter(|r| r.is_healer()).count();
        prop_assume!(full > 0 && healers > full);

        let slot = allocate(&roster, seed).expect("non-empty pool");
        prop_assert!(slot.teams.iter().all(|team| team.healer_count() >= 1));
        if !slot.standby.is_empty() {
            prop_assert!(slot.standby.healer_count() >= 1);
        }
    }

    #[test]
    fn warnings_match_domestic_counts(roster in pool(64), seed in any::<u64>()) {
        let Some(slot) = allocate(&roster, seed) else {
            return Ok(());
        };
        prop_assume!(!slot.teams.is_empty());

        for (index, team) in slot.teams.iter().enumerate() {
            prop_assert_eq!(slot.has_warning(index), team.domestic_count() < 2);
        }
        let standby_flagged = !slot.standby.is_empty() && slot.standby.domestic_count() < 2;
        prop_assert_eq!(slot.has_warning(slot.standby_index()), standby_flagged);
    }

    #[test]
    fn reruns_agree_on_sizes(roster in pool(64), a in any::<u64>(), b in any::<u64>()) {
        let first = allocate(&roster, a);
        let second = allocate(&roster, b);

        let shape = |slot: Option<SlotAllocation>| {
            slot.map(|s| (s.teams.iter().map(|t| t.len()).collect::<Vec<_>>(), s.standby.len()))
        };
        prop_assert_eq!(shape(first), shape(second));
    }
}
