use rally_domain::config::RosterRules;
use rally_domain::{
    Leadership, Proficiency, Region, Registrant, Role, RosterSnapshot, Team, WindowOverride,
};
use serde_json::json;
use std::str::FromStr;

#[test]
fn registrant_serializes_camel_case_kebab_values() {
    let r = Registrant::new("Aki", "slot-a")
        .with_role(Role::Healer)
        .with_leadership(Leadership::SemiWilling)
        .with_proficiency(Proficiency::VeryFamiliar)
        .with_region(Region::Domestic);

    let value = serde_json::to_value(&r).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "Aki",
            "role": "healer",
            "leadership": "semi-willing",
            "proficiency": "very-familiar",
            "region": "domestic",
            "timeSlot": "slot-a"
        })
    );
}

#[test]
fn registrant_accepts_chinese_form_records() {
    let raw = json!({
        "id": "小明",
        "job": "治疗",
        "command": "半指挥",
        "proficiency": "十鹅大佬",
        "ip": "国内",
        "time": "国内周一晚6:30"
    });

    let r: Registrant = serde_json::from_value(raw).unwrap();
    assert_eq!(r.role, Role::Healer);
    assert_eq!(r.leadership, Leadership::SemiWilling);
    assert_eq!(r.proficiency, Proficiency::Expert);
    assert_eq!(r.region, Region::Domestic);
    assert_eq!(r.time_slot.as_str(), "国内周一晚6:30");
}

#[test]
fn unknown_enum_values_fall_back_to_form_defaults() {
    let raw = json!({
        "id": "x",
        "role": "bard",
        "leadership": "maybe",
        "proficiency": "legendary",
        "region": "moon",
        "timeSlot": "whenever"
    });

    let r: Registrant = serde_json::from_value(raw).unwrap();
    assert_eq!(r.role, Role::Melee);
    assert_eq!(r.leadership, Leadership::Unwilling);
    assert_eq!(r.proficiency, Proficiency::Familiar);
    assert_eq!(r.region, Region::Other);
}

#[test]
fn enums_parse_both_labels_and_display_canonical_names() {
    assert_eq!(Role::from_str("远程").unwrap(), Role::Ranged);
    assert_eq!(Role::from_str("healer").unwrap(), Role::Healer);
    assert_eq!(Leadership::from_str("semi-willing").unwrap(), Leadership::SemiWilling);
    assert_eq!(Proficiency::from_str("完全小白").unwrap(), Proficiency::Novice);
    assert_eq!(Region::from_str("north-america").unwrap(), Region::NorthAmerica);
    assert!(Role::from_str("bard").is_err());

    assert_eq!(Proficiency::VeryFamiliar.to_string(), "very-familiar");
    assert_eq!(Leadership::SemiWilling.to_string(), "semi-willing");
}

#[test]
fn proficiency_is_ordered_ascending() {
    assert!(Proficiency::Novice < Proficiency::Familiar);
    assert!(Proficiency::Familiar < Proficiency::VeryFamiliar);
    assert!(Proficiency::VeryFamiliar < Proficiency::Expert);
}

#[test]
fn team_helpers_count_roles_and_regions() {
    let team: Team = [
        Registrant::new("a", "s").with_role(Role::Healer).with_region(Region::Domestic),
        Registrant::new("b", "s").with_leadership(Leadership::Willing),
        Registrant::new("c", "s").with_role(Role::Healer),
        Registrant::new("d", "s").with_region(Region::Domestic),
    ]
    .into_iter()
    .collect();

    assert_eq!(team.len(), 4);
    assert_eq!(team.healer_count(), 2);
    assert_eq!(team.domestic_count(), 2);
    assert!(team.has_leader());
    assert_eq!(team.leader().map(|m| m.id.as_str()), Some("b"));
    assert!(team.contains("d"));
    assert!(!team.contains("e"));
}

#[test]
fn snapshot_defaults_missing_fields() {
    let snapshot: RosterSnapshot = serde_json::from_value(json!({})).unwrap();
    assert!(snapshot.is_empty());
    assert!(snapshot.window_override.is_none());

    let snapshot: RosterSnapshot =
        serde_json::from_value(json!({ "windowOverride": "closed" })).unwrap();
    assert_eq!(snapshot.window_override, Some(WindowOverride::Closed));
}

#[test]
fn sign_up_form_records_land_in_a_configured_slot() {
    let raw = json!({
        "id": "小红",
        "job": "远程",
        "command": "愿意",
        "proficiency": "基本熟悉",
        "ip": "北美",
        "time": "北美周日晚9:30EST/6:30PST/国内周一早10:30"
    });

    let r: Registrant = serde_json::from_value(raw).unwrap();
    let rules = RosterRules::default();
    assert!(rules.is_known_slot(r.time_slot.as_str()));
    assert_eq!(rules.time_slots[0], r.time_slot.as_str());
}

#[test]
fn unknown_labels_serialize_back_as_defaults() {
    let raw = json!({ "id": "x", "role": "bard", "timeSlot": "s" });

    let r: Registrant = serde_json::from_value(raw).unwrap();
    let value = serde_json::to_value(&r).unwrap();
    assert_eq!(value["role"], "melee");
    assert_eq!(value["leadership"], "unwilling");
    assert_eq!(value["proficiency"], "familiar");
}
