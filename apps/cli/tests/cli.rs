use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const CONFIG: &str = r#"
[roster]
team_size = 10
healers_per_team = 2
min_domestic_per_team = 2
time_slots = ["A", "B"]

[storage]
roster = "roster.json"
"#;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rally.toml"), CONFIG).unwrap();
    dir
}

fn rally(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rally"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn register(dir: &Path, id: &str, extra: &[&str]) {
    rally(dir).args(["register", "--id", id]).args(extra).assert().success();
}

#[test]
fn window_status_follows_weekly_schedule() {
    let dir = workspace();

    rally(dir.path())
        .args(["window", "status", "--at", "2026-10-14T20:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registration is closed (weekly schedule)"));

    // Friday 12:00 at UTC-8
    rally(dir.path())
        .args(["window", "status", "--at", "2026-10-16T20:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registration is open (weekly schedule)"));
}

#[test]
fn override_controls_registration() {
    let dir = workspace();

    rally(dir.path())
        .args(["window", "closed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registration window forced closed"));
    rally(dir.path())
        .args(["register", "--id", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("closed"));

    rally(dir.path()).args(["window", "open"]).assert().success();
    rally(dir.path())
        .args(["register", "--id", "alice", "--role", "治疗"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Registered alice"));
    rally(dir.path())
        .args(["window", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(administrator override)"));
}

#[test]
fn register_update_list_and_remove() {
    let dir = workspace();
    rally(dir.path()).args(["window", "open"]).assert().success();

    register(dir.path(), "alice", &[]);
    register(dir.path(), "bob", &["--slot", "B", "--region", "domestic"]);
    rally(dir.path())
        .args(["register", "--id", "  alice ", "--leadership", "willing"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Updated alice"));

    rally(dir.path())
        .args(["list", "--slot", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bob").and(predicate::str::contains("alice").not()));

    rally(dir.path())
        .args(["remove", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed bob"));
    rally(dir.path())
        .args(["remove", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not registered: bob"));

    rally(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(r"alice\s+melee\s+willing")
                .unwrap()
                .and(predicate::str::contains("bob").not()),
        );
}

#[test]
fn unknown_slot_and_role_are_rejected() {
    let dir = workspace();
    rally(dir.path()).args(["window", "open"]).assert().success();

    rally(dir.path()).args(["register", "--id", "alice", "--slot", "Z"]).assert().failure();
    rally(dir.path())
        .args(["register", "--id", "alice", "--role", "bard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bard"));
    rally(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No registrants"));
}

#[test]
fn assign_splits_slot_into_team_and_standby() {
    let dir = workspace();
    rally(dir.path()).args(["window", "open"]).assert().success();

    for n in 0..12 {
        let id = format!("p{n:02}");
        let role = if n < 3 { "healer" } else { "ranged" };
        let region = if n < 4 { "domestic" } else { "other" };
        register(dir.path(), &id, &["--role", role, "--region", region]);
    }

    let output = rally(dir.path()).args(["assign", "--seed", "7", "--json"]).output().unwrap();
    assert!(output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let slot = &result["slots"][0];
    assert_eq!(slot["timeSlot"], "A");
    assert_eq!(slot["teams"].as_array().unwrap().len(), 1);
    assert_eq!(slot["teams"][0].as_array().unwrap().len(), 10);
    assert_eq!(slot["standby"].as_array().unwrap().len(), 2);
    assert_eq!(result["slots"].as_array().unwrap().len(), 1);

    let again = rally(dir.path()).args(["assign", "--seed", "7", "--json"]).output().unwrap();
    assert_eq!(output.stdout, again.stdout);

    rally(dir.path())
        .arg("assign")
        .assert()
        .success()
        .stdout(predicate::str::contains("== A ==").and(predicate::str::contains("Standby")));
}

#[test]
fn stats_and_clear() {
    let dir = workspace();
    rally(dir.path()).args(["window", "open"]).assert().success();
    register(dir.path(), "alice", &[]);
    register(dir.path(), "bob", &[]);

    rally(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total 2: 0 in 0 full teams, 2 on standby"));

    rally(dir.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 registrants"));
    rally(dir.path())
        .args(["assign"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No registrants to assign"));
}

#[test]
fn roster_flag_overrides_storage_path() {
    let dir = workspace();
    let roster = dir.path().join("nested").join("custom.json");

    rally(dir.path()).arg("--roster").arg(&roster).args(["window", "open"]).assert().success();

    assert!(roster.exists());
    assert!(!dir.path().join("roster.json").exists());
}
