use assert_cmd::Command;
use predicates::prelude::*;

fn kontomatch(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("kontomatch").unwrap();
    // Isolate settings and data under a throwaway home directory.
    cmd.env("HOME", home);
    cmd
}

#[test]
fn help_lists_subcommands() {
    let home = tempfile::tempdir().unwrap();
    kontomatch(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Categorize pending transactions"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn run_without_database_fails() {
    let home = tempfile::tempdir().unwrap();
    kontomatch(home.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Database not found"));
}

#[test]
fn init_demo_dry_run_then_real_run() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");

    kontomatch(home.path())
        .args(["init", "--data-dir"])
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized kontomatch"));

    kontomatch(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo data loaded!"));

    // Dry run previews results without writing anything.
    kontomatch(home.path())
        .args(["run", "--tenant", "demo", "--dry-run", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dry_run\": true"))
        .stdout(predicate::str::contains("\"results\""))
        .stdout(predicate::str::contains("PROP_HAUSGELD"));

    // Real run persists; the engine reports the same counts.
    kontomatch(home.path())
        .args(["run", "--tenant", "demo", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dry_run\": false"));

    // The demo's noise rows stay pending, the rest is done.
    kontomatch(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending:"));
}

#[test]
fn rules_list_shows_builtin_set() {
    let home = tempfile::tempdir().unwrap();
    kontomatch(home.path())
        .args(["rules", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PROP_HAUSGELD"))
        .stdout(predicate::str::contains("EINSPEISEVERGUETUNG"));
}

#[test]
fn rules_list_json_is_parseable() {
    let home = tempfile::tempdir().unwrap();
    let output = kontomatch(home.path())
        .args(["rules", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(parsed.as_array().unwrap().len() >= 10);
}
