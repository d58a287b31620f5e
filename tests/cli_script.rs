use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

/// Script-mode invocation rooted at an isolated data directory.
fn ledger_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("office_ledger_cli").unwrap();
    cmd.env("OFFICE_LEDGER_HOME", home)
        .env("OFFICE_LEDGER_CLI_SCRIPT", "1");
    cmd
}

#[test]
fn script_mode_edits_and_saves_a_month() {
    let home = TempDir::new().unwrap();

    ledger_cmd(home.path())
        .write_stdin("open 2024 7\nincome base 2,500,000\nfixed add \"Signage lease\" 120000 25\nsave\nexit\n")
        .assert()
        .success()
        .stdout(contains("Opened 2024-07 from a fresh record."))
        .stdout(contains("Base income set to 2,500,000원."))
        .stdout(contains("Added fixed expense `Signage lease`."))
        .stdout(contains("Saved 2024-07."));

    let record = home.path().join("records").join("monthlyData-2024-7.json");
    let json = std::fs::read_to_string(record).unwrap();
    assert!(json.contains("Signage lease"));
    assert!(json.contains("2500000"));
}

#[test]
fn destructive_commands_demand_force_in_script_mode() {
    let home = TempDir::new().unwrap();
    let record = home.path().join("records").join("monthlyData-2024-7.json");

    ledger_cmd(home.path())
        .write_stdin("open 2024 7\nsave\ndelete-month\nexit\n")
        .assert()
        .success()
        .stdout(contains(
            "pass --force to run destructive commands in script mode",
        ));
    assert!(record.exists());

    ledger_cmd(home.path())
        .write_stdin("delete-month 2024-07 --force\nexit\n")
        .assert()
        .success()
        .stdout(contains("Deleted 2024-07"));
    assert!(!record.exists());
}

#[test]
fn calculator_reports_both_sides() {
    let home = TempDir::new().unwrap();

    ledger_cmd(home.path())
        .write_stdin("calc 10000000 500000\ncalc 10000000 500000 --double\nexit\n")
        .assert()
        .success()
        .stdout(contains("Commission fee (single-side): 240,000원"))
        .stdout(contains("Commission fee (double-side): 480,000원"));
}

#[test]
fn configured_currency_carries_into_the_next_run() {
    let home = TempDir::new().unwrap();

    ledger_cmd(home.path())
        .write_stdin("config set currency usd\nexit\n")
        .assert()
        .success()
        .stdout(contains("Config `currency` updated."));

    let config = std::fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(config.contains("USD"));

    ledger_cmd(home.path())
        .write_stdin("calc 10000000 500000\nexit\n")
        .assert()
        .success()
        .stdout(contains("Commission fee (single-side): $240,000.00"));
}

#[test]
fn startup_resumes_the_last_opened_month() {
    let home = TempDir::new().unwrap();

    ledger_cmd(home.path())
        .write_stdin("open 2023 11\nexit\n")
        .assert()
        .success();

    ledger_cmd(home.path())
        .write_stdin("summary\nexit\n")
        .assert()
        .success()
        .stdout(contains("Summary for 2023-11"));
}

#[test]
fn version_names_the_data_directory() {
    let home = TempDir::new().unwrap();

    ledger_cmd(home.path())
        .write_stdin("version\nexit\n")
        .assert()
        .success()
        .stdout(contains("Office Ledger"))
        .stdout(contains("Record schema : v1"))
        .stdout(contains(home.path().display().to_string()));
}

#[test]
fn unknown_commands_suggest_and_continue() {
    let home = TempDir::new().unwrap();

    ledger_cmd(home.path())
        .write_stdin("smmary\ncalc 0 0\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `smmary`"))
        .stdout(contains("Suggestion: `summary`?"))
        .stdout(contains("Commission fee (single-side): 0원"));
}
