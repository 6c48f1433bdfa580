use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("veck")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sessions"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_sessions_help_shows_subcommands() {
    cargo_bin_cmd!("veck")
        .args(["sessions", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_search_help_shows_threshold() {
    cargo_bin_cmd!("veck")
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("veck")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
