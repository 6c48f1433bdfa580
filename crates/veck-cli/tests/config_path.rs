use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_config_path_respects_veck_home() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("veck")
        .env("VECK_HOME", home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(home.path().to_str().unwrap()))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file_once() {
    let home = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("veck")
        .env("VECK_HOME", home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));
    assert!(home.path().join("config.toml").exists());

    // Second init refuses to overwrite.
    cargo_bin_cmd!("veck")
        .env("VECK_HOME", home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
