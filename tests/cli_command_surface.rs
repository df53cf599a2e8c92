#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn addcard_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("addcard"));
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("TRELLO_API_KEY")
        .env_remove("TRELLO_API_TOKEN")
        .env_remove("TRELLO_USERNAME")
        .env("TRELLO_BASE_URL", "http://127.0.0.1:9");
    cmd
}

#[test]
fn version_flag_prints_name_and_version() {
    let home = TempDir::new().unwrap();
    addcard_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "addcard version: {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn short_version_flag_skips_the_workflow() {
    let home = TempDir::new().unwrap();
    addcard_cmd(&home)
        .args(["-v", "add-card"])
        .assert()
        .success()
        .stdout(predicate::str::contains("addcard version:"))
        .stdout(predicate::str::contains("Card name").not());
}

#[test]
fn no_subcommand_prints_help() {
    let home = TempDir::new().unwrap();
    addcard_cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("add-card"))
        .stdout(predicate::str::contains("list-boards"));
}

#[test]
fn unknown_subcommand_fails() {
    let home = TempDir::new().unwrap();
    addcard_cmd(&home).arg("remove-card").assert().failure();
}

#[test]
fn unreachable_service_fails_listing_with_operation_name() {
    let home = TempDir::new().unwrap();
    addcard_cmd(&home)
        .arg("list-boards")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to get boards"));
}

#[test]
fn empty_history() {
    let home = TempDir::new().unwrap();
    addcard_cmd(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity recorded yet"));
}

#[test]
fn malformed_config_file_fails() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".addcard");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[trello\n").unwrap();

    addcard_cmd(&home)
        .arg("list-boards")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config.toml"));
}
