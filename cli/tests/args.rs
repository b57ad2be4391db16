use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn help_documents_the_monitoring_flags() {
    Command::cargo_bin("nats-top")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--server"))
        .stdout(contains("--https-port"))
        .stdout(contains("--sort"))
        .stdout(contains("--display-subscriptions"));
}

#[test]
fn version_prints_the_crate_version() {
    Command::cargo_bin("nats-top")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("nats-top"));
}

#[test]
fn an_unknown_flag_fails_with_usage() {
    Command::cargo_bin("nats-top")
        .unwrap()
        .arg("--definitely-not-a-flag")
        .assert()
        .failure()
        .stderr(contains("Usage"));
}

#[test]
fn an_invalid_sort_key_is_rejected() {
    Command::cargo_bin("nats-top")
        .unwrap()
        .args(["--sort", "bogus"])
        .assert()
        .failure()
        .stderr(contains("--sort"));
}
