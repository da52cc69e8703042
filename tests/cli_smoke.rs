//! Behavioural smoke tests for the CLI entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn no_arguments_prints_usage_and_fails() {
    let mut cmd = cargo_bin_cmd!("cloudeos");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_the_lifecycle_subcommands() {
    let mut cmd = cargo_bin_cmd!("cloudeos");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("destroy"));
}

#[test]
fn apply_fails_cleanly_for_a_missing_descriptor_file() {
    let mut cmd = cargo_bin_cmd!("cloudeos");
    cmd.args(["apply", "--descriptor", "/nonexistent/router.json"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to access"));
}
