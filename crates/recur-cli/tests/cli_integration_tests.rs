/// Black-box tests for the `recur` binary, driving the evaluator through the
/// same string boundary the surrounding system uses.
use assert_cmd::Command;
use predicates::prelude::*;

fn recur() -> Command {
    Command::cargo_bin("recur").expect("binary should build")
}

#[test]
fn test_help_and_version() {
    recur()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recurrence-rule evaluator"));

    recur()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("recur"));

    recur().arg("not-a-command").assert().failure();
}

#[test]
fn test_next_with_explicit_now() {
    recur()
        .args([
            "next", "--now", "20240301", "--date", "20240228", "--repeat", "d 3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("20240302\n"));
}

#[test]
fn test_next_monthly_leap_february() {
    recur()
        .args([
            "next", "--now", "20240220", "--date", "20240131", "--repeat", "m -1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("20240229\n"));
}

#[test]
fn test_next_rejects_out_of_range_interval() {
    recur()
        .args([
            "next", "--now", "20240301", "--date", "20240228", "--repeat", "d 400",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid day interval"));
}

#[test]
fn test_next_rejects_malformed_date() {
    recur()
        .args([
            "next", "--now", "20240301", "--date", "2024-02-28", "--repeat", "d 3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYYMMDD"));
}

#[test]
fn test_check_prints_canonical_form() {
    recur()
        .args(["check", "w 7,1"])
        .assert()
        .success()
        .stdout(predicate::str::diff("w 1,7\n"));

    recur()
        .args(["check", "w 8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid day of week"));
}

#[test]
fn test_preview_chains_occurrences() {
    recur()
        .args(["preview", "--date", "20240110", "--repeat", "d 7", "--count", "3"])
        .assert()
        .success()
        .stdout(predicate::str::diff("20240117\n20240124\n20240131\n"));
}

#[test]
fn test_preview_weekly_skips_non_matching_days() {
    // From Saturday 2024-06-01, Mondays and Wednesdays follow in order.
    recur()
        .args(["preview", "--date", "20240601", "--repeat", "w 1,3", "--count", "3"])
        .assert()
        .success()
        .stdout(predicate::str::diff("20240603\n20240605\n20240610\n"));
}
