//! End-to-end tests of the `waittime` binary.

use std::io::Write;

use predicates::prelude::*;
use tempfile::NamedTempFile;

fn job_log(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn reports_totals() {
    let log = job_log(&["0 10 20", "12 30 40"]);
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("waittime");
    cmd.arg(log.path())
        .assert()
        .success()
        .stdout(predicate::eq(
            "Total wait time: 10 seconds\nTotal run time:  20 seconds\nTotal busy time: 20 seconds\n",
        ));
}

#[test]
fn overlapping_jobs() {
    let log = job_log(&["0 10 30", "5 15 20"]);
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("waittime");
    cmd.arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total wait time: 10 seconds"))
        .stdout(predicate::str::contains("Total run time:  25 seconds"))
        .stdout(predicate::str::contains("Total busy time: 20 seconds"));
}

#[test]
fn lists_busy_periods() {
    let log = job_log(&["0 10 20", "12 30 40", "13 35 45"]);
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("waittime");
    cmd.arg("--busy")
        .arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Busy periods:\n  10 - 20\n  30 - 45\nTotal wait time:",
        ));
}

#[test]
fn extended_statistics_and_unit() {
    let log = job_log(&["0 10 20", "12 30 40"]);
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("waittime");
    cmd.args(["--stats", "--unit", "ticks"])
        .arg(log.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total wait time: 10 ticks"))
        .stdout(predicate::str::contains("Jobs:            2"))
        .stdout(predicate::str::contains("Busy periods:    2"))
        .stdout(predicate::str::contains("Mean wait time:  5.00 ticks"))
        .stdout(predicate::str::contains("Utilization:     50.0%"));
}

#[test]
fn help_exits_successfully() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("waittime");
    cmd.arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn missing_argument_prints_usage() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("waittime");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn unreadable_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("waittime");
    cmd.arg(dir.path().join("missing.dat"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unable to read job log"));
}

#[test]
fn empty_log_fails() {
    let log = job_log(&["# submit start stop", ""]);
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("waittime");
    cmd.arg(log.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("contains no jobs"));
}

#[test]
fn malformed_line_fails() {
    let log = job_log(&["0 10 20", "0 x 20"]);
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("waittime");
    cmd.arg(log.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2"));
}
