//! Argument-handling behavior of the CLI binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn tabulon() -> Command {
    Command::cargo_bin("tabulon").expect("binary builds")
}

#[test]
fn no_subcommand_fails_with_usage() {
    tabulon()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    tabulon()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn version_flag_works() {
    tabulon().arg("--version").assert().success();
}

#[test]
fn extract_requires_file_argument() {
    tabulon().arg("extract").assert().failure();
}

#[test]
fn unknown_format_is_rejected() {
    tabulon()
        .args(["extract", "x.pdf", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn unknown_method_is_rejected() {
    tabulon()
        .args(["extract", "x.pdf", "--method", "magic"])
        .assert()
        .failure();
}

#[test]
fn missing_file_reports_not_found() {
    tabulon()
        .args(["extract", "/nonexistent/report.pdf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn bad_page_range_reports_error() {
    tabulon()
        .args(["extract", "/nonexistent/report.pdf", "--pages", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page 0 is invalid"));
}

#[test]
fn bad_area_reports_error() {
    tabulon()
        .args(["extract", "/nonexistent/report.pdf", "--area", "1,2,3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("area takes four coordinates"));
}

#[test]
fn columns_with_lattice_is_invalid() {
    tabulon()
        .args([
            "extract",
            "/nonexistent/report.pdf",
            "--method",
            "lattice",
            "--columns",
            "100,200",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid options"));
}
