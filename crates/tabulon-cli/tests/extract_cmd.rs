//! End-to-end CLI runs against generated fixture PDFs.

mod common;

use assert_cmd::Command;
use common::{build_pdf, ruled_grid_content, write_temp_pdf};
use predicates::prelude::*;

fn tabulon() -> Command {
    Command::cargo_bin("tabulon").expect("binary builds")
}

#[test]
fn extract_csv_outputs_grid() {
    let path = write_temp_pdf(&build_pdf(ruled_grid_content()), "extract-csv");
    tabulon()
        .args(["extract", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("A,B\nC,D\n"));
}

#[test]
fn extract_tsv_outputs_grid() {
    let path = write_temp_pdf(&build_pdf(ruled_grid_content()), "extract-tsv");
    tabulon()
        .args(["extract", path.to_str().unwrap(), "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A\tB\nC\tD\n"));
}

#[test]
fn extract_json_carries_metadata() {
    let path = write_temp_pdf(&build_pdf(ruled_grid_content()), "extract-json");
    tabulon()
        .args(["extract", path.to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"page\":1"))
        .stdout(predicate::str::contains("\"method\":\"lattice\""))
        .stdout(predicate::str::contains("[\"A\",\"B\"]"));
}

#[test]
fn extract_markdown_renders_pipe_table() {
    let path = write_temp_pdf(&build_pdf(ruled_grid_content()), "extract-md");
    tabulon()
        .args(["extract", path.to_str().unwrap(), "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| A | B |"))
        .stdout(predicate::str::contains("| --- | --- |"))
        .stdout(predicate::str::contains("| C | D |"));
}

#[test]
fn extract_stream_method_runs() {
    let path = write_temp_pdf(&build_pdf(ruled_grid_content()), "extract-stream");
    tabulon()
        .args(["extract", path.to_str().unwrap(), "--method", "stream"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A"));
}

#[test]
fn detect_reports_region() {
    let path = write_temp_pdf(&build_pdf(ruled_grid_content()), "detect");
    tabulon()
        .args(["detect", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("page 1:"));
}

#[test]
fn detect_empty_page_reports_nothing() {
    let path = write_temp_pdf(&build_pdf(""), "detect-empty");
    tabulon()
        .args(["detect", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No table regions found"));
}

#[test]
fn info_reports_page_geometry() {
    let path = write_temp_pdf(&build_pdf(ruled_grid_content()), "info");
    tabulon()
        .args(["info", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pages: 1"))
        .stdout(predicate::str::contains("612.0 x 792.0 pt"));
}
