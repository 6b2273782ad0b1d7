//! CLI integration tests.
//!
//! These tests invoke the `ontograph` binary via `std::process::Command`
//! against the fixture ontologies and check the written documents.

mod common;

use std::fs;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ontograph"))
        .args(args)
        .output()
        .expect("failed to execute binary")
}

fn fixture(name: &str) -> String {
    common::fixture_path(name).to_str().unwrap().to_string()
}

#[test]
fn writes_graphml_to_stdout() {
    let output = run(&[&fixture("test_classes.ttl"), "-q"]);
    assert!(
        output.status.success(),
        "ontograph failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("invalid UTF-8");
    assert!(stdout.starts_with("<?xml"));
    assert!(stdout.trim_end().ends_with("</graphml>"));
    assert_eq!(stdout.matches("<node ").count(), 7);
    assert_eq!(stdout.matches("<edge ").count(), 5);
    // title defaults to the file name
    assert!(stdout.contains("Title:  test_classes.ttl"));
    assert!(output.stderr.is_empty());
}

#[test]
fn writes_to_output_file_and_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("classes.graphml");
    let output = run(&[
        &fixture("test_classes.ttl"),
        "--title",
        "Ninepts",
        "--visualization",
        "vowl",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Generated 7 nodes and 5 edges for test_classes.ttl"));

    let doc = fs::read_to_string(&out).unwrap();
    assert!(doc.contains("Title:  Ninepts"));
    assert!(doc.contains("Subclass of"));
}

#[test]
fn request_file_supplies_options() {
    let dir = tempfile::tempdir().unwrap();
    let request = dir.path().join("request.json");
    fs::write(
        &request,
        r#"{ "graphTitle": "People", "graphType": "individual", "visualization": "graffoo", "collapseEdges": "collapseTrue" }"#,
    )
    .unwrap();
    let output = run(&[
        &fixture("individuals.ttl"),
        "--request",
        request.to_str().unwrap(),
        "-q",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Title:  People"));
    assert!(stdout.contains("ex:knows,\nex:likes"));
}

#[test]
fn flags_override_request_file() {
    let dir = tempfile::tempdir().unwrap();
    let request = dir.path().join("request.json");
    fs::write(&request, r#"{ "graphTitle": "People", "graphType": "class", "visualization": "graffoo" }"#).unwrap();
    let output = run(&[
        &fixture("individuals.ttl"),
        "--request",
        request.to_str().unwrap(),
        "--graph-type",
        "individual",
        "--reasoning",
        "-q",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("id=\"ex:alice|type|ex:Agent\""));
}

#[test]
fn invalid_options_exit_nonzero_with_every_problem() {
    let output = run(&[
        &fixture("test_classes.ttl"),
        "--graph-type",
        "classes",
        "--visualization",
        "dot",
    ]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("graphType"));
    assert!(stderr.contains("visualization"));
}

#[test]
fn unsupported_file_suffix_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ontology.docx");
    fs::write(&path, "not an ontology").unwrap();
    let output = run(&[path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported ontology format"));
}

#[test]
fn media_type_flag_overrides_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.bin");
    fs::copy(common::fixture_path("shapes.nt"), &path).unwrap();
    let output = run(&[
        path.to_str().unwrap(),
        "--media-type",
        "application/n-triples",
        "-q",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("http://example.org/shapes#Circle"));
}
