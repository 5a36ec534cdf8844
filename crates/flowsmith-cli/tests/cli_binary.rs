//! End-to-end tests that run the built `flowsmith` binary

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const DOCUMENT: &str = r##"{
    "nodes": [
        {"id": "start", "position": {"x": 0, "y": 0}, "data": {"label": "Start", "shape": "stadium", "fillColor": "#f00"}},
        {"id": "end", "position": {"x": 0, "y": 0}, "data": {"label": "End"}}
    ],
    "edges": [
        {"id": "e1", "source": "start", "target": "end", "label": "go"},
        {"id": "e2", "source": "end", "target": "gone"}
    ]
}"##;

fn flowsmith(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flowsmith"))
        .args(args)
        .env("FLOWSMITH_LOG_LEVEL", "off")
        .output()
        .expect("failed to run flowsmith")
}

fn flowsmith_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_flowsmith"))
        .args(args)
        .env("FLOWSMITH_LOG_LEVEL", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn flowsmith");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn write_document(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn export_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_document(dir.path(), "diagram.json", DOCUMENT);

    let output = flowsmith(&["export", "-i", &input, "--theme", "forest"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected = [
        r#"%%{ init: {"theme":"forest"} }%%"#,
        "flowchart TD",
        "  start([\"Start\"])",
        "  end[\"End\"]",
        "  style start fill:#f00",
        "  start -->|\"go\"| end",
        "  end --> gone",
        "",
    ]
    .join("\n");
    assert_eq!(stdout, expected);
}

#[test]
fn export_from_stdin() {
    let output = flowsmith_stdin(&["export", "-d", "LR"], DOCUMENT);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("flowchart LR\n"));
}

#[test]
fn export_to_file_has_no_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_document(dir.path(), "diagram.json", r#"{"nodes": [], "edges": []}"#);
    let out = dir.path().join("out.mmd");

    let output = flowsmith(&["export", "-i", &input, "-o", out.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(out).unwrap(),
        "flowchart TD\n  %% Add nodes to get started"
    );
}

#[test]
fn layout_writes_positions() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_document(dir.path(), "diagram.json", DOCUMENT);

    let output = flowsmith(&["layout", "-i", &input, "-d", "TD"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let start_y = json["nodes"][0]["position"]["y"].as_f64().unwrap();
    let end_y = json["nodes"][1]["position"]["y"].as_f64().unwrap();
    assert!(end_y > start_y);
    assert_eq!(json["edges"].as_array().unwrap().len(), 2);
}

#[test]
fn validate_accepts_and_rejects() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_document(dir.path(), "good.json", DOCUMENT);
    let bad = write_document(dir.path(), "bad.json", r#"{"nodes": []}"#);

    let output = flowsmith(&["validate", "-i", &good]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Valid diagram (2 nodes, 2 edges)"));

    let output = flowsmith(&["validate", "-i", &bad]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Invalid diagram"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing `edges` key"));
}

#[test]
fn info_json_counts_dangling_edges() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_document(dir.path(), "diagram.json", DOCUMENT);

    let output = flowsmith(&["info", "-i", &input, "--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["nodes"], 2);
    assert_eq!(json["edges"], 2);
    assert_eq!(json["dangling_edges"], 1);
    assert_eq!(json["styled_nodes"], 1);
}

#[test]
fn missing_input_file_fails() {
    let output = flowsmith(&["export", "-i", "/definitely/not/here.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read input file"));
}
