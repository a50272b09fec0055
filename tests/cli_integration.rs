// CLI integration tests for v0 check/normalize/versions flows.
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_serverapi");
    Command::new(exe)
}

fn parse_json(value: &str) -> Value {
    serde_json::from_str(value).expect("valid json")
}

fn parse_json_line(output: &[u8]) -> Value {
    let text = String::from_utf8_lossy(output);
    let line = text.lines().next().expect("json line");
    parse_json(line)
}

fn write_fixture(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write fixture");
}

#[test]
fn check_valid_fixture_flow() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_fixture(temp.path(), "api.json", r#"{"version": "1", "strict": true}"#);

    let check = cmd()
        .args(["--dir", temp.path().to_str().unwrap(), "check", "api"])
        .output()
        .expect("check");
    assert!(check.status.success());

    let report = parse_json_line(&check.stdout);
    assert_eq!(report.get("fixture").unwrap().as_str().unwrap(), "api");
    assert!(
        report
            .get("path")
            .unwrap()
            .as_str()
            .unwrap()
            .ends_with("api.json")
    );
    assert_eq!(report.get("status").unwrap().as_str().unwrap(), "ok");
    assert_eq!(report.get("issue_count").unwrap().as_u64().unwrap(), 0);
    let server_api = report.get("serverApi").expect("serverApi");
    assert_eq!(server_api.get("version").unwrap().as_str().unwrap(), "1");
    assert_eq!(server_api.get("strict").unwrap().as_bool().unwrap(), true);
    assert!(server_api.get("deprecationErrors").is_none());
}

#[test]
fn check_reports_every_unknown_key() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_fixture(
        temp.path(),
        "extra.json",
        r#"{"version": "1", "zeta": 1, "alpha": 2}"#,
    );

    let check = cmd()
        .args(["--dir", temp.path().to_str().unwrap(), "check", "extra"])
        .output()
        .expect("check");
    assert_eq!(check.status.code().unwrap(), 4);

    let report = parse_json_line(&check.stdout);
    assert_eq!(report.get("status").unwrap().as_str().unwrap(), "invalid");
    let issues = report.get("issues").unwrap().as_array().expect("issues");
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0].get("code").unwrap().as_str().unwrap(),
        "unrecognized-field"
    );
    let fields: Vec<&str> = issues[0]
        .get("fields")
        .unwrap()
        .as_array()
        .expect("fields")
        .iter()
        .map(|field| field.as_str().unwrap())
        .collect();
    assert_eq!(fields, ["alpha", "zeta"]);
}

#[test]
fn invalid_version_exit_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_fixture(temp.path(), "stale.json", r#"{"version": "999"}"#);

    let check = cmd()
        .args(["--dir", temp.path().to_str().unwrap(), "check", "stale"])
        .output()
        .expect("check");
    assert_eq!(check.status.code().unwrap(), 5);

    let report = parse_json_line(&check.stdout);
    assert_eq!(
        report.get("issues").unwrap()[0].get("code").unwrap().as_str().unwrap(),
        "invalid-version"
    );
}

#[test]
fn check_continues_past_invalid_documents() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_fixture(temp.path(), "good.json", r#"{"version": "1"}"#);
    write_fixture(temp.path(), "bad.json", r#"{"version": "1", "foo": 1}"#);

    let check = cmd()
        .args([
            "--dir",
            temp.path().to_str().unwrap(),
            "check",
            "bad",
            "good",
        ])
        .output()
        .expect("check");
    assert_eq!(check.status.code().unwrap(), 4);

    let text = String::from_utf8_lossy(&check.stdout);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        parse_json(lines[0]).get("status").unwrap().as_str().unwrap(),
        "invalid"
    );
    assert_eq!(
        parse_json(lines[1]).get("status").unwrap().as_str().unwrap(),
        "ok"
    );
}

#[test]
fn check_reads_document_from_stdin() {
    let mut child = cmd()
        .args(["check", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .as_mut()
        .expect("stdin")
        .write_all(br#"{"version": "1"}"#)
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());

    let report = parse_json_line(&output.stdout);
    assert_eq!(report.get("fixture").unwrap().as_str().unwrap(), "-");
    assert_eq!(report.get("status").unwrap().as_str().unwrap(), "ok");
}

#[test]
fn not_found_exit_code() {
    let temp = tempfile::tempdir().expect("tempdir");

    let check = cmd()
        .args(["--dir", temp.path().to_str().unwrap(), "check", "absent"])
        .output()
        .expect("check");
    assert_eq!(check.status.code().unwrap(), 6);

    let envelope = parse_json_line(&check.stderr);
    let error = envelope.get("error").expect("error envelope");
    assert_eq!(error.get("kind").unwrap().as_str().unwrap(), "NotFound");
}

#[test]
fn usage_exit_code() {
    let check = cmd().args(["check"]).output().expect("check");
    assert_eq!(check.status.code().unwrap(), 2);
}

#[test]
fn versions_lists_supported_set() {
    let versions = cmd().args(["versions"]).output().expect("versions");
    assert!(versions.status.success());

    let value = parse_json_line(&versions.stdout);
    let listed: Vec<&str> = value
        .get("versions")
        .unwrap()
        .as_array()
        .expect("versions array")
        .iter()
        .map(|version| version.as_str().unwrap())
        .collect();
    assert_eq!(listed, ["1"]);
}

#[test]
fn normalize_drops_null_flags() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_fixture(
        temp.path(),
        "nullable.json",
        r#"{"version": "1", "strict": null}"#,
    );

    let normalize = cmd()
        .args([
            "--dir",
            temp.path().to_str().unwrap(),
            "normalize",
            "nullable",
        ])
        .output()
        .expect("normalize");
    assert!(normalize.status.success());

    let value = parse_json_line(&normalize.stdout);
    assert_eq!(value, parse_json(r#"{"version": "1"}"#));
}
