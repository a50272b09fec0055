//! Purpose: Shared report JSON serializers for CLI output paths.
//! Exports: `check_report_json`, `versions_json`.
//! Role: Keep envelope shapes consistent across subcommands.
//! Invariants: Stable key names/order for v0 report payloads.
//! Invariants: Optional blocks are emitted only when present.

use serde_json::{Map, Value, json};
use serverapi::api::{CheckIssue, CheckReport, CheckStatus, SUPPORTED_API_VERSIONS, encode_value};

pub(crate) fn check_report_json(report: &CheckReport) -> Value {
    let mut map = Map::new();
    if let Some(fixture_ref) = &report.fixture_ref {
        map.insert("fixture".to_string(), json!(fixture_ref));
    }
    if let Some(path) = &report.path {
        map.insert("path".to_string(), json!(path.display().to_string()));
    }
    map.insert("status".to_string(), json!(status_label(report.status)));
    map.insert("issue_count".to_string(), json!(report.issue_count));
    if !report.issues.is_empty() {
        map.insert(
            "issues".to_string(),
            Value::Array(report.issues.iter().map(issue_json).collect()),
        );
    }
    if let Some(options) = &report.options {
        map.insert("serverApi".to_string(), encode_value(options));
    }
    if !report.hints.is_empty() {
        map.insert("hints".to_string(), json!(report.hints));
    }
    Value::Object(map)
}

pub(crate) fn versions_json() -> Value {
    let versions: Vec<&str> = SUPPORTED_API_VERSIONS
        .iter()
        .map(|version| version.as_str())
        .collect();
    json!({ "versions": versions })
}

fn status_label(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Ok => "ok",
        CheckStatus::Invalid => "invalid",
    }
}

fn issue_json(issue: &CheckIssue) -> Value {
    let mut map = Map::new();
    map.insert("code".to_string(), json!(issue.code));
    map.insert("message".to_string(), json!(issue.message));
    if !issue.fields.is_empty() {
        map.insert("fields".to_string(), json!(issue.fields));
    }
    Value::Object(map)
}
