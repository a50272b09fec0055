//! Purpose: Provide a stable, serializable check report model.
//! Exports: `CheckReport`, `CheckStatus`, `CheckIssue`, `issue_code_for_kind`.
//! Role: Shared contract for CLI diagnostics and harness integrations.
//! Invariants: Reports are additive-only in v0; issue codes are stable strings.
//! Invariants: Hints are optional guidance and never required for correctness.

use crate::core::error::{Error, ErrorKind};
use crate::core::options::ServerApi;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckStatus {
    Ok,
    Invalid,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckIssue {
    pub code: String,
    pub message: String,
    pub fields: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CheckReport {
    pub fixture_ref: Option<String>,
    pub path: Option<PathBuf>,
    pub status: CheckStatus,
    pub options: Option<ServerApi>,
    pub issues: Vec<CheckIssue>,
    pub issue_count: usize,
    pub hints: Vec<String>,
}

impl CheckReport {
    pub fn ok(options: ServerApi) -> Self {
        Self {
            fixture_ref: None,
            path: None,
            status: CheckStatus::Ok,
            options: Some(options),
            issues: Vec::new(),
            issue_count: 0,
            hints: Vec::new(),
        }
    }

    pub fn invalid(issue: CheckIssue) -> Self {
        Self {
            fixture_ref: None,
            path: None,
            status: CheckStatus::Invalid,
            options: None,
            issues: vec![issue],
            issue_count: 1,
            hints: Vec::new(),
        }
    }

    pub fn with_fixture_ref(mut self, fixture_ref: impl Into<String>) -> Self {
        self.fixture_ref = Some(fixture_ref.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

pub fn issue_code_for_kind(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Malformed => "malformed",
        ErrorKind::UnrecognizedField => "unrecognized-field",
        ErrorKind::InvalidVersion => "invalid-version",
        ErrorKind::Usage => "usage",
        ErrorKind::NotFound => "not-found",
        ErrorKind::Permission => "permission",
        ErrorKind::Io => "io",
        ErrorKind::Internal => "internal",
    }
}

pub(crate) fn is_document_issue(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::Malformed | ErrorKind::UnrecognizedField | ErrorKind::InvalidVersion
    )
}

pub(crate) fn issue_from_error(err: &Error) -> CheckIssue {
    CheckIssue {
        code: issue_code_for_kind(err.kind()).to_string(),
        message: err.message().unwrap_or("invalid options document").to_string(),
        fields: err.fields().to_vec(),
    }
}
