//! Purpose: Resolve and load option fixtures for harness and CLI use.
//! Exports: `FixtureRef`, `FixtureClient`.
//! Role: Stable boundary for fixture resolution; mirrors CLI resolution rules.
//! Invariants: Bare fixture names resolve inside the fixture dir with a `.json` suffix.
//! Invariants: Names never contain path separators; explicit paths are taken verbatim.

use super::report::{CheckReport, is_document_issue, issue_from_error};
use super::{ApiResult, decode_str};
use crate::core::error::{Error, ErrorKind};
use crate::core::options::ServerApi;
use std::path::{Path, PathBuf};

const FIXTURE_EXTENSION: &str = "json";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FixtureRef {
    Name(String),
    Path(PathBuf),
}

impl FixtureRef {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn describe(&self) -> String {
        match self {
            FixtureRef::Name(name) => name.clone(),
            FixtureRef::Path(path) => path.to_string_lossy().to_string(),
        }
    }

    fn resolve(&self, fixture_dir: &Path) -> ApiResult<PathBuf> {
        match self {
            FixtureRef::Name(name) => resolve_named_fixture_path(name, fixture_dir),
            FixtureRef::Path(path) => Ok(path.clone()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FixtureClient {
    fixture_dir: PathBuf,
}

impl FixtureClient {
    pub fn new() -> Self {
        Self {
            fixture_dir: PathBuf::from("."),
        }
    }

    pub fn with_fixture_dir(mut self, fixture_dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = fixture_dir.into();
        self
    }

    pub fn fixture_dir(&self) -> &Path {
        &self.fixture_dir
    }

    pub fn load(&self, fixture_ref: &FixtureRef) -> ApiResult<ServerApi> {
        let path = fixture_ref.resolve(&self.fixture_dir)?;
        let text = read_fixture(&path)?;
        decode_str(&text).map_err(|err| err.with_path(path))
    }

    pub fn check(&self, fixture_ref: &FixtureRef) -> ApiResult<CheckReport> {
        let path = fixture_ref.resolve(&self.fixture_dir)?;
        let text = read_fixture(&path)?;
        let report = match decode_str(&text) {
            Ok(options) => CheckReport::ok(options),
            Err(err) if is_document_issue(err.kind()) => {
                let mut report = CheckReport::invalid(issue_from_error(&err));
                if let Some(hint) = err.hint() {
                    report = report.with_hint(hint);
                }
                report
            }
            Err(err) => return Err(err.with_path(path)),
        };
        Ok(report
            .with_path(path)
            .with_fixture_ref(fixture_ref.describe()))
    }
}

impl Default for FixtureClient {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_named_fixture_path(name: &str, fixture_dir: &Path) -> ApiResult<PathBuf> {
    if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("fixture name must not contain path separators"));
    }
    let file_name = if Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        == Some(FIXTURE_EXTENSION)
    {
        name.to_string()
    } else {
        format!("{name}.{FIXTURE_EXTENSION}")
    };
    Ok(fixture_dir.join(file_name))
}

fn read_fixture(path: &Path) -> ApiResult<String> {
    std::fs::read_to_string(path).map_err(|err| {
        Error::new(map_io_error_kind(&err))
            .with_message("failed to read options document")
            .with_path(path)
            .with_source(err)
    })
}

fn map_io_error_kind(err: &std::io::Error) -> ErrorKind {
    match err.kind() {
        std::io::ErrorKind::NotFound => ErrorKind::NotFound,
        std::io::ErrorKind::PermissionDenied => ErrorKind::Permission,
        _ => ErrorKind::Io,
    }
}
