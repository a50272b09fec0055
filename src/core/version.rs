//! Purpose: Centralize server API version policy and rejection guidance.
//! Exports: `ServerApiVersion`, `SUPPORTED_API_VERSIONS`, version error constructors.
//! Role: Shared policy gating which API versions an options document may select.
//! Invariants: The version list is additive; identifiers are stable once published.
//! Invariants: Rejection guidance names every supported identifier.

use crate::core::error::{Error, ErrorKind};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ServerApiVersion {
    V1,
}

pub const SUPPORTED_API_VERSIONS: &[ServerApiVersion] = &[ServerApiVersion::V1];

impl ServerApiVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            ServerApiVersion::V1 => "1",
        }
    }

    pub fn parse(value: &str) -> Result<Self, Error> {
        SUPPORTED_API_VERSIONS
            .iter()
            .copied()
            .find(|version| version.as_str() == value)
            .ok_or_else(|| api_version_error(value))
    }
}

impl fmt::Display for ServerApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerApiVersion {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

pub fn api_version_error(detected: &str) -> Error {
    Error::new(ErrorKind::InvalidVersion)
        .with_message(format!(
            "unsupported server API version {detected:?} (supported: {})",
            supported_list()
        ))
        .with_hint("Pick a version from the supported list. Run `serverapi versions` for the current set.")
}

pub fn missing_version_error() -> Error {
    Error::new(ErrorKind::InvalidVersion)
        .with_message(format!(
            "server API version is required (supported: {})",
            supported_list()
        ))
        .with_hint("Add a `version` field to the options document.")
}

fn supported_list() -> String {
    SUPPORTED_API_VERSIONS
        .iter()
        .map(|version| version.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
