//! Purpose: Define the immutable options object produced by a successful decode.
//! Exports: `ServerApi`.
//! Role: Stable result type handed to harness callers.
//! Invariants: Flags are tri-state; `None` means unset, never false.
//! Invariants: Values are construction-only; callers read through getters.

use crate::core::version::ServerApiVersion;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ServerApi {
    version: ServerApiVersion,
    strict: Option<bool>,
    deprecation_errors: Option<bool>,
}

impl ServerApi {
    pub fn new(version: ServerApiVersion) -> Self {
        Self {
            version,
            strict: None,
            deprecation_errors: None,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    pub fn with_deprecation_errors(mut self, deprecation_errors: bool) -> Self {
        self.deprecation_errors = Some(deprecation_errors);
        self
    }

    pub fn version(&self) -> ServerApiVersion {
        self.version
    }

    pub fn strict(&self) -> Option<bool> {
        self.strict
    }

    pub fn deprecation_errors(&self) -> Option<bool> {
        self.deprecation_errors
    }
}
