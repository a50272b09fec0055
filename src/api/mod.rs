//! Purpose: Define the stable public Rust API boundary for serverapi.
//! Exports: Options, decoding, fixture loading, reports, and errors.
//! Role: Public, additive-only surface; hides internal document modules.
//! Invariants: This module is the only public path to decode primitives.
//! Invariants: Internal modules remain private and are not directly exposed.

mod fixture;
mod report;

use crate::json::parse;
use serde_json::Value;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::decode::{
    FIELD_DEPRECATION_ERRORS, FIELD_STRICT, FIELD_VERSION, decode_value, encode_value,
};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::options::ServerApi;
pub use crate::core::version::{
    SUPPORTED_API_VERSIONS, ServerApiVersion, api_version_error, missing_version_error,
};
pub use fixture::{FixtureClient, FixtureRef};
pub use report::{CheckIssue, CheckReport, CheckStatus, issue_code_for_kind};

pub type ApiResult<T> = Result<T, Error>;

pub fn decode_str(input: &str) -> ApiResult<ServerApi> {
    let raw: Value = parse::from_str(input).map_err(|err| {
        Error::new(ErrorKind::Malformed)
            .with_message("failed to parse options document")
            .with_hint(parse::hint_for_error(&err, "server API options"))
            .with_source(err)
    })?;
    decode_value(&raw)
}
