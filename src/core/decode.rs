//! Purpose: Decode option documents into `ServerApi` with a strict field whitelist.
//! Exports: `decode_value`, `encode_value`, recognized field name constants.
//! Role: The only path from raw documents to constructed options.
//! Invariants: Unknown keys are a hard failure and every offender is reported.
//! Invariants: JSON null on an optional flag means unset, not false.
//! Invariants: `decode_value(&encode_value(o))` yields a value equal to `o`.

use crate::core::error::{Error, ErrorKind};
use crate::core::options::ServerApi;
use crate::core::version::{ServerApiVersion, missing_version_error};
use serde_json::{Map, Value, json};

pub const FIELD_VERSION: &str = "version";
pub const FIELD_STRICT: &str = "strict";
pub const FIELD_DEPRECATION_ERRORS: &str = "deprecationErrors";

pub fn decode_value(raw: &Value) -> Result<ServerApi, Error> {
    let Some(object) = raw.as_object() else {
        return Err(Error::new(ErrorKind::Malformed).with_message(format!(
            "expected an options object, got {}",
            value_type_name(raw)
        )));
    };

    let mut remaining = object.clone();
    let version_value = remaining.remove(FIELD_VERSION);
    let strict_value = remaining.remove(FIELD_STRICT);
    let deprecation_value = remaining.remove(FIELD_DEPRECATION_ERRORS);

    if !remaining.is_empty() {
        // Sorted so the error text is deterministic regardless of input order.
        let mut fields: Vec<String> = remaining.keys().cloned().collect();
        fields.sort_unstable();
        return Err(Error::new(ErrorKind::UnrecognizedField)
            .with_message("unrecognized fields for server API options")
            .with_fields(fields)
            .with_hint(format!(
                "Recognized fields: {FIELD_VERSION}, {FIELD_STRICT}, {FIELD_DEPRECATION_ERRORS}."
            )));
    }

    let version = decode_version(version_value.as_ref())?;
    let mut options = ServerApi::new(version);
    if let Some(strict) = optional_bool(strict_value.as_ref(), FIELD_STRICT)? {
        options = options.with_strict(strict);
    }
    if let Some(deprecation_errors) =
        optional_bool(deprecation_value.as_ref(), FIELD_DEPRECATION_ERRORS)?
    {
        options = options.with_deprecation_errors(deprecation_errors);
    }
    Ok(options)
}

pub fn encode_value(options: &ServerApi) -> Value {
    let mut map = Map::new();
    map.insert(FIELD_VERSION.to_string(), json!(options.version().as_str()));
    if let Some(strict) = options.strict() {
        map.insert(FIELD_STRICT.to_string(), json!(strict));
    }
    if let Some(deprecation_errors) = options.deprecation_errors() {
        map.insert(FIELD_DEPRECATION_ERRORS.to_string(), json!(deprecation_errors));
    }
    Value::Object(map)
}

fn decode_version(value: Option<&Value>) -> Result<ServerApiVersion, Error> {
    match value {
        // A null version is "not provided", and the version is required.
        None | Some(Value::Null) => Err(missing_version_error()),
        Some(Value::String(text)) => ServerApiVersion::parse(text),
        Some(other) => Err(Error::new(ErrorKind::Malformed).with_message(format!(
            "{FIELD_VERSION} must be a string, got {}",
            value_type_name(other)
        ))),
    }
}

fn optional_bool(value: Option<&Value>, field: &str) -> Result<Option<bool>, Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(other) => Err(Error::new(ErrorKind::Malformed).with_message(format!(
            "{field} must be a boolean or null, got {}",
            value_type_name(other)
        ))),
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
