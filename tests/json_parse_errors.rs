//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used by decode diagnostics.
//! Invariants: Category mapping remains deterministic for representative errors.
//! Invariants: Assertions target category/hint text only, never payload contents.
//! Notes: Uses source include to exercise internal helper logic without widening API surface.

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_eof_errors() {
    let syntax_err = parse::from_str::<Value>(r#"{"a":}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let eof_err = parse::from_str::<Value>(r#"{"a":"#).unwrap_err();
    assert_eq!(parse::categorize_error(&eof_err), ParseFailureCategory::Eof);
}

#[test]
fn category_mapping_handles_numeric_range_errors() {
    let err = parse::from_str::<Value>(r#"{"n":1e999}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&err),
        ParseFailureCategory::NumericRange
    );
}

#[test]
fn category_mapping_handles_depth_errors() {
    let depth = 200usize;
    let mut payload = String::with_capacity(depth * 2 + 1);
    for _ in 0..depth {
        payload.push('[');
    }
    payload.push('0');
    for _ in 0..depth {
        payload.push(']');
    }
    let err = parse::from_str::<Value>(&payload).unwrap_err();
    assert_eq!(
        parse::categorize_error(&err),
        ParseFailureCategory::DepthLimit
    );

    assert_eq!(
        parse::categorize_message("recursion limit exceeded while parsing"),
        ParseFailureCategory::DepthLimit
    );
}

#[test]
fn category_mapping_handles_data_errors() {
    let err = parse::from_str::<u64>(r#""text""#).unwrap_err();
    assert_eq!(parse::categorize_error(&err), ParseFailureCategory::Data);
}

#[test]
fn hint_contains_category_and_context() {
    let err = parse::from_str::<Value>(r#"{"n":1e999}"#).unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.contains("parse category: numeric-range"));
    assert!(hint.contains("context: test.context"));
}

#[test]
fn unknown_category_fallback_is_stable() {
    assert_eq!(
        parse::categorize_message("opaque parser issue"),
        ParseFailureCategory::Unknown
    );
}
