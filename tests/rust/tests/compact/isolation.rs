//! A failing compactor never fails the tool call

use druginfo_core::compact::{safe_compact_with, CompactError};
use druginfo_core::{safe_compact, Compaction};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_detail_of_unexpected_shape_returns_raw() {
    let raw = json!("maintenance");
    assert_eq!(safe_compact(Compaction::MainIngredientDetail, raw.clone()), raw);
}

#[test]
fn test_erroring_compactor_returns_raw() {
    let raw = json!({"items": [{"productCode": "P1"}]});
    let out = safe_compact_with(|_| Err(CompactError::UnexpectedShape("test")), raw.clone());
    assert_eq!(out, raw);
}

#[test]
fn test_panicking_compactor_returns_raw() {
    let raw = json!({"items": [{"productCode": "P1"}]});
    let out = safe_compact_with(|value| panic!("bad payload: {}", value), raw.clone());
    assert_eq!(out, raw);
}
