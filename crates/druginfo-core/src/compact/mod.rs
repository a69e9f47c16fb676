//! Response compaction
//!
//! DrugInfo responses are large and shaped differently per endpoint. Tool
//! results go straight into an LLM context, so each response is reduced to a
//! handful of normalized fields before it is returned.
//!
//! Compaction is best-effort: [`safe_compact`] falls back to the raw payload
//! whenever a compactor fails, so it can never turn a successful API call
//! into a failed tool call.

mod document;
mod korange;
mod pagination;
mod records;

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub use document::{
    as_integer, extract_items, is_blank, is_empty_field, is_truthy, pick, pick_in,
    primary_section, ITEM_LIST_KEYS,
};
pub use korange::{compact_korange, KORANGE_FIELDS};
pub use pagination::{page_meta, CompactList, PageMeta};
pub use records::{
    compact_generic_list, compact_main_ingredient_detail, compact_main_ingredient_list,
    compact_product_detail, compact_product_edicode_list, compact_product_list,
    compact_same_ingredient_list, IngredientDetail, IngredientSummary, ProductDetail,
    ProductSummary, SameIngredientProduct,
};

/// Why a compactor gave up on a payload
#[derive(Debug, Error)]
pub enum CompactError {
    #[error("unexpected payload shape: {0}")]
    UnexpectedShape(&'static str),

    #[error("failed to serialize compact record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Which compact shape a tool's response is reduced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compaction {
    MainIngredientList,
    MainIngredientDetail,
    ProductList,
    ProductEdiCodeList,
    ProductDetail,
    SameIngredientList,
    GenericList,
    /// Return the upstream payload untouched
    Passthrough,
}

fn to_json<T: Serialize>(record: T) -> Result<Value, CompactError> {
    Ok(serde_json::to_value(record)?)
}

impl Compaction {
    /// Run the compactor; errors mean "use the raw payload instead"
    pub fn apply(self, raw: &Value) -> Result<Value, CompactError> {
        match self {
            Self::MainIngredientList => to_json(compact_main_ingredient_list(raw)),
            Self::MainIngredientDetail => to_json(compact_main_ingredient_detail(raw)?),
            Self::ProductList => to_json(compact_product_list(raw)),
            Self::ProductEdiCodeList => to_json(compact_product_edicode_list(raw)),
            Self::ProductDetail => to_json(compact_product_detail(raw)?),
            Self::SameIngredientList => to_json(compact_same_ingredient_list(raw)),
            Self::GenericList => to_json(compact_generic_list(raw)),
            Self::Passthrough => Ok(raw.clone()),
        }
    }
}

/// Compact `payload`, or hand it back unchanged if compaction fails
pub fn safe_compact(compaction: Compaction, payload: Value) -> Value {
    if compaction == Compaction::Passthrough {
        return payload;
    }
    safe_compact_with(|raw| compaction.apply(raw), payload)
}

/// [`safe_compact`] for an arbitrary compactor.
///
/// Both an `Err` and a panic inside `compactor` yield the original payload.
pub fn safe_compact_with<F>(compactor: F, payload: Value) -> Value
where
    F: FnOnce(&Value) -> Result<Value, CompactError>,
{
    match catch_unwind(AssertUnwindSafe(|| compactor(&payload))) {
        Ok(Ok(compacted)) => compacted,
        Ok(Err(e)) => {
            debug!(error = %e, "Compaction failed, returning raw payload");
            payload
        }
        Err(_) => {
            warn!("Compactor panicked, returning raw payload");
            payload
        }
    }
}
