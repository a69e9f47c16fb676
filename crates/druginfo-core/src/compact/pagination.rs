//! Pagination metadata and the common list envelope

use serde::Serialize;
use serde_json::Value;

use super::document::{as_integer, is_truthy};

const TOTAL_KEYS: [&str; 4] = ["totalCount", "TotalCount", "count", "total"];

/// Paging facts recovered from an upstream section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub total: i64,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub has_more: Option<bool>,
}

/// `first` unless it is falsy, then `second`
fn first_truthy<'a>(section: &'a Value, first: &str, second: &str) -> Option<&'a Value> {
    section
        .get(first)
        .filter(|v| is_truthy(v))
        .or_else(|| section.get(second))
}

/// Derive paging metadata.
///
/// Without an upstream total, `total` falls back to the number of items on
/// this page.
pub fn page_meta(section: &Value, item_count: usize) -> PageMeta {
    let total = TOTAL_KEYS
        .iter()
        .find_map(|key| section.get(*key).and_then(as_integer));
    let page = first_truthy(section, "page", "Page").and_then(as_integer);
    let page_size = first_truthy(section, "pageSize", "PageSize").and_then(as_integer);

    let has_more = match (total, page, page_size) {
        (Some(total), Some(page), Some(size)) => Some(
            page.checked_mul(size)
                .and_then(|seen| total.checked_sub(seen))
                .map_or(false, |remaining| remaining > 0),
        ),
        _ => None,
    };

    PageMeta {
        total: total.unwrap_or(item_count as i64),
        page,
        page_size,
        has_more,
    }
}

/// The compact list envelope every list tool returns
#[derive(Debug, Clone, Serialize)]
pub struct CompactList<T> {
    pub items: Vec<T>,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(rename = "hasMore", skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl<T> CompactList<T> {
    /// Wrap items with metadata; page fields appear only as a complete pair
    pub fn wrap(section: &Value, items: Vec<T>) -> Self {
        let meta = page_meta(section, items.len());
        let (page, page_size, has_more) = match (meta.page, meta.page_size) {
            (Some(page), Some(size)) => (Some(page), Some(size), Some(meta.has_more.unwrap_or(false))),
            _ => (None, None, None),
        };

        Self {
            items,
            total: meta.total,
            page,
            page_size,
            has_more,
        }
    }
}
