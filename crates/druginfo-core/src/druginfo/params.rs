//! Query parameters for the DrugInfo list endpoints
//!
//! Field names on the wire are the upstream query parameter names, which are
//! also the MCP tool argument names, so one struct serves both directions.
//! `None` fields are left out of the query string.

use serde::{Deserialize, Serialize};

/// `GET /main-ingredient` filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainIngredientQuery {
    pub a4: Option<bool>,
    #[serde(rename = "a4Off")]
    pub a4_off: Option<bool>,
    pub a5: Option<bool>,
    #[serde(rename = "a5Off")]
    pub a5_off: Option<bool>,
    pub drugkind: Option<bool>,
    #[serde(rename = "drugkindOff")]
    pub drugkind_off: Option<bool>,
    pub effect: Option<bool>,
    #[serde(rename = "effectOff")]
    pub effect_off: Option<bool>,
    #[serde(rename = "showMapped")]
    pub show_mapped: Option<bool>,
    #[serde(rename = "IngredientCode")]
    pub ingredient_code: Option<String>,
    #[serde(rename = "ingredientNameKor")]
    pub ingredient_name_kor: Option<String>,
    #[serde(rename = "drugKind")]
    pub drug_kind: Option<String>,
    #[serde(rename = "PageSize")]
    pub page_size: Option<u32>,
    #[serde(rename = "Page")]
    pub page: Option<u32>,
    #[serde(rename = "SortBy")]
    pub sort_by: Option<String>,
    /// Legacy free-text search
    pub q: Option<String>,
    /// Legacy alias for `Page`
    #[serde(rename = "page")]
    pub legacy_page: Option<u32>,
    /// Legacy alias for `PageSize`
    #[serde(rename = "size")]
    pub legacy_size: Option<u32>,
}

impl MainIngredientQuery {
    /// Resolve `PageSize`/`Page`, honoring the legacy `size`/`page` aliases
    pub fn with_page_defaults(mut self, page_size: u32, page: u32) -> Self {
        self.page_size = self.page_size.or(self.legacy_size).or(Some(page_size));
        self.page = self.page.or(self.legacy_page).or(Some(page));
        self
    }
}

/// `GET /product` filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub crop: Option<bool>,
    #[serde(rename = "cropOff")]
    pub crop_off: Option<bool>,
    pub base64: Option<bool>,
    #[serde(rename = "base64Off")]
    pub base64_off: Option<bool>,
    pub watermark: Option<bool>,
    #[serde(rename = "watermarkOff")]
    pub watermark_off: Option<bool>,
    pub confirm: Option<bool>,
    #[serde(rename = "confirmOff")]
    pub confirm_off: Option<bool>,
    #[serde(rename = "teoulLengthShort")]
    pub teoul_length_short: Option<bool>,
    #[serde(rename = "teoulLengthShortOff")]
    pub teoul_length_short_off: Option<bool>,
    #[serde(rename = "teoulLengthLong")]
    pub teoul_length_long: Option<bool>,
    #[serde(rename = "teoulLengthLongOff")]
    pub teoul_length_long_off: Option<bool>,
    #[serde(rename = "minCount")]
    pub min_count: Option<i64>,
    #[serde(rename = "ProductCode")]
    pub product_code: Option<String>,
    #[serde(rename = "pillName")]
    pub pill_name: Option<String>,
    pub vendor: Option<String>,
    #[serde(rename = "PageSize")]
    pub page_size: Option<u32>,
    #[serde(rename = "Page")]
    pub page: Option<u32>,
    #[serde(rename = "SortBy")]
    pub sort_by: Option<String>,
    pub q: Option<String>,
    #[serde(rename = "page")]
    pub legacy_page: Option<u32>,
    #[serde(rename = "size")]
    pub legacy_size: Option<u32>,
}

impl ProductQuery {
    pub fn with_page_defaults(mut self, page_size: u32, page: u32) -> Self {
        self.page_size = self.page_size.or(self.legacy_size).or(Some(page_size));
        self.page = self.page.or(self.legacy_page).or(Some(page));
        self
    }
}

/// Shared filters of the drug-effect, drug-kind and guide catalogs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub edit: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
    pub page: Option<u32>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

impl CatalogQuery {
    pub fn with_page_defaults(mut self, page_size: u32, page: u32) -> Self {
        self.page_size = self.page_size.or(Some(page_size));
        self.page = self.page.or(Some(page));
        self
    }
}

/// `GET /main-ingredient/picto` filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PictoQuery {
    #[serde(rename = "IsDeleted")]
    pub is_deleted: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "PageSize")]
    pub page_size: Option<u32>,
    #[serde(rename = "Page")]
    pub page: Option<u32>,
    #[serde(rename = "SortBy")]
    pub sort_by: Option<String>,
}

impl PictoQuery {
    pub fn with_page_defaults(mut self, page_size: u32, page: u32) -> Self {
        self.page_size = self.page_size.or(Some(page_size));
        self.page = self.page.or(Some(page));
        self
    }
}

/// `GET /product/edicode` filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductEdiCodeQuery {
    #[serde(rename = "ProductCode")]
    pub product_code: Option<String>,
    #[serde(rename = "EdiCode")]
    pub edi_code: Option<String>,
    #[serde(rename = "PageSize")]
    pub page_size: Option<u32>,
    #[serde(rename = "Page")]
    pub page: Option<u32>,
    #[serde(rename = "SortBy")]
    pub sort_by: Option<String>,
}

impl ProductEdiCodeQuery {
    pub fn with_page_defaults(mut self, page_size: u32, page: u32) -> Self {
        self.page_size = self.page_size.or(Some(page_size));
        self.page = self.page.or(Some(page));
        self
    }
}

/// `GET /product/edicode/same-ingredient` filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SameIngredientQuery {
    #[serde(rename = "ProductCode")]
    pub product_code: Option<String>,
    #[serde(rename = "EdiCode")]
    pub edi_code: Option<String>,
    #[serde(rename = "MasterIngredientCode")]
    pub master_ingredient_code: Option<String>,
    #[serde(rename = "PageSize")]
    pub page_size: Option<u32>,
}
