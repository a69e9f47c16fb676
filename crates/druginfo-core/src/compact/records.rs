//! Typed compact records and the per-entity compactors

use serde::Serialize;
use serde_json::{Map, Value};

use super::document::{extract_items, is_empty_field, pick, primary_section};
use super::korange::compact_korange;
use super::pagination::CompactList;
use super::CompactError;

type Object = Map<String, Value>;

fn absent(value: &Option<Value>) -> bool {
    value.as_ref().map_or(true, is_empty_field)
}

// ============================================
// Ingredients
// ============================================

/// One main ingredient in a list result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSummary {
    #[serde(skip_serializing_if = "absent")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub code: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub master_code: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub atc_code: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub dosage_route: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub dosage_form: Option<Value>,
}

impl IngredientSummary {
    pub fn from_item(item: &Object) -> Self {
        Self {
            name: pick(item, &["ingredientNameKor", "ingredientName"]),
            code: pick(item, &["IngredientCode", "ingredientCode"]),
            master_code: pick(item, &["MasterIngredientCode", "masterIngredientCode"]),
            atc_code: pick(item, &["ATCCode", "atcCode"]),
            dosage_route: pick(item, &["DosageRoute", "dosageRoute"]),
            dosage_form: pick(item, &["DosageForm", "dosageForm"]),
        }
    }

    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.code,
            &self.master_code,
            &self.atc_code,
            &self.dosage_route,
            &self.dosage_form,
        ]
        .into_iter()
        .all(absent)
    }
}

/// A single main ingredient
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngredientDetail {
    #[serde(flatten)]
    pub summary: IngredientSummary,
    #[serde(skip_serializing_if = "absent")]
    pub description: Option<Value>,
}

impl IngredientDetail {
    pub fn from_item(item: &Object) -> Self {
        Self {
            summary: IngredientSummary::from_item(item),
            description: pick(item, &["description", "Description"]),
        }
    }
}

// ============================================
// Products
// ============================================

/// Fields shared by every product-shaped record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(skip_serializing_if = "absent")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub code: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub edi_code: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub vendor: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub master_code: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub dosage_form: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub strength: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub korange: Option<Object>,
}

impl ProductSummary {
    pub fn from_item(item: &Object) -> Self {
        Self {
            name: pick(item, &["productName", "productNameKor", "pillName", "itemName"]),
            code: pick(item, &["productCode", "ProductCode"]),
            edi_code: pick(item, &["ediCode", "EdiCode"]),
            vendor: pick(item, &["vendor", "Vendor", "companyName", "makerName"]),
            master_code: pick(item, &["masterIngredientCode", "MasterIngredientCode"]),
            dosage_form: pick(item, &["DosageForm", "dosageForm"]),
            strength: pick(item, &["strength", "Strength", "dose", "Dose"]),
            korange: compact_korange(item.get("korange")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.korange.is_none()
            && [
                &self.name,
                &self.code,
                &self.edi_code,
                &self.vendor,
                &self.master_code,
                &self.dosage_form,
                &self.strength,
            ]
            .into_iter()
            .all(absent)
    }
}

/// A single product with packaging and labeling details
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: ProductSummary,
    #[serde(skip_serializing_if = "absent")]
    pub ingredient: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub pack_unit: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub pack_qty: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub form: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub marketing: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub image: Option<Value>,
}

impl ProductDetail {
    pub fn from_item(item: &Object) -> Self {
        Self {
            product: ProductSummary::from_item(item),
            ingredient: pick(item, &["ingredientNameKor", "ingredient", "mainIngredientName"]),
            pack_unit: pick(item, &["packUnit", "PackUnit"]),
            pack_qty: pick(item, &["packQty", "PackQty"]),
            form: pick(item, &["form", "Form", "dosageForm"]),
            marketing: pick(item, &["marketingAuthorizationHolder", "marketingAuthorization"]),
            image: pick(item, &["imageUrl", "ImageURL", "image"]),
        }
    }
}

/// A product in a same-ingredient group, with its reference-drug markers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SameIngredientProduct {
    #[serde(flatten)]
    pub product: ProductSummary,
    #[serde(skip_serializing_if = "absent")]
    pub reference: Option<Value>,
    #[serde(skip_serializing_if = "absent")]
    pub is_original: Option<Value>,
}

impl SameIngredientProduct {
    pub fn from_item(item: &Object) -> Self {
        Self {
            product: ProductSummary::from_item(item),
            reference: pick(item, &["ReferenceProductCode", "referenceProductCode"]),
            is_original: pick(item, &["isOriginal", "IsOriginal"]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.product.is_empty() && absent(&self.reference) && absent(&self.is_original)
    }
}

// ============================================
// Compactors
// ============================================

fn detail_object(result: &Value) -> Result<&Object, CompactError> {
    primary_section(result)
        .as_object()
        .ok_or(CompactError::UnexpectedShape("detail payload is not an object"))
}

pub fn compact_main_ingredient_list(result: &Value) -> CompactList<IngredientSummary> {
    let section = primary_section(result);
    let items = extract_items(section)
        .into_iter()
        .map(IngredientSummary::from_item)
        .filter(|slim| !slim.is_empty())
        .collect();
    CompactList::wrap(section, items)
}

pub fn compact_main_ingredient_detail(result: &Value) -> Result<IngredientDetail, CompactError> {
    detail_object(result).map(IngredientDetail::from_item)
}

pub fn compact_product_list(result: &Value) -> CompactList<ProductSummary> {
    let section = primary_section(result);
    let items = extract_items(section)
        .into_iter()
        .map(ProductSummary::from_item)
        .filter(|slim| !slim.is_empty())
        .collect();
    CompactList::wrap(section, items)
}

/// EDI-code search results use the plain product shape
pub fn compact_product_edicode_list(result: &Value) -> CompactList<ProductSummary> {
    compact_product_list(result)
}

pub fn compact_product_detail(result: &Value) -> Result<ProductDetail, CompactError> {
    detail_object(result).map(ProductDetail::from_item)
}

pub fn compact_same_ingredient_list(result: &Value) -> CompactList<SameIngredientProduct> {
    let section = primary_section(result);
    let items = extract_items(section)
        .into_iter()
        .map(SameIngredientProduct::from_item)
        .filter(|slim| !slim.is_empty())
        .collect();
    CompactList::wrap(section, items)
}

/// Endpoints without a bespoke shape keep their items and gain paging
pub fn compact_generic_list(result: &Value) -> CompactList<Object> {
    let section = primary_section(result);
    let items = extract_items(section).into_iter().cloned().collect();
    CompactList::wrap(section, items)
}
