//! Tool names, descriptions and input schemas

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::{json, Value};

pub const LOGIN: &str = "login";
pub const LIST_MAIN_INGREDIENT: &str = "druginfo_list_main_ingredient";
pub const GET_MAIN_INGREDIENT: &str = "druginfo_get_main_ingredient_by_code";
pub const LIST_PRODUCT: &str = "druginfo_list_product";
pub const GET_PRODUCT: &str = "druginfo_get_product_by_code";
pub const LIST_DRUG_EFFECT: &str = "druginfo_list_main_ingredient_drug_effect";
pub const GET_DRUG_EFFECT: &str = "druginfo_get_main_ingredient_drug_effect_by_id";
pub const LIST_DRUG_KIND: &str = "druginfo_list_main_ingredient_drug_kind";
pub const LIST_GUIDE_A4: &str = "druginfo_list_main_ingredient_guide_a4";
pub const LIST_GUIDE_A5: &str = "druginfo_list_main_ingredient_guide_a5";
pub const LIST_PICTO: &str = "druginfo_list_main_ingredient_picto";
pub const GET_PICTO: &str = "druginfo_get_main_ingredient_picto_by_code";
pub const LIST_PRODUCT_EDICODE: &str = "druginfo_list_product_edicode";
pub const LIST_SAME_INGREDIENT: &str = "druginfo_list_product_edicode_same_ingredient";
pub const SEARCH: &str = "search_druginfo";
pub const GET_DETAIL: &str = "get_druginfo_detail";
pub const FIND_SAME_INGREDIENT: &str = "find_same_ingredient";

fn string(description: &str) -> Value {
    json!({"type": "string", "description": description})
}

fn boolean(description: &str) -> Value {
    json!({"type": "boolean", "description": description})
}

fn integer(description: &str) -> Value {
    json!({"type": "integer", "description": description})
}

fn integer_default(description: &str, default: u32) -> Value {
    json!({"type": "integer", "description": description, "default": default})
}

fn object_schema(properties: Value, required: &[&str]) -> Arc<JsonObject> {
    let mut schema = JsonObject::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), properties);
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    Arc::new(schema)
}

/// Schema for a tool that calls upstream; adds the per-call `timeout`
fn data_schema(mut properties: Value, required: &[&str]) -> Arc<JsonObject> {
    if let Value::Object(map) = &mut properties {
        map.insert(
            "timeout".into(),
            json!({
                "type": "integer",
                "minimum": 1,
                "description": "Request timeout in seconds (defaults to EDB_TIMEOUT)"
            }),
        );
    }
    object_schema(properties, required)
}

fn catalog_properties() -> Value {
    json!({
        "edit": string("Edit-state filter"),
        "pageSize": integer_default("Items per page", 10),
        "page": integer_default("1-based page number", 1),
        "sortBy": string("Sort key"),
    })
}

/// Every tool the server exposes, in listing order
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        Tool::new(
            LOGIN,
            "Log in to EDB and cache the access token. Arguments default to EDB_USER_ID / \
             EDB_PASSWORD; set force=true to end an existing session.",
            object_schema(
                json!({
                    "userId": string("Login id (email)"),
                    "password": string("Password"),
                    "force": boolean("Evict a concurrent session (defaults to EDB_FORCE_LOGIN)"),
                }),
                &[],
            ),
        ),
        Tool::new(
            LIST_MAIN_INGREDIENT,
            "Search main ingredients (주성분). Filter by ingredientNameKor, IngredientCode or \
             drugKind. Returns a compact list with paging metadata.",
            data_schema(
                json!({
                    "a4": boolean("Only ingredients with an A4 guide"),
                    "a4Off": boolean("Only ingredients without an A4 guide"),
                    "a5": boolean("Only ingredients with an A5 guide"),
                    "a5Off": boolean("Only ingredients without an A5 guide"),
                    "drugkind": boolean("Only ingredients with a drug kind"),
                    "drugkindOff": boolean("Only ingredients without a drug kind"),
                    "effect": boolean("Only ingredients with a drug effect"),
                    "effectOff": boolean("Only ingredients without a drug effect"),
                    "showMapped": boolean("Include mapping details"),
                    "IngredientCode": string("9-character main ingredient code"),
                    "ingredientNameKor": string("Korean ingredient name"),
                    "drugKind": string("Drug kind"),
                    "PageSize": integer_default("Items per page", 5),
                    "Page": integer_default("1-based page number", 1),
                    "SortBy": string("Sort key"),
                    "q": string("Free-text search (legacy)"),
                    "page": integer("Alias for Page (legacy)"),
                    "size": integer("Alias for PageSize (legacy)"),
                }),
                &[],
            ),
        ),
        Tool::new(
            GET_MAIN_INGREDIENT,
            "Get one main ingredient by its 9-character code.",
            data_schema(json!({"code": string("Main ingredient code")}), &["code"]),
        ),
        Tool::new(
            LIST_PRODUCT,
            "Search products (제품). Filter by pillName, ProductCode or vendor. Returns a \
             compact list including korange bioequivalence flags.",
            data_schema(
                json!({
                    "crop": boolean("Only products with a cropped image"),
                    "cropOff": boolean("Only products without a cropped image"),
                    "base64": boolean("Only products with a base64 image"),
                    "base64Off": boolean("Only products without a base64 image"),
                    "watermark": boolean("Only products with a watermarked image"),
                    "watermarkOff": boolean("Only products without a watermarked image"),
                    "confirm": boolean("Only confirmed products"),
                    "confirmOff": boolean("Only unconfirmed products"),
                    "teoulLengthShort": boolean("Only products with a short Teoul description"),
                    "teoulLengthShortOff": boolean("Exclude short Teoul descriptions"),
                    "teoulLengthLong": boolean("Only products with a long Teoul description"),
                    "teoulLengthLongOff": boolean("Exclude long Teoul descriptions"),
                    "minCount": integer("Minimum usage count"),
                    "ProductCode": string("15-character product code"),
                    "pillName": string("Product name"),
                    "vendor": string("Manufacturer"),
                    "PageSize": integer_default("Items per page", 5),
                    "Page": integer_default("1-based page number", 1),
                    "SortBy": string("Sort key"),
                    "q": string("Free-text search (legacy)"),
                    "page": integer("Alias for Page (legacy)"),
                    "size": integer("Alias for PageSize (legacy)"),
                }),
                &[],
            ),
        ),
        Tool::new(
            GET_PRODUCT,
            "Get one product by its 15-character ProductCode.",
            data_schema(json!({"code": string("Product code")}), &["code"]),
        ),
        Tool::new(
            LIST_DRUG_EFFECT,
            "List the drug-effect catalog of main ingredients.",
            data_schema(catalog_properties(), &[]),
        ),
        Tool::new(
            GET_DRUG_EFFECT,
            "Get one drug-effect entry by id.",
            data_schema(
                json!({"effectId": {"type": ["integer", "string"], "description": "Drug-effect id"}}),
                &["effectId"],
            ),
        ),
        Tool::new(
            LIST_DRUG_KIND,
            "List the drug-kind catalog of main ingredients.",
            data_schema(catalog_properties(), &[]),
        ),
        Tool::new(
            LIST_GUIDE_A4,
            "List the A4 medication guides of main ingredients.",
            data_schema(catalog_properties(), &[]),
        ),
        Tool::new(
            LIST_GUIDE_A5,
            "List the A5 medication guides of main ingredients.",
            data_schema(catalog_properties(), &[]),
        ),
        Tool::new(
            LIST_PICTO,
            "List medication pictograms.",
            data_schema(
                json!({
                    "IsDeleted": string("Deleted-state filter"),
                    "Title": string("Pictogram title"),
                    "PageSize": integer_default("Items per page", 5),
                    "Page": integer_default("1-based page number", 1),
                    "SortBy": string("Sort key"),
                }),
                &[],
            ),
        ),
        Tool::new(
            GET_PICTO,
            "Get one pictogram by code.",
            data_schema(json!({"code": string("Pictogram code")}), &["code"]),
        ),
        Tool::new(
            LIST_PRODUCT_EDICODE,
            "List products by EDI (insurance) code or ProductCode.",
            data_schema(
                json!({
                    "ProductCode": string("15-character product code"),
                    "EdiCode": string("9-digit EDI code"),
                    "PageSize": integer_default("Items per page", 5),
                    "Page": integer_default("1-based page number", 1),
                    "SortBy": string("Sort key"),
                }),
                &[],
            ),
        ),
        Tool::new(
            LIST_SAME_INGREDIENT,
            "List products sharing the same main ingredient. Cheapest way to find generics; \
             filter korange.생동PK afterwards.",
            data_schema(
                json!({
                    "ProductCode": string("15-character product code"),
                    "EdiCode": string("9-digit EDI code"),
                    "MasterIngredientCode": string("9-character main ingredient code"),
                }),
                &[],
            ),
        ),
        Tool::new(
            SEARCH,
            "의약품 검색: search main ingredients or products by name.",
            data_schema(
                json!({
                    "type": {
                        "type": "string",
                        "enum": ["ingredient", "product"],
                        "description": "ingredient=주성분, product=제품"
                    },
                    "query": string("검색어"),
                    "PageSize": integer_default("Items per page", 20),
                    "Page": integer_default("1-based page number", 1),
                }),
                &["type", "query"],
            ),
        ),
        Tool::new(
            GET_DETAIL,
            "의약품 상세 조회: get a main ingredient or product by code.",
            data_schema(
                json!({
                    "type": {
                        "type": "string",
                        "enum": ["ingredient", "product"],
                        "description": "ingredient=주성분(9자리), product=제품(15자리)"
                    },
                    "code": string("코드"),
                }),
                &["type", "code"],
            ),
        ),
        Tool::new(
            FIND_SAME_INGREDIENT,
            "동일 성분 의약품 검색: products sharing a main ingredient.",
            data_schema(
                json!({
                    "ProductCode": string("15-character product code"),
                    "EdiCode": string("9-digit EDI code"),
                    "MasterIngredientCode": string("9-character main ingredient code"),
                    "PageSize": integer_default("Items per page", 20),
                }),
                &[],
            ),
        ),
    ]
}
