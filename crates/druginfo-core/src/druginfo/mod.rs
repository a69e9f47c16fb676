//! HTTP client for the EDB DrugInfo API.
//!
//! Every method is a single authenticated GET. The bearer token is read from
//! the [`AuthManager`] when the request is built, so a call repeated after a
//! re-login picks up the new token. Responses are returned as raw JSON;
//! shaping them for tool output is the job of [`crate::compact`].

mod params;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::auth::AuthManager;
use crate::config::Config;
use crate::error::{DrugInfoError, Result};

pub use params::{
    CatalogQuery, MainIngredientQuery, PictoQuery, ProductEdiCodeQuery, ProductQuery,
    SameIngredientQuery,
};

// ============================================
// Endpoint paths
// ============================================

pub const MAIN_INGREDIENT_PATH: &str = "/v1/druginfo/main-ingredient";
pub const DRUG_EFFECT_PATH: &str = "/v1/druginfo/main-ingredient/drug-effect";
pub const DRUG_KIND_PATH: &str = "/v1/druginfo/main-ingredient/drug-kind";
pub const GUIDE_A4_PATH: &str = "/v1/druginfo/main-ingredient/guide-a4";
pub const GUIDE_A5_PATH: &str = "/v1/druginfo/main-ingredient/guide-a5";
pub const PICTO_PATH: &str = "/v1/druginfo/main-ingredient/picto";
pub const PRODUCT_PATH: &str = "/v1/druginfo/product";
pub const PRODUCT_EDICODE_PATH: &str = "/v1/druginfo/product/edicode";
pub const SAME_INGREDIENT_PATH: &str = "/v1/druginfo/product/edicode/same-ingredient";

/// `{base}/{segment}` with the segment percent-encoded
fn item_path(base: &str, segment: &str, what: &str) -> Result<String> {
    let segment = segment.trim();
    if segment.is_empty() {
        return Err(DrugInfoError::validation(format!("{} is required", what)));
    }
    Ok(format!("{}/{}", base, urlencoding::encode(segment)))
}

/// Client for the DrugInfo endpoints
pub struct DrugInfoClient {
    config: Arc<Config>,
    http: reqwest::Client,
    auth: Arc<AuthManager>,
}

impl DrugInfoClient {
    pub fn new(config: Arc<Config>, http: reqwest::Client, auth: Arc<AuthManager>) -> Self {
        Self { config, http, auth }
    }

    pub fn auth(&self) -> &Arc<AuthManager> {
        &self.auth
    }

    // ============================================
    // Main ingredient
    // ============================================

    pub async fn list_main_ingredient(
        &self,
        query: &MainIngredientQuery,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        self.get_with(MAIN_INGREDIENT_PATH, query, timeout).await
    }

    pub async fn get_main_ingredient(&self, code: &str, timeout: Option<Duration>) -> Result<Value> {
        let path = item_path(MAIN_INGREDIENT_PATH, code, "ingredient code")?;
        self.get(&path, timeout).await
    }

    pub async fn list_drug_effect(
        &self,
        query: &CatalogQuery,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        self.get_with(DRUG_EFFECT_PATH, query, timeout).await
    }

    pub async fn get_drug_effect(&self, effect_id: &str, timeout: Option<Duration>) -> Result<Value> {
        let path = item_path(DRUG_EFFECT_PATH, effect_id, "effect id")?;
        self.get(&path, timeout).await
    }

    pub async fn list_drug_kind(
        &self,
        query: &CatalogQuery,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        self.get_with(DRUG_KIND_PATH, query, timeout).await
    }

    pub async fn list_guide_a4(
        &self,
        query: &CatalogQuery,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        self.get_with(GUIDE_A4_PATH, query, timeout).await
    }

    pub async fn list_guide_a5(
        &self,
        query: &CatalogQuery,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        self.get_with(GUIDE_A5_PATH, query, timeout).await
    }

    pub async fn list_picto(&self, query: &PictoQuery, timeout: Option<Duration>) -> Result<Value> {
        self.get_with(PICTO_PATH, query, timeout).await
    }

    pub async fn get_picto(&self, code: &str, timeout: Option<Duration>) -> Result<Value> {
        let path = item_path(PICTO_PATH, code, "picto code")?;
        self.get(&path, timeout).await
    }

    // ============================================
    // Product
    // ============================================

    pub async fn list_product(&self, query: &ProductQuery, timeout: Option<Duration>) -> Result<Value> {
        self.get_with(PRODUCT_PATH, query, timeout).await
    }

    pub async fn get_product(&self, code: &str, timeout: Option<Duration>) -> Result<Value> {
        let path = item_path(PRODUCT_PATH, code, "product code")?;
        self.get(&path, timeout).await
    }

    pub async fn list_product_edicode(
        &self,
        query: &ProductEdiCodeQuery,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        self.get_with(PRODUCT_EDICODE_PATH, query, timeout).await
    }

    pub async fn list_same_ingredient(
        &self,
        query: &SameIngredientQuery,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        self.get_with(SAME_INGREDIENT_PATH, query, timeout).await
    }

    // ============================================
    // Transport
    // ============================================

    async fn get(&self, path: &str, timeout: Option<Duration>) -> Result<Value> {
        self.send(path, self.request(path, timeout)).await
    }

    async fn get_with<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        self.send(path, self.request(path, timeout).query(query)).await
    }

    fn request(&self, path: &str, timeout: Option<Duration>) -> RequestBuilder {
        let request = self
            .http
            .get(self.config.api_url(path))
            .timeout(timeout.unwrap_or(self.config.timeout))
            .header(ACCEPT, "application/json");

        match self.auth.get_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();
        debug!(path, status = status.as_u16(), "DrugInfo response");

        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(DrugInfoError::Unauthorized(if body.is_empty() {
                format!("HTTP 401 from {}", path)
            } else {
                body
            }));
        }
        if !status.is_success() {
            return Err(DrugInfoError::Api {
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|e| DrugInfoError::InvalidResponse(format!("{} returned non-JSON body: {}", path, e)))
    }
}
