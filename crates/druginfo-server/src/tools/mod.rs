//! Tool dispatch
//!
//! Each tool decodes its arguments, fills in paging defaults, calls the
//! DrugInfo client through [`with_reauth`], and compacts the response.

pub mod definitions;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use druginfo_core::auth::token_preview;
use druginfo_core::druginfo::{
    CatalogQuery, MainIngredientQuery, PictoQuery, ProductEdiCodeQuery, ProductQuery,
    SameIngredientQuery,
};
use druginfo_core::{
    safe_compact, with_reauth, AuthManager, Compaction, DrugInfoClient, DrugInfoError,
};
use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use definitions::*;

pub use definitions::tool_definitions;

/// Why a tool call did not produce a result
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Error: {0}")]
    DrugInfo(#[from] DrugInfoError),
}

/// Successful tool result
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Compacted (or raw) upstream JSON
    Json(Value),
    /// Plain text message
    Text(String),
}

/// Arguments shared by every upstream tool, around the tool-specific query
#[derive(Debug, Deserialize)]
struct ToolArgs<Q> {
    #[serde(flatten)]
    query: Q,
    /// Seconds
    timeout: Option<u64>,
}

impl<Q> ToolArgs<Q> {
    fn timeout(&self) -> Option<Duration> {
        self.timeout.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize)]
struct LoginArgs {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    password: Option<String>,
    force: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CodeArg {
    code: String,
}

#[derive(Debug, Deserialize)]
struct EffectIdArg {
    #[serde(rename = "effectId")]
    effect_id: EffectId,
}

/// Drug-effect ids are numeric upstream; string forms are accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EffectId {
    Number(i64),
    Text(String),
}

impl EffectId {
    fn to_segment(&self) -> String {
        match self {
            Self::Number(id) => id.to_string(),
            Self::Text(id) => id.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RecordKind {
    Ingredient,
    Product,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    #[serde(rename = "type")]
    kind: RecordKind,
    query: String,
    #[serde(rename = "PageSize")]
    page_size: Option<u32>,
    #[serde(rename = "Page")]
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DetailArgs {
    #[serde(rename = "type")]
    kind: RecordKind,
    code: String,
}

fn parse<T: DeserializeOwned>(arguments: &JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(arguments.clone()))
        .map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Runs tool calls against a shared session and client
pub struct DrugInfoTools {
    auth: Arc<AuthManager>,
    client: Arc<DrugInfoClient>,
}

impl DrugInfoTools {
    pub fn new(auth: Arc<AuthManager>, client: Arc<DrugInfoClient>) -> Self {
        Self { auth, client }
    }

    pub fn auth(&self) -> &Arc<AuthManager> {
        &self.auth
    }

    /// Dispatch one tool call by name
    pub async fn call(&self, name: &str, arguments: &JsonObject) -> Result<ToolOutput, ToolError> {
        let client = &*self.client;

        match name {
            LOGIN => self.login(parse(arguments)?).await,

            LIST_MAIN_INGREDIENT => {
                let args: ToolArgs<MainIngredientQuery> = parse(arguments)?;
                let timeout = args.timeout();
                let query = &args.query.with_page_defaults(5, 1);
                self.fetch(Compaction::MainIngredientList, move || {
                    client.list_main_ingredient(query, timeout)
                })
                .await
            }
            GET_MAIN_INGREDIENT => {
                let args: ToolArgs<CodeArg> = parse(arguments)?;
                let timeout = args.timeout();
                let code = args.query.code.as_str();
                self.fetch(Compaction::MainIngredientDetail, move || {
                    client.get_main_ingredient(code, timeout)
                })
                .await
            }
            LIST_PRODUCT => {
                let args: ToolArgs<ProductQuery> = parse(arguments)?;
                let timeout = args.timeout();
                let query = &args.query.with_page_defaults(5, 1);
                self.fetch(Compaction::ProductList, move || {
                    client.list_product(query, timeout)
                })
                .await
            }
            GET_PRODUCT => {
                let args: ToolArgs<CodeArg> = parse(arguments)?;
                let timeout = args.timeout();
                let code = args.query.code.as_str();
                self.fetch(Compaction::ProductDetail, move || {
                    client.get_product(code, timeout)
                })
                .await
            }
            LIST_DRUG_EFFECT | LIST_DRUG_KIND | LIST_GUIDE_A4 | LIST_GUIDE_A5 => {
                let args: ToolArgs<CatalogQuery> = parse(arguments)?;
                let timeout = args.timeout();
                let query = &args.query.with_page_defaults(10, 1);
                self.fetch(Compaction::GenericList, move || async move {
                    match name {
                        LIST_DRUG_EFFECT => client.list_drug_effect(query, timeout).await,
                        LIST_DRUG_KIND => client.list_drug_kind(query, timeout).await,
                        LIST_GUIDE_A4 => client.list_guide_a4(query, timeout).await,
                        _ => client.list_guide_a5(query, timeout).await,
                    }
                })
                .await
            }
            GET_DRUG_EFFECT => {
                let args: ToolArgs<EffectIdArg> = parse(arguments)?;
                let timeout = args.timeout();
                let effect_id = args.query.effect_id.to_segment();
                let effect_id = effect_id.as_str();
                self.fetch(Compaction::Passthrough, move || {
                    client.get_drug_effect(effect_id, timeout)
                })
                .await
            }
            LIST_PICTO => {
                let args: ToolArgs<PictoQuery> = parse(arguments)?;
                let timeout = args.timeout();
                let query = &args.query.with_page_defaults(5, 1);
                self.fetch(Compaction::GenericList, move || {
                    client.list_picto(query, timeout)
                })
                .await
            }
            GET_PICTO => {
                let args: ToolArgs<CodeArg> = parse(arguments)?;
                let timeout = args.timeout();
                let code = args.query.code.as_str();
                self.fetch(Compaction::Passthrough, move || {
                    client.get_picto(code, timeout)
                })
                .await
            }
            LIST_PRODUCT_EDICODE => {
                let args: ToolArgs<ProductEdiCodeQuery> = parse(arguments)?;
                let timeout = args.timeout();
                let query = &args.query.with_page_defaults(5, 1);
                self.fetch(Compaction::ProductEdiCodeList, move || {
                    client.list_product_edicode(query, timeout)
                })
                .await
            }
            LIST_SAME_INGREDIENT | FIND_SAME_INGREDIENT => {
                let args: ToolArgs<SameIngredientQuery> = parse(arguments)?;
                let timeout = args.timeout();
                let mut query = args.query;
                if name == FIND_SAME_INGREDIENT {
                    query.page_size = query.page_size.or(Some(20));
                }
                let query = &query;
                self.fetch(Compaction::SameIngredientList, move || {
                    client.list_same_ingredient(query, timeout)
                })
                .await
            }
            SEARCH => {
                let args: ToolArgs<SearchArgs> = parse(arguments)?;
                let timeout = args.timeout();
                self.search(args.query, timeout).await
            }
            GET_DETAIL => {
                let args: ToolArgs<DetailArgs> = parse(arguments)?;
                let timeout = args.timeout();
                let code = args.query.code.as_str();
                match args.query.kind {
                    RecordKind::Ingredient => {
                        self.fetch(Compaction::MainIngredientDetail, move || {
                            client.get_main_ingredient(code, timeout)
                        })
                        .await
                    }
                    RecordKind::Product => {
                        self.fetch(Compaction::ProductDetail, move || {
                            client.get_product(code, timeout)
                        })
                        .await
                    }
                }
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    async fn login(&self, args: LoginArgs) -> Result<ToolOutput, ToolError> {
        let force = args.force.unwrap_or(self.auth.config().force_login);
        let token = self
            .auth
            .login(args.user_id.as_deref(), args.password.as_deref(), force)
            .await?;
        Ok(ToolOutput::Text(format!(
            "Login succeeded. Token: {}",
            token_preview(&token)
        )))
    }

    async fn search(
        &self,
        args: SearchArgs,
        timeout: Option<Duration>,
    ) -> Result<ToolOutput, ToolError> {
        let client = &*self.client;
        let page_size = args.page_size.unwrap_or(20);
        let page = args.page.unwrap_or(1);

        match args.kind {
            RecordKind::Ingredient => {
                let query = &MainIngredientQuery {
                    ingredient_name_kor: Some(args.query),
                    page_size: Some(page_size),
                    page: Some(page),
                    ..Default::default()
                };
                self.fetch(Compaction::MainIngredientList, move || {
                    client.list_main_ingredient(query, timeout)
                })
                .await
            }
            RecordKind::Product => {
                let query = &ProductQuery {
                    pill_name: Some(args.query),
                    page_size: Some(page_size),
                    page: Some(page),
                    ..Default::default()
                };
                self.fetch(Compaction::ProductList, move || {
                    client.list_product(query, timeout)
                })
                .await
            }
        }
    }

    /// Call upstream with one reauth retry, then compact
    async fn fetch<F, Fut>(&self, compaction: Compaction, op: F) -> Result<ToolOutput, ToolError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = druginfo_core::Result<Value>>,
    {
        let raw = with_reauth(&self.auth, op).await?;
        debug!(?compaction, "Compacting response");
        Ok(ToolOutput::Json(safe_compact(compaction, raw)))
    }
}
