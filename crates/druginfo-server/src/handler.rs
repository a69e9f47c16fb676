//! DrugInfo MCP Handler
//!
//! Implements the rmcp `ServerHandler` trait: tools are dispatched to
//! [`DrugInfoTools`], resources and prompts are served from static tables.

use std::sync::Arc;

use druginfo_core::AuthManager;
use rmcp::{
    model::*, service::RequestContext, ErrorData as McpError, RoleServer, ServerHandler,
};
use tracing::{debug, info, warn};

use crate::tools::{tool_definitions, DrugInfoTools, ToolError, ToolOutput};
use crate::{prompts, resources};

#[derive(Clone)]
pub struct DrugInfoHandler {
    tools: Arc<DrugInfoTools>,
}

impl DrugInfoHandler {
    pub fn new(tools: Arc<DrugInfoTools>) -> Self {
        Self { tools }
    }

    pub fn auth(&self) -> &Arc<AuthManager> {
        self.tools.auth()
    }
}

fn text_result(text: String, structured: Option<serde_json::Value>, is_error: bool) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: structured,
        is_error: Some(is_error),
        meta: None,
    }
}

impl From<ToolOutput> for CallToolResult {
    fn from(output: ToolOutput) -> Self {
        match output {
            ToolOutput::Text(text) => text_result(text, None, false),
            ToolOutput::Json(value) => {
                let text = serde_json::to_string(&value).unwrap_or_else(|_| value.to_string());
                let structured = value.is_object().then_some(value);
                text_result(text, structured, false)
            }
        }
    }
}

impl ServerHandler for DrugInfoHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "druginfo-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "EDB DrugInfo lookup: main ingredients, products, EDI codes and \
                 same-ingredient (generic) search. Results are compacted; start with small \
                 PageSize values. See the druginfo_usage_guide prompt."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _params: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = tool_definitions();
        debug!(count = tools.len(), "list_tools");
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        params: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = %params.name, "call_tool");

        let arguments = params.arguments.unwrap_or_default();
        match self.tools.call(&params.name, &arguments).await {
            Ok(output) => Ok(output.into()),
            Err(ToolError::UnknownTool(name)) => Err(McpError::invalid_params(
                format!("Unknown tool: {}", name),
                None,
            )),
            Err(e) => {
                warn!(tool = %params.name, error = %e, "Tool call failed");
                Ok(text_result(e.to_string(), None, true))
            }
        }
    }

    async fn list_prompts(
        &self,
        _params: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        let items = prompts::list().map_err(|e| {
            McpError::internal_error(format!("Failed to build prompt list: {}", e), None)
        })?;
        Ok(ListPromptsResult::with_all_items(items))
    }

    async fn get_prompt(
        &self,
        params: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!(prompt = %params.name, "get_prompt");

        let rendered = prompts::render(&params.name, params.arguments.as_ref()).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown prompt: {}", params.name), None)
        })?;

        serde_json::from_value(rendered).map_err(|e| {
            McpError::internal_error(format!("Failed to build prompt result: {}", e), None)
        })
    }

    async fn list_resources(
        &self,
        _params: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(resources::list()))
    }

    async fn read_resource(
        &self,
        params: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        debug!(uri = %params.uri, "read_resource");

        let resource = resources::find(&params.uri).ok_or_else(|| {
            McpError::resource_not_found(format!("Unknown resource URI: {}", params.uri), None)
        })?;

        let contents: ResourceContents = serde_json::from_value(resource.contents())
            .map_err(|e| McpError::internal_error(format!("Failed to read resource: {}", e), None))?;

        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}
