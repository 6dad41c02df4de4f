//! MCP server implementation for onlysaidkb-mcp.
//!
//! Exposes knowledge-base query and retrieval as MCP tools and the workspace
//! views as MCP resource templates. Backend failures are returned as tool
//! results flagged `is_error`, never as protocol errors.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, Implementation, ListResourceTemplatesResult,
    PaginatedRequestParams, ProtocolVersion, RawResourceTemplate, ReadResourceRequestParams,
    ReadResourceResult, ResourceContents, ResourceTemplate, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, tool, tool_handler, tool_router};

use crate::adapter::{KbAdapter, KbResource, SCHEME, ToolOutcome};
use crate::config::KbConfig;

use super::params::{QueryKnowledgeBaseParams, RetrieveParams};

/// Renders an outcome as a tool result: JSON text, `is_error` on failure.
fn outcome_result(outcome: ToolOutcome) -> Result<CallToolResult, McpError> {
    let is_success = outcome.is_success();
    let json = serde_json::to_string_pretty(&outcome.into_value())
        .map_err(|e| McpError::internal_error(format!("Serialization error: {e}"), None))?;

    if is_success {
        Ok(CallToolResult::success(vec![Content::text(json)]))
    } else {
        Ok(CallToolResult::error(vec![Content::text(json)]))
    }
}

fn resource_templates() -> Vec<ResourceTemplate> {
    let template = |uri_template: &str, name: &str, description: &str| RawResourceTemplate {
        uri_template: format!("{SCHEME}{uri_template}"),
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        mime_type: Some("application/json".to_string()),
        icons: None,
    };

    vec![
        template(
            "workspace/{workspace_id}/knowledge_bases",
            "Knowledge bases",
            "Returns the knowledge bases (data sources) in a workspace as a JSON list.",
        )
        .no_annotation(),
        template(
            "workspace/{workspace_id}/kb/{kb_id}/status",
            "Knowledge base status",
            "Returns the processing status of a specific knowledge base.",
        )
        .no_annotation(),
        template(
            "workspace/{workspace_id}/structure",
            "Workspace structure",
            "Returns data sources, folder structures and documents of a workspace.",
        )
        .no_annotation(),
    ]
}

/// OnlysaidKB MCP server.
///
/// Provides MCP tools for querying and retrieving from knowledge bases and
/// MCP resources for browsing workspace views.
#[derive(Clone)]
pub struct KbMcpServer {
    tool_router: ToolRouter<Self>,
    adapter: KbAdapter,
}

#[tool_router]
impl KbMcpServer {
    /// Query knowledge bases and get an AI-generated answer (non-streaming).
    #[tool(
        name = "query_knowledge_base",
        description = "Query knowledge bases with natural language and get AI-generated answers. Retrieves relevant documents from the workspace's knowledge bases, then generates a complete (non-streaming) answer from them. Returns the backend response as JSON with a `_debug` field describing the request."
    )]
    async fn query_knowledge_base(
        &self,
        Parameters(params): Parameters<QueryKnowledgeBaseParams>,
    ) -> Result<CallToolResult, McpError> {
        outcome_result(self.adapter.query(params.into()).await)
    }

    /// Retrieve relevant documents without generation.
    #[tool(
        name = "retrieve_from_knowledge_base",
        description = "Retrieve relevant documents from knowledge bases without AI generation. Returns the top matching documents with scores, sources and text, for when you want raw content to process yourself."
    )]
    async fn retrieve_from_knowledge_base(
        &self,
        Parameters(params): Parameters<RetrieveParams>,
    ) -> Result<CallToolResult, McpError> {
        outcome_result(self.adapter.retrieve(params.into()).await)
    }
}

#[tool_handler]
impl ServerHandler for KbMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "onlysaidkb-mcp".to_string(),
                title: Some("OnlysaidKB MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "OnlysaidKB: knowledge-base access for a workspace. Use \
                 `query_knowledge_base` for generated answers and \
                 `retrieve_from_knowledge_base` for raw documents. Browse \
                 knowledge bases, their status and workspace structure via \
                 resource templates."
                    .to_string(),
            ),
        }
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParams { uri, .. }: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let resource = KbResource::parse(&uri).ok_or_else(|| {
            McpError::invalid_params(
                format!(
                    "Invalid URI: {uri}. Expected {SCHEME}workspace/{{workspace_id}}/knowledge_bases, \
                     {SCHEME}workspace/{{workspace_id}}/kb/{{kb_id}}/status or \
                     {SCHEME}workspace/{{workspace_id}}/structure"
                ),
                None,
            )
        })?;

        let content = self.adapter.read(&resource).await;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(content, uri)],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            resource_templates: resource_templates(),
            next_cursor: None,
            meta: None,
        })
    }
}

impl KbMcpServer {
    /// Creates a new MCP server over the given configuration.
    #[must_use]
    pub fn new(config: Arc<KbConfig>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            adapter: KbAdapter::new(config),
        }
    }
}
