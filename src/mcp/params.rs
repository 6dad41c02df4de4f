//! MCP tool parameter types.
//!
//! Defines the input schemas for MCP tools using `schemars` for automatic
//! JSON Schema generation required by the MCP protocol.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::backend::{QueryArgs, RetrieveArgs};

/// Parameters for the `query_knowledge_base` MCP tool.
///
/// Retrieves relevant documents and generates an answer from them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryKnowledgeBaseParams {
    /// The workspace ID containing the knowledge bases.
    pub workspace_id: String,

    /// The natural language question to ask.
    pub query: String,

    /// Knowledge base IDs to search in (searches all if not provided).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_bases: Option<Vec<String>>,

    /// AI model to use for generation (backend default if not provided).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Previous conversation turns, oldest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<String>>,

    /// Number of top documents to retrieve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// Preferred language for the answer (e.g. `en`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,

    /// Message ID for tracking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

impl From<QueryKnowledgeBaseParams> for QueryArgs {
    fn from(p: QueryKnowledgeBaseParams) -> Self {
        Self {
            workspace_id: p.workspace_id,
            query: p.query,
            knowledge_bases: p.knowledge_bases,
            model: p.model,
            conversation_history: p.conversation_history,
            top_k: p.top_k,
            preferred_language: p.preferred_language,
            message_id: p.message_id,
        }
    }
}

/// Parameters for the `retrieve_from_knowledge_base` MCP tool.
///
/// Returns the most relevant documents without generating an answer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RetrieveParams {
    /// The workspace ID containing the knowledge bases.
    pub workspace_id: String,

    /// The search query used to find relevant documents.
    pub query: String,

    /// Knowledge base IDs to search in (searches all if not provided).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_bases: Option<Vec<String>>,

    /// Number of top documents to retrieve (server default if not provided).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl From<RetrieveParams> for RetrieveArgs {
    fn from(p: RetrieveParams) -> Self {
        Self {
            workspace_id: p.workspace_id,
            query: p.query,
            knowledge_bases: p.knowledge_bases,
            top_k: p.top_k,
        }
    }
}
