//! Translation of tool calls into backend requests.
//!
//! [`KbAdapter`] owns the immutable configuration and turns each call into
//! exactly one backend request. Tool calls always resolve to a
//! [`ToolOutcome`]; resource reads always resolve to text.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::outcome::{Operation, ToolFailure, ToolOutcome};
use super::resource::KbResource;
use crate::backend::{BackendClient, QueryArgs, QueryPayload, RetrieveArgs, RetrievePayload};
use crate::config::KbConfig;
use crate::error::BackendError;

/// Adapter between tool calls and the knowledge-base backend.
#[derive(Debug, Clone)]
pub struct KbAdapter {
    config: Arc<KbConfig>,
    client: BackendClient,
}

impl KbAdapter {
    /// Creates an adapter over the given configuration.
    #[must_use]
    pub fn new(config: Arc<KbConfig>) -> Self {
        let client = BackendClient::new(&config);
        Self { config, client }
    }

    /// Queries the knowledge bases and returns a generated answer.
    pub async fn query(&self, args: QueryArgs) -> ToolOutcome {
        if args.query.is_empty() {
            warn!(workspace_id = %args.workspace_id, "Forwarding query with empty text");
        }
        let payload = QueryPayload::from_args(args);
        let config_used = json!({
            "base_url": self.config.base_url,
            "default_model": self.config.default_model,
            "default_top_k": self.config.default_top_k,
            "default_language": self.config.default_language,
        });
        self.forward(Operation::Query, &payload, config_used).await
    }

    /// Retrieves raw documents without answer generation.
    pub async fn retrieve(&self, args: RetrieveArgs) -> ToolOutcome {
        if args.query.is_empty() {
            warn!(workspace_id = %args.workspace_id, "Forwarding retrieval with empty text");
        }
        let payload = RetrievePayload::from_args(args, &self.config);
        let config_used = json!({
            "base_url": self.config.base_url,
            "default_top_k": self.config.default_top_k,
        });
        self.forward(Operation::Retrieve, &payload, config_used)
            .await
    }

    async fn forward<T: Serialize>(
        &self,
        operation: Operation,
        payload: &T,
        config_used: Value,
    ) -> ToolOutcome {
        let parameters = serde_json::to_value(payload).unwrap_or(Value::Null);
        debug!(endpoint = operation.endpoint(), "Forwarding tool call");

        match self.client.post_json(operation.endpoint(), payload).await {
            Ok(body) => ToolOutcome::Success {
                body,
                operation,
                parameters,
                config_used,
            },
            Err(err) => {
                let failure = ToolFailure::from_backend(operation, parameters, &err);
                warn!(
                    endpoint = operation.endpoint(),
                    status = ?failure.status_code,
                    error_type = failure.kind.as_str(),
                    error = %failure.message,
                    "Backend call failed"
                );
                ToolOutcome::Failure(failure)
            }
        }
    }

    /// Reads a resource view as pretty-printed JSON text.
    ///
    /// Failures are returned as `Error retrieving <resource>: <reason>`.
    pub async fn read(&self, resource: &KbResource) -> String {
        match self.fetch(resource).await {
            Ok(text) => text,
            Err(err) => {
                warn!(%resource, error = %err, "Resource read failed");
                format!("Error retrieving {}: {err}", resource.label())
            }
        }
    }

    async fn fetch(&self, resource: &KbResource) -> Result<String, BackendError> {
        let view = self.client.get_json(&resource.backend_path()).await?;
        let selected = match (resource, view) {
            (KbResource::KnowledgeBases { .. }, Value::Object(mut map)) => map
                .remove("dataSources")
                .unwrap_or_else(|| Value::Array(Vec::new())),
            (KbResource::KnowledgeBases { .. }, _) => {
                return Err(BackendError::UnexpectedShape {
                    expected: "JSON object",
                });
            }
            (KbResource::KbStatus { .. } | KbResource::Structure { .. }, view) => view,
        };
        Ok(serde_json::to_string_pretty(&selected)?)
    }

    /// Lists the knowledge bases (`dataSources`) of a workspace.
    pub async fn list_knowledge_bases(&self, workspace_id: &str) -> String {
        self.read(&KbResource::KnowledgeBases {
            workspace_id: workspace_id.to_string(),
        })
        .await
    }

    /// Returns the processing status of one knowledge base.
    pub async fn kb_status(&self, workspace_id: &str, kb_id: &str) -> String {
        self.read(&KbResource::KbStatus {
            workspace_id: workspace_id.to_string(),
            kb_id: kb_id.to_string(),
        })
        .await
    }

    /// Returns the full structure view of a workspace.
    pub async fn workspace_structure(&self, workspace_id: &str) -> String {
        self.read(&KbResource::Structure {
            workspace_id: workspace_id.to_string(),
        })
        .await
    }
}
