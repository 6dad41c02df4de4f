//! Tool call outcomes.
//!
//! A tool call either passes the backend's object through (with a `_debug`
//! field added) or reports a normalized failure. Both arms render to a JSON
//! object; the MCP layer decides how to frame them.

use serde_json::{Map, Value, json};

use crate::error::BackendError;

/// Key under which debug metadata is attached.
pub const DEBUG_KEY: &str = "_debug";

/// Backend operation a tool call was translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /query`.
    Query,
    /// `POST /retrieve`.
    Retrieve,
}

impl Operation {
    /// Backend path of this operation.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Query => "/query",
            Self::Retrieve => "/retrieve",
        }
    }

    /// Debug key that records the payload that was sent.
    #[must_use]
    pub const fn parameters_key(self) -> &'static str {
        match self {
            Self::Query => "query_parameters",
            Self::Retrieve => "retrieval_parameters",
        }
    }
}

/// Failure category reported as `_debug.error_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend answered with an error status.
    Http,
    /// Anything else: transport, timeout, decoding.
    General,
}

impl FailureKind {
    /// Wire name of the failure kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http_error",
            Self::General => "general_error",
        }
    }
}

/// A normalized tool failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolFailure {
    /// Human-readable description (`HTTP <status>: <body>` for status errors).
    pub message: String,
    /// HTTP status, for [`FailureKind::Http`] only.
    pub status_code: Option<u16>,
    /// Failure category.
    pub kind: FailureKind,
    /// Operation that failed.
    pub operation: Operation,
    /// Payload that was sent.
    pub parameters: Value,
}

impl ToolFailure {
    /// Classifies a backend error.
    #[must_use]
    pub fn from_backend(operation: Operation, parameters: Value, err: &BackendError) -> Self {
        let status_code = err.status_code();
        Self {
            message: err.to_string(),
            status_code,
            kind: if status_code.is_some() {
                FailureKind::Http
            } else {
                FailureKind::General
            },
            operation,
            parameters,
        }
    }
}

/// Outcome of a knowledge-base tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The backend answered; `body` is passed through untouched.
    Success {
        /// Decoded backend response.
        body: Map<String, Value>,
        /// Operation that succeeded.
        operation: Operation,
        /// Payload that was sent.
        parameters: Value,
        /// Configuration subset reported under `config_used`.
        config_used: Value,
    },
    /// The call failed and was normalized.
    Failure(ToolFailure),
}

impl ToolOutcome {
    /// Returns `true` for [`ToolOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Renders the outcome as the JSON object returned to the caller.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Success {
                mut body,
                operation,
                parameters,
                config_used,
            } => {
                let mut debug = Map::new();
                debug.insert(operation.parameters_key().to_string(), parameters);
                debug.insert("endpoint_used".to_string(), json!(operation.endpoint()));
                debug.insert("config_used".to_string(), config_used);
                body.insert(DEBUG_KEY.to_string(), Value::Object(debug));
                Value::Object(body)
            }
            Self::Failure(failure) => {
                let mut debug = Map::new();
                debug.insert(
                    failure.operation.parameters_key().to_string(),
                    failure.parameters,
                );
                debug.insert(
                    "endpoint_used".to_string(),
                    json!(failure.operation.endpoint()),
                );
                debug.insert("error_type".to_string(), json!(failure.kind.as_str()));

                let mut out = Map::new();
                out.insert("error".to_string(), json!(failure.message));
                if let Some(status) = failure.status_code {
                    out.insert("status_code".to_string(), json!(status));
                }
                out.insert(DEBUG_KEY.to_string(), Value::Object(debug));
                Value::Object(out)
            }
        }
    }
}
