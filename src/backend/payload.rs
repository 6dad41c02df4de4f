//! Request bodies sent to the knowledge-base backend.
//!
//! Optional fields are skipped when absent: the backend distinguishes a
//! missing field from an explicit `null`, so `None` must never serialize.
//! Caller-supplied optionals pass through the "provided" filters below, which
//! treat empty strings, empty lists and a zero `top_k` as not provided.

use serde::Serialize;

use crate::config::KbConfig;

/// Body of `POST /query` (retrieval plus answer generation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPayload {
    /// Workspace containing the knowledge bases.
    pub workspace_id: String,
    /// Natural language question.
    pub query: String,
    /// Always `false`: tool calls need a complete response.
    pub streaming: bool,
    /// Knowledge bases to search (all when absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_bases: Option<Vec<String>>,
    /// Prior conversation turns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<String>>,
    /// Number of documents to retrieve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Generation model override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Response language override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    /// Caller's message id, for tracking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

/// Caller arguments for a query, before filtering.
#[derive(Debug, Clone, Default)]
pub struct QueryArgs {
    /// Workspace containing the knowledge bases.
    pub workspace_id: String,
    /// Natural language question.
    pub query: String,
    /// Knowledge bases to search.
    pub knowledge_bases: Option<Vec<String>>,
    /// Generation model override.
    pub model: Option<String>,
    /// Prior conversation turns.
    pub conversation_history: Option<Vec<String>>,
    /// Number of documents to retrieve.
    pub top_k: Option<u32>,
    /// Response language override.
    pub preferred_language: Option<String>,
    /// Caller's message id.
    pub message_id: Option<String>,
}

impl QueryPayload {
    /// Builds the payload, dropping every optional the caller left empty.
    #[must_use]
    pub fn from_args(args: QueryArgs) -> Self {
        Self {
            workspace_id: args.workspace_id,
            query: args.query,
            streaming: false,
            knowledge_bases: provided_list(args.knowledge_bases),
            conversation_history: provided_list(args.conversation_history),
            top_k: provided_count(args.top_k),
            model: provided_text(args.model),
            preferred_language: provided_text(args.preferred_language),
            message_id: provided_text(args.message_id),
        }
    }
}

/// Body of `POST /retrieve` (documents only, no generation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrievePayload {
    /// Workspace containing the knowledge bases.
    pub workspace_id: String,
    /// Search query.
    pub query: String,
    /// Number of documents to retrieve; always present.
    pub top_k: u32,
    /// Knowledge bases to search (all when absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_bases: Option<Vec<String>>,
}

/// Caller arguments for a retrieval, before filtering.
#[derive(Debug, Clone, Default)]
pub struct RetrieveArgs {
    /// Workspace containing the knowledge bases.
    pub workspace_id: String,
    /// Search query.
    pub query: String,
    /// Knowledge bases to search.
    pub knowledge_bases: Option<Vec<String>>,
    /// Number of documents to retrieve.
    pub top_k: Option<u32>,
}

impl RetrievePayload {
    /// Builds the payload, substituting the configured default `top_k`.
    #[must_use]
    pub fn from_args(args: RetrieveArgs, config: &KbConfig) -> Self {
        Self {
            workspace_id: args.workspace_id,
            query: args.query,
            top_k: provided_count(args.top_k).unwrap_or(config.default_top_k),
            knowledge_bases: provided_list(args.knowledge_bases),
        }
    }
}

fn provided_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn provided_list(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value.filter(|v| !v.is_empty())
}

// A zero top_k counts as "not provided".
fn provided_count(value: Option<u32>) -> Option<u32> {
    value.filter(|&n| n > 0)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::{Value, json};
    use test_case::test_case;

    use super::*;

    fn config() -> KbConfig {
        KbConfig::builder()
            .base_url("http://localhost:8000")
            .default_top_k(5)
            .build()
            .unwrap_or_else(|_| unreachable!())
    }

    fn to_value<T: Serialize>(payload: &T) -> Value {
        serde_json::to_value(payload).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn test_query_minimal_payload() {
        let payload = QueryPayload::from_args(QueryArgs {
            workspace_id: "ws-1".to_string(),
            query: "what is the refund policy?".to_string(),
            ..QueryArgs::default()
        });
        assert_eq!(
            to_value(&payload),
            json!({
                "workspace_id": "ws-1",
                "query": "what is the refund policy?",
                "streaming": false,
            })
        );
    }

    #[test]
    fn test_query_full_payload() {
        let payload = QueryPayload::from_args(QueryArgs {
            workspace_id: "ws-1".to_string(),
            query: "summarize".to_string(),
            knowledge_bases: Some(vec!["kb-a".to_string(), "kb-b".to_string()]),
            model: Some("gpt-4o".to_string()),
            conversation_history: Some(vec!["hi".to_string()]),
            top_k: Some(3),
            preferred_language: Some("fr".to_string()),
            message_id: Some("msg-9".to_string()),
        });
        assert_eq!(
            to_value(&payload),
            json!({
                "workspace_id": "ws-1",
                "query": "summarize",
                "streaming": false,
                "knowledge_bases": ["kb-a", "kb-b"],
                "conversation_history": ["hi"],
                "top_k": 3,
                "model": "gpt-4o",
                "preferred_language": "fr",
                "message_id": "msg-9",
            })
        );
    }

    #[test_case(Some(String::new()) ; "empty string")]
    #[test_case(None ; "absent")]
    fn test_query_empty_text_optionals_are_omitted(value: Option<String>) {
        let payload = QueryPayload::from_args(QueryArgs {
            workspace_id: "ws".to_string(),
            query: "q".to_string(),
            model: value.clone(),
            preferred_language: value.clone(),
            message_id: value,
            ..QueryArgs::default()
        });
        let v = to_value(&payload);
        assert!(v.get("model").is_none());
        assert!(v.get("preferred_language").is_none());
        assert!(v.get("message_id").is_none());
    }

    #[test_case(Some(0), None ; "zero is suppressed")]
    #[test_case(None, None ; "absent")]
    #[test_case(Some(7), Some(7) ; "positive is kept")]
    fn test_query_top_k_suppression(input: Option<u32>, expected: Option<u32>) {
        let payload = QueryPayload::from_args(QueryArgs {
            workspace_id: "ws".to_string(),
            query: "q".to_string(),
            top_k: input,
            ..QueryArgs::default()
        });
        assert_eq!(payload.top_k, expected);
    }

    #[test]
    fn test_query_empty_lists_are_omitted() {
        let payload = QueryPayload::from_args(QueryArgs {
            workspace_id: "ws".to_string(),
            query: "q".to_string(),
            knowledge_bases: Some(Vec::new()),
            conversation_history: Some(Vec::new()),
            ..QueryArgs::default()
        });
        let v = to_value(&payload);
        assert!(v.get("knowledge_bases").is_none());
        assert!(v.get("conversation_history").is_none());
    }

    #[test]
    fn test_retrieve_default_top_k() {
        let payload = RetrievePayload::from_args(
            RetrieveArgs {
                workspace_id: "ws".to_string(),
                query: "system configuration".to_string(),
                ..RetrieveArgs::default()
            },
            &config(),
        );
        assert_eq!(
            to_value(&payload),
            json!({"workspace_id": "ws", "query": "system configuration", "top_k": 5})
        );
    }

    #[test]
    fn test_retrieve_zero_top_k_falls_back_to_default() {
        let payload = RetrievePayload::from_args(
            RetrieveArgs {
                workspace_id: "ws".to_string(),
                query: "q".to_string(),
                top_k: Some(0),
                ..RetrieveArgs::default()
            },
            &config(),
        );
        assert_eq!(payload.top_k, 5);
    }

    proptest! {
        #[test]
        fn prop_query_never_streams_or_sends_nulls(
            kbs in proptest::option::of(proptest::collection::vec("[a-z0-9-]{0,8}", 0..3)),
            model in proptest::option::of("[a-z0-9-]{0,6}"),
            top_k in proptest::option::of(0u32..20),
        ) {
            let payload = QueryPayload::from_args(QueryArgs {
                workspace_id: "ws".to_string(),
                query: "q".to_string(),
                knowledge_bases: kbs,
                model,
                top_k,
                ..QueryArgs::default()
            });
            let v = to_value(&payload);
            prop_assert_eq!(v.get("streaming"), Some(&Value::Bool(false)));
            let object = v.as_object().unwrap_or_else(|| unreachable!());
            prop_assert!(object.values().all(|field| !field.is_null()));
            if let Some(k) = object.get("top_k") {
                prop_assert!(k.as_u64().is_some_and(|n| n > 0));
            }
        }

        #[test]
        fn prop_retrieve_omits_missing_knowledge_bases(
            top_k in proptest::option::of(0u32..50),
        ) {
            let payload = RetrievePayload::from_args(
                RetrieveArgs {
                    workspace_id: "ws".to_string(),
                    query: "q".to_string(),
                    knowledge_bases: None,
                    top_k,
                },
                &config(),
            );
            let v = to_value(&payload);
            prop_assert!(v.get("knowledge_bases").is_none());
            prop_assert!(v.get("top_k").and_then(Value::as_u64).is_some_and(|n| n > 0));
        }
    }
}
