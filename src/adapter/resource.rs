//! Read-only workspace views addressed by `onlysaidkb://` URIs.

use std::fmt;

/// URI scheme of every resource this server exposes.
pub const SCHEME: &str = "onlysaidkb://";

/// A resource view over one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KbResource {
    /// `workspace/{workspace_id}/knowledge_bases`: the `dataSources` list.
    KnowledgeBases {
        /// Workspace id.
        workspace_id: String,
    },
    /// `workspace/{workspace_id}/kb/{kb_id}/status`.
    KbStatus {
        /// Workspace id.
        workspace_id: String,
        /// Knowledge base id.
        kb_id: String,
    },
    /// `workspace/{workspace_id}/structure`: the whole workspace view.
    Structure {
        /// Workspace id.
        workspace_id: String,
    },
}

impl KbResource {
    /// Parses a resource URI (`onlysaidkb://workspace/...`).
    ///
    /// Returns `None` for a foreign scheme, an unknown path or an empty id.
    #[must_use]
    pub fn parse(uri: &str) -> Option<Self> {
        let path = uri.strip_prefix(SCHEME)?;
        let parts: Vec<&str> = path.trim_end_matches('/').split('/').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        match parts.as_slice() {
            ["workspace", ws, "knowledge_bases"] => Some(Self::KnowledgeBases {
                workspace_id: (*ws).to_string(),
            }),
            ["workspace", ws, "kb", kb, "status"] => Some(Self::KbStatus {
                workspace_id: (*ws).to_string(),
                kb_id: (*kb).to_string(),
            }),
            ["workspace", ws, "structure"] => Some(Self::Structure {
                workspace_id: (*ws).to_string(),
            }),
            _ => None,
        }
    }

    /// Backend path that serves this view.
    #[must_use]
    pub fn backend_path(&self) -> String {
        match self {
            Self::KnowledgeBases { workspace_id } | Self::Structure { workspace_id } => {
                format!("/view/{workspace_id}")
            }
            Self::KbStatus {
                workspace_id,
                kb_id,
            } => format!("/kb_status/{workspace_id}/{kb_id}"),
        }
    }

    /// Name used in `Error retrieving <label>: ...` messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::KnowledgeBases { .. } => "knowledge bases",
            Self::KbStatus { .. } => "knowledge base status",
            Self::Structure { .. } => "workspace structure",
        }
    }
}

impl fmt::Display for KbResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KnowledgeBases { workspace_id } => {
                write!(f, "{SCHEME}workspace/{workspace_id}/knowledge_bases")
            }
            Self::KbStatus {
                workspace_id,
                kb_id,
            } => write!(f, "{SCHEME}workspace/{workspace_id}/kb/{kb_id}/status"),
            Self::Structure { workspace_id } => {
                write!(f, "{SCHEME}workspace/{workspace_id}/structure")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("onlysaidkb://workspace/ws-1/knowledge_bases", "/view/ws-1" ; "knowledge bases")]
    #[test_case("onlysaidkb://workspace/ws-1/structure", "/view/ws-1" ; "structure")]
    #[test_case("onlysaidkb://workspace/ws-1/kb/kb-7/status", "/kb_status/ws-1/kb-7" ; "kb status")]
    #[test_case("onlysaidkb://workspace/ws-1/structure/", "/view/ws-1" ; "trailing slash")]
    fn test_parse_valid(uri: &str, path: &str) {
        let resource = KbResource::parse(uri).unwrap_or_else(|| unreachable!());
        assert_eq!(resource.backend_path(), path);
    }

    #[test_case("kb://workspace/ws-1/structure" ; "foreign scheme")]
    #[test_case("onlysaidkb://workspace//structure" ; "empty workspace")]
    #[test_case("onlysaidkb://workspace/ws-1/kb//status" ; "empty kb")]
    #[test_case("onlysaidkb://workspace/ws-1/documents" ; "unknown view")]
    #[test_case("onlysaidkb://workspace/ws-1" ; "missing view")]
    fn test_parse_invalid(uri: &str) {
        assert_eq!(KbResource::parse(uri), None);
    }

    #[test]
    fn test_display_round_trips() {
        let resource = KbResource::KbStatus {
            workspace_id: "4145c5ec".to_string(),
            kb_id: "89cbb96a".to_string(),
        };
        let uri = resource.to_string();
        assert_eq!(uri, "onlysaidkb://workspace/4145c5ec/kb/89cbb96a/status");
        assert_eq!(KbResource::parse(&uri), Some(resource));
    }
}
