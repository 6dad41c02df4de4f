//! MCP (Model Context Protocol) server for onlysaidkb-mcp.
//!
//! Exposes the OnlysaidKB backend to AI agents: two tools that forward to
//! `/query` and `/retrieve`, and three resource templates backed by
//! `/view` and `/kb_status`.
//!
//! # Feature Gate
//!
//! This module requires the `mcp` feature flag (enabled by default):
//! ```toml
//! [dependencies]
//! onlysaidkb-mcp = { version = "...", features = ["mcp"] }
//! ```
//!
//! # Architecture
//!
//! ```text
//! MCP Client (agent host)
//!   ↓ query_knowledge_base / retrieve_from_knowledge_base / resources/read
//! KbMcpServer
//!   ↓
//! KbAdapter → BackendClient → OnlysaidKB HTTP API
//!   ↓
//! JSON text (tool result or resource contents) → MCP Client
//! ```

pub mod params;
pub mod server;
pub mod transport;

pub use params::{QueryKnowledgeBaseParams, RetrieveParams};
pub use server::KbMcpServer;
pub use transport::{serve_sse, serve_stdio};
