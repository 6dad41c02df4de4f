//! # onlysaidkb-mcp
//!
//! MCP server that exposes an OnlysaidKB knowledge-base backend to AI agents.
//!
//! Each tool call is translated into exactly one HTTP request against the
//! backend: optional arguments the caller left empty are dropped, defaults
//! are substituted, and the JSON response is passed through with a `_debug`
//! field. Failures are normalized into an error object instead of being
//! raised, because MCP tool calls have no exception channel.
//!
//! ## Modules
//!
//! - [`config`]: environment-driven, immutable backend configuration
//! - [`backend`]: request payloads and the HTTP client
//! - [`adapter`]: tool outcomes, resource views and the translator
//! - [`mcp`]: rmcp server, tool/resource wiring and transports
//! - [`cli`]: command-line entry points

pub mod adapter;
pub mod backend;
#[cfg(feature = "mcp")]
pub mod cli;
pub mod config;
pub mod error;
#[cfg(feature = "mcp")]
pub mod mcp;

pub use adapter::{KbAdapter, KbResource, ToolFailure, ToolOutcome};
pub use config::KbConfig;
pub use error::{BackendError, ConfigError, Error, Result};
