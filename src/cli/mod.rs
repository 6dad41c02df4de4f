//! CLI layer for onlysaidkb-mcp.
//!
//! Provides the command-line interface using clap, with commands
//! for serving MCP over stdio or HTTP and checking backend connectivity.

pub mod commands;
pub mod parser;

pub use commands::{config_diagnostic, execute};
pub use parser::{Cli, Commands};
