//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros. Backend settings come
//! from `ONLYSAIDKB_*` environment variables, not flags.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// OnlysaidKB MCP server.
///
/// Exposes OnlysaidKB knowledge-base query, retrieval and workspace views
/// to AI agents over the Model Context Protocol.
#[derive(Parser, Debug)]
#[command(name = "onlysaidkb-mcp")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Environment:
  ONLYSAIDKB_BASE_URL          Backend API base URL (required)
  ONLYSAIDKB_DEFAULT_MODEL     Default model (default: gpt-4)
  ONLYSAIDKB_DEFAULT_TOP_K     Default top-k results (default: 5)
  ONLYSAIDKB_DEFAULT_LANGUAGE  Default language (default: en)
  ONLYSAIDKB_TIMEOUT           Request timeout in seconds (default: 30)
"#)]
pub struct Cli {
    /// Enable debug logging (stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load environment variables from this file instead of `./.env`.
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// The subcommand to execute (defaults to `stdio`).
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start MCP server with stdio transport.
    ///
    /// Reads JSON-RPC messages from stdin, writes responses to stdout.
    /// This is the standard transport for agent host integration.
    #[command(after_help = r#"Examples:
  onlysaidkb-mcp stdio
  ONLYSAIDKB_BASE_URL=http://localhost:8000 onlysaidkb-mcp stdio
"#)]
    Stdio,

    /// Start MCP server with SSE/HTTP transport.
    ///
    /// Listens for incoming HTTP connections using streamable HTTP transport.
    #[command(after_help = r#"Examples:
  onlysaidkb-mcp sse                            # Listen on 127.0.0.1:3000
  onlysaidkb-mcp sse --host 0.0.0.0 --port 8080
"#)]
    Sse {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to.
        #[arg(long, default_value = "3000")]
        port: u16,
    },

    /// Check connectivity to the OnlysaidKB backend.
    ///
    /// Probes `/health`, and `/view/{workspace}` when a workspace is given.
    #[command(after_help = r#"Examples:
  onlysaidkb-mcp check
  onlysaidkb-mcp check --workspace 4145c5ec-...
"#)]
    Check {
        /// Workspace ID to probe with a view request.
        #[arg(short, long, env = "TEST_WORKSPACE_ID")]
        workspace: Option<String>,
    },
}

impl Cli {
    /// Returns the subcommand, defaulting to stdio.
    #[must_use]
    pub fn subcommand(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Stdio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_stdio() {
        let cli = Cli::try_parse_from(["onlysaidkb-mcp"]).unwrap_or_else(|_| unreachable!());
        assert_eq!(cli.subcommand(), Commands::Stdio);
    }

    #[test]
    fn test_sse_defaults() {
        let cli =
            Cli::try_parse_from(["onlysaidkb-mcp", "sse"]).unwrap_or_else(|_| unreachable!());
        assert_eq!(
            cli.subcommand(),
            Commands::Sse {
                host: "127.0.0.1".to_string(),
                port: 3000,
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "onlysaidkb-mcp",
            "check",
            "--workspace",
            "ws-1",
            "--verbose",
            "--env-file",
            "/tmp/kb.env",
        ])
        .unwrap_or_else(|_| unreachable!());
        assert!(cli.verbose);
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/kb.env")));
        assert_eq!(
            cli.subcommand(),
            Commands::Check {
                workspace: Some("ws-1".to_string())
            }
        );
    }
}
