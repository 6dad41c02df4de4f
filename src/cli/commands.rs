//! CLI command implementations.
//!
//! Contains the startup checks and the logic behind each subcommand.

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use tracing::info;

use crate::backend::BackendClient;
use crate::cli::parser::{Cli, Commands};
use crate::config::{
    ENV_BASE_URL, ENV_DEFAULT_LANGUAGE, ENV_DEFAULT_MODEL, ENV_DEFAULT_TOP_K, ENV_TIMEOUT,
    KbConfig,
};
use crate::error::{CommandError, ConfigError, Result};
use crate::mcp::{KbMcpServer, serve_sse, serve_stdio};

/// Formats the diagnostic shown when configuration cannot be loaded.
///
/// Names exactly which settings are missing or invalid and how to set them.
#[must_use]
pub fn config_diagnostic(err: &ConfigError) -> String {
    let mut out = format!("[ERROR] {err}\n");
    if matches!(err, ConfigError::MissingVariables { .. }) {
        out.push_str("\n[INFO] Set these environment variables:\n");
        let _ = writeln!(
            out,
            "  export {ENV_BASE_URL}='http://localhost:8000'  # Your OnlysaidKB API base URL"
        );
        let _ = writeln!(out, "  export {ENV_DEFAULT_MODEL}='gpt-4'  # Optional, default model");
        let _ = writeln!(
            out,
            "  export {ENV_DEFAULT_TOP_K}='5'  # Optional, default top K results"
        );
        let _ = writeln!(
            out,
            "  export {ENV_DEFAULT_LANGUAGE}='en'  # Optional, default language"
        );
        let _ = writeln!(
            out,
            "  export {ENV_TIMEOUT}='30'  # Optional, request timeout in seconds"
        );
    }
    out
}

/// Logs the resolved configuration and available operations.
pub fn log_startup(config: &KbConfig) {
    info!(
        base_url = %config.base_url,
        default_model = %config.default_model,
        default_top_k = config.default_top_k,
        default_language = %config.default_language,
        timeout_secs = config.timeout.as_secs(),
        "OnlysaidKB MCP server configuration"
    );
    info!("Available operations: query_knowledge_base, retrieve_from_knowledge_base");
}

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
/// * `config` - Validated backend configuration.
///
/// # Returns
///
/// Result with output string on success (empty for server commands).
///
/// # Errors
///
/// Returns an error if the runtime cannot start, the server fails, or the
/// connectivity check cannot reach the backend.
pub fn execute(cli: &Cli, config: KbConfig) -> Result<String> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}"))
    })?;

    match cli.subcommand() {
        Commands::Stdio => {
            log_startup(&config);
            let server = KbMcpServer::new(Arc::new(config));
            rt.block_on(serve_stdio(server))
                .map_err(|e| CommandError::ExecutionFailed(format!("MCP server error: {e}")))?;
            Ok(String::new())
        }
        Commands::Sse { host, port } => {
            log_startup(&config);
            let server = KbMcpServer::new(Arc::new(config));
            rt.block_on(serve_sse(server, &host, port))
                .map_err(|e| CommandError::ExecutionFailed(format!("MCP server error: {e}")))?;
            Ok(String::new())
        }
        Commands::Check { workspace } => rt.block_on(cmd_check(&config, workspace.as_deref())),
    }
}

/// Probes backend connectivity.
///
/// A 404 on `/health` still counts as reachable: the server answered.
async fn cmd_check(config: &KbConfig, workspace: Option<&str>) -> Result<String> {
    let client = BackendClient::new(config);
    let mut out = String::new();
    let _ = writeln!(out, "Backend: {}", config.base_url);
    let _ = writeln!(out, "Timeout: {}s", config.timeout.as_secs());

    let (status, body) = client.probe("/health").await.map_err(|e| {
        CommandError::ExecutionFailed(format!("Cannot reach {}: {e}", config.base_url))
    })?;
    let verdict = if status.is_success() {
        "ok"
    } else {
        "reachable, unhealthy"
    };
    let _ = writeln!(out, "GET /health: {} ({verdict}) {}", status.as_u16(), body.trim());

    if let Some(ws) = workspace {
        let path = format!("/view/{ws}");
        match client.get_json(&path).await {
            Ok(view) => {
                let sources = view
                    .get("dataSources")
                    .and_then(serde_json::Value::as_array)
                    .map_or(0, Vec::len);
                let _ = writeln!(out, "GET {path}: ok ({sources} knowledge bases)");
            }
            Err(e) => {
                let _ = writeln!(out, "GET {path}: {e}");
            }
        }
    }

    Ok(out)
}
