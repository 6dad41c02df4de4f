//! Transports for the knowledge-base MCP server.
//!
//! stdio is what agent hosts spawn; streamable HTTP serves remote hosts.

use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use tracing::info;

use super::server::KbMcpServer;

/// Serves `server` over stdin/stdout until the host closes the pipe.
///
/// # Errors
///
/// Returns an error if the MCP handshake or the session fails.
pub async fn serve_stdio(server: KbMcpServer) -> anyhow::Result<()> {
    info!("Serving MCP over stdio");
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    info!("MCP stdio transport closed");
    Ok(())
}

/// Serves `server` over MCP streamable HTTP at `http://{host}:{port}/mcp`.
///
/// Every session gets a clone of `server`; clones share the same immutable
/// configuration. Stops on Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve_sse(server: KbMcpServer, host: &str, port: u16) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::{
        StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
    };
    use std::sync::Arc;

    let ct = tokio_util::sync::CancellationToken::new();

    let service = StreamableHttpService::new(
        move || Ok::<_, std::io::Error>(server.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            cancellation_token: ct.child_token(),
            ..Default::default()
        },
    );

    let router = axum::Router::new().nest_service("/mcp", service);
    let addr = format!("{host}:{port}");
    let tcp_listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("OnlysaidKB MCP server listening on http://{addr}/mcp");

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            ct.cancel();
        })
        .await?;

    Ok(())
}
