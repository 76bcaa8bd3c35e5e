//! Cursor Background Agents MCP Server
//!
//! Exposes the Cursor background-agents API as MCP tools and resources.
//!
//! # Requirements
//!
//! - `CURSOR_API_KEY` must be set in the environment
//!
//! # Usage
//!
//! Run on stdio (default):
//! ```bash
//! cursor-agents-mcp
//! ```
//!
//! Or serve over streamable HTTP:
//! ```bash
//! MCP_SERVER_MODE=http PORT=3000 cursor-agents-mcp
//! ```
//!
//! Or configure in `.mcp.json`:
//! ```json
//! {
//!   "mcpServers": {
//!     "cursor-agents": {
//!       "command": "cursor-agents-mcp",
//!       "env": { "CURSOR_API_KEY": "..." }
//!     }
//!   }
//! }
//! ```

use rmcp::{
    transport::{
        stdio,
        streamable_http_server::{session::local::LocalSessionManager, StreamableHttpService},
    },
    ServiceExt,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cursor_agents_mcp::config::Config;
use cursor_agents_mcp::CursorAgentsMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive("cursor_agents_mcp=info".parse()?))
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting Cursor Agents MCP Server");

    let server = CursorAgentsMcpServer::new(&config);

    if config.http_mode {
        // One shared server instance so every HTTP session sees the same
        // repository cache.
        let service = StreamableHttpService::new(
            move || Ok(server.clone()),
            LocalSessionManager::default().into(),
            Default::default(),
        );

        let router = axum::Router::new().nest_service("/mcp", service);
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

        tracing::info!(
            "Server running on http://localhost:{}/mcp",
            config.port
        );
        axum::serve(listener, router).await?;
    } else {
        let service = server.serve(stdio()).await?;

        tracing::info!("Server running, waiting for requests...");
        service.waiting().await?;
    }

    tracing::info!("Server shutting down");
    Ok(())
}
