//! NowCerts MCP server
//!
//! Serves the insured list and insert tools to an agent over MCP stdio.
//! Stdout carries the protocol, so nothing else may write to it.

pub mod config;
pub mod error;
pub mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tracing::{error, info};

use nowcerts_client::NowCertsClient;
use nowcerts_tools::{InsuredTools, SummaryCache};

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use server::InsuredServer;

/// Builds the tool server from configuration.
///
/// # Errors
///
/// Returns an error if the API key is missing or the HTTP client cannot be
/// built.
pub fn build_server(config: &ServerConfig) -> Result<InsuredServer> {
    let client = NowCertsClient::new(config.api_config()?)?;
    let cache = SummaryCache::new(config.cache_ttl());
    let tools = InsuredTools::new(Arc::new(client), Arc::new(cache))
        .with_summary_limit(config.list.summary_limit);

    Ok(InsuredServer::new(Arc::new(tools)))
}

/// Serves the tools over stdio until the client disconnects.
///
/// # Errors
///
/// Returns an error if the server cannot be built or the transport fails.
pub async fn serve_stdio(config: &ServerConfig) -> Result<()> {
    let server = build_server(config)?;

    info!(
        "Serving {} over stdio (base_url={}, cache_ttl={}s)",
        server::SERVER_NAME,
        config.api.base_url,
        config.cache.ttl_secs
    );

    let service = server.serve(stdio()).await.map_err(|e| {
        error!("Failed to start MCP service: {e}");
        ServerError::Transport(e.to_string())
    })?;

    let reason = service
        .waiting()
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?;

    info!("MCP service stopped: {reason:?}");
    Ok(())
}
