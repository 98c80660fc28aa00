//! NowCerts MCP server binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use nowcerts_mcp::{ServerConfig, serve_stdio};

/// MCP stdio server for NowCerts insured records
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "NOWCERTS_CONFIG")]
    config: Option<PathBuf>,
}

/// Initializes structured logging with tracing.
///
/// Logs always go to stderr. `NOWCERTS_LOG_FORMAT` selects `json` or
/// `pretty` (default), and `RUST_LOG` controls the level.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let format = std::env::var("NOWCERTS_LOG_FORMAT")
        .unwrap_or_else(|_| "pretty".to_string())
        .to_lowercase();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("nowcerts_mcp=info,nowcerts_tools=info,nowcerts_client=info")
    });

    match format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .init();
        }
        _ => {
            fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up NOWCERTS_* variables from a local .env before reading them
    let dotenv_path = dotenv::dotenv().ok();
    let args = Args::parse();

    init_tracing();

    info!("Starting NowCerts MCP server");
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    let config = match ServerConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            error!(
                "Expected config at: {:?}",
                args.config.or_else(ServerConfig::config_path)
            );
            return Err(e).context("loading configuration");
        }
    };

    serve_stdio(&config).await.context("serving MCP over stdio")?;

    info!("NowCerts MCP server shut down");
    Ok(())
}
