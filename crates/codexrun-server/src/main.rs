//! Codexrun MCP Server
//!
//! Brokers single implementation tasks to the Codex CLI and serves the
//! resulting reports as an MCP tool over streamable HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod http;
mod mcp;

use codexrun_codex_sdk::CodexExecutor;

/// Codexrun MCP server.
#[derive(Parser, Debug)]
#[command(name = "codexrun-server", about = "MCP server that runs Codex tasks and reports results")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Repository the Codex agent works in (defaults to the current directory)
    #[arg(long, env = "CODEX_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to the Codex CLI executable
    #[arg(long, env = "CODEX_BIN", default_value = "codex")]
    codex_bin: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("codexrun=info".parse().unwrap()),
        )
        .init();

    let mut executor = CodexExecutor::new(&args.codex_bin);
    match &args.workspace {
        Some(workspace) => {
            executor = executor.with_workspace(workspace);
            info!(workspace = %workspace.display(), "Codex workspace configured");
        }
        None => {
            info!("No workspace configured, Codex runs in the current directory");
        }
    }

    let ct = CancellationToken::new();
    let router = http::create_router(executor, ct.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, codex_bin = %args.codex_bin, "Codexrun MCP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
            ct.cancel();
        })
        .await?;

    info!("Codexrun MCP server stopped");
    Ok(())
}
