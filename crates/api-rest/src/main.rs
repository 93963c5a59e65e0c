//! Brewery API server
//!
//! `brewery-api serve` runs the HTTP server; `brewery-api openapi --out <dir>`
//! writes the OpenAPI document and contract snippets without starting it.

use anyhow::{Context, Result};
use brewery_api_rest::{create_app, docs, AppState};
use brewery_common::{init_tracing, AppConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "brewery-api")]
#[command(author, version, about = "Brewery beer inventory API")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Port to listen on (overrides configuration)
        #[arg(short, long, env = "BREWERY_PORT")]
        port: Option<u16>,
    },

    /// Write the OpenAPI document and contract snippets
    Openapi {
        /// Output directory
        #[arg(short, long, default_value = "target/generated-snippets")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(port).await,
        Commands::Openapi { out } => write_docs(out),
    }
}

async fn serve(port: Option<u16>) -> Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(port) = port {
        config.server.port = port;
        config.validate()?;
    }

    init_tracing(
        &config.telemetry.service_name,
        config.telemetry.json_logging,
        &config.telemetry.log_level,
    )?;

    let state = AppState::from_config(&config).await?;
    let app = create_app(state, &config);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, swagger = config.server.enable_swagger, "Brewery API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Brewery API stopped");
    Ok(())
}

fn write_docs(out: PathBuf) -> Result<()> {
    let written = docs::write_snippets(&out)?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
