//! Camunda MCP Server.
//!
//! Exposes Camunda 7 task, comment and process operations as MCP tools over
//! stdio or Streamable HTTP.

mod format;
mod server;

use std::collections::HashMap;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use rmcp::ServiceExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use camunda_client::config::{ENV_AUTH_TYPE, ENV_PASSWORD, ENV_TIMEOUT, ENV_URL, ENV_USERNAME};
use camunda_client::{CamundaClient, ClientError, ConnectionProfile};

use server::{create_mcp_router, CamundaMcpServer};

/// MCP transport to serve on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// Line-delimited JSON-RPC on stdin/stdout.
    Stdio,
    /// Streamable HTTP at `/mcp`.
    Http,
}

/// MCP server for the Camunda 7 REST API.
///
/// Connection settings default to the CAMUNDA_* environment variables; flags
/// take precedence over them.
#[derive(Parser, Debug)]
#[command(name = "camunda-mcp", about = "MCP server for the Camunda 7 REST API")]
struct Args {
    /// Engine REST base URL (CAMUNDA_URL)
    #[arg(long)]
    url: Option<String>,

    /// Basic-auth username (CAMUNDA_USERNAME)
    #[arg(long)]
    username: Option<String>,

    /// Basic-auth password (CAMUNDA_PASSWORD)
    #[arg(long)]
    password: Option<String>,

    /// Authentication mode: basic, oauth or none (CAMUNDA_AUTH_TYPE)
    #[arg(long)]
    auth_type: Option<String>,

    /// Request timeout in seconds (CAMUNDA_TIMEOUT)
    #[arg(long)]
    timeout: Option<String>,

    /// MCP transport
    #[arg(long, value_enum, default_value = "stdio")]
    transport: Transport,

    /// Bind address for the HTTP transport
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Resolve the connection profile: flags, then environment, then defaults.
    fn connection_profile(&self) -> Result<ConnectionProfile, ClientError> {
        let overrides: HashMap<&str, &String> = [
            (ENV_URL, &self.url),
            (ENV_USERNAME, &self.username),
            (ENV_PASSWORD, &self.password),
            (ENV_AUTH_TYPE, &self.auth_type),
            (ENV_TIMEOUT, &self.timeout),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, v)))
        .collect();

        ConnectionProfile::resolve(|key| {
            overrides
                .get(key)
                .map(|v| v.to_string())
                .or_else(|| std::env::var(key).ok())
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Log to stderr: stdout carries the stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let profile = args.connection_profile()?;
    info!(
        url = %profile.base_url,
        auth = %profile.auth_mode,
        timeout_secs = profile.timeout_secs,
        "Camunda MCP Server starting"
    );

    let client = Arc::new(CamundaClient::new(profile)?);
    if !client.health_check().await {
        warn!("Camunda engine is not reachable; tools will fail until it is");
    }

    match args.transport {
        Transport::Stdio => {
            info!("Starting Camunda MCP Server with stdio transport");
            let service = CamundaMcpServer::new(client)
                .serve(rmcp::transport::stdio())
                .await?;
            service.waiting().await?;
        }
        Transport::Http => {
            let ct = CancellationToken::new();
            let router = create_mcp_router(client, ct.clone());
            let listener = tokio::net::TcpListener::bind(&args.bind).await?;
            info!(addr = %args.bind, "Starting Camunda MCP Server with HTTP transport");

            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = tokio::signal::ctrl_c().await;
                    ct.cancel();
                })
                .await?;
        }
    }

    info!("Camunda MCP Server stopped");
    Ok(())
}
