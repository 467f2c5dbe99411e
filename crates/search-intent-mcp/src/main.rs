//! Search Intent MCP Server
//!
//! A Model Context Protocol server exposing the `search_intent_analysis`
//! tool to agentic clients.
//!
//! # Usage
//!
//! ```bash
//! SEARCH_INTENT_API_KEY=... search-intent-mcp [--api-url <url>] [--timeout-secs <n>]
//! ```
//!
//! # Environment Variables
//!
//! - `SEARCH_INTENT_API_KEY`: Bearer token for the search intent API (required)
//! - `SEARCH_INTENT_API_URL`: Override the API endpoint
//! - `SEARCH_INTENT_TIMEOUT_SECS`: Outbound request timeout (default: 30)
//! - `RUST_LOG`: Control log verbosity (default: `search_intent_mcp=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use clap::Parser;
use search_intent_mcp::config::{
    API_KEY_ENV, API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, TIMEOUT_ENV,
};
use search_intent_mcp::{Config, SearchIntentServer};

/// MCP server for search intent analysis
#[derive(Parser)]
#[command(name = "search-intent-mcp")]
#[command(about = "MCP server for search intent analysis")]
#[command(version)]
struct Args {
    /// Bearer token for the search intent API
    #[arg(long, env = API_KEY_ENV, hide = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Search intent API endpoint
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Outbound request timeout in seconds
    #[arg(long, env = TIMEOUT_ENV, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("search_intent_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::new(args.api_key, args.api_url, args.timeout_secs).inspect_err(|e| {
        tracing::error!(error = %e, "Refusing to start");
    })?;

    tracing::info!(
        api_url = %config.api_url,
        timeout_secs = config.timeout.as_secs(),
        "Starting search-intent-mcp server"
    );

    let server = SearchIntentServer::new(&config)?;
    server.run().await?;

    Ok(())
}
