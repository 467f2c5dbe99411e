//! MCP Tool Handlers
//!
//! Validates tool arguments and delegates to the configured
//! [`IntentAnalyzer`]. Argument problems are protocol errors; everything that
//! goes wrong during the lookup itself comes back as an `isError` tool result.

use std::time::Instant;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::IntentAnalyzer;
use crate::tools::{SEARCH_INTENT_TOOL, ToolMeta, ToolResult};
use crate::{Error, Result};

/// Prefix for every failure message returned to the caller
const ERROR_PREFIX: &str = "Error analyzing search intent";

/// Handle a tool call by dispatching to the appropriate handler
pub async fn handle_tool_call(
    analyzer: &dyn IntentAnalyzer,
    tool_name: &str,
    arguments: Value,
) -> Result<ToolResult> {
    match tool_name {
        SEARCH_INTENT_TOOL => handle_search_intent(analyzer, arguments).await,
        _ => Err(Error::UnknownTool(tool_name.to_string())),
    }
}

/// Arguments for search_intent_analysis
#[derive(Debug, Deserialize)]
struct SearchIntentArgs {
    query: String,
}

fn parse_search_intent_args(arguments: Value) -> Result<SearchIntentArgs> {
    if !arguments.is_object() {
        return Err(Error::InvalidParams(
            "arguments must be an object with a `query` string".to_string(),
        ));
    }

    let args: SearchIntentArgs =
        serde_json::from_value(arguments).map_err(|e| Error::InvalidParams(e.to_string()))?;

    if args.query.trim().is_empty() {
        return Err(Error::InvalidParams(
            "`query` must not be empty".to_string(),
        ));
    }

    Ok(args)
}

/// Handle search_intent_analysis - Classify the intent of a search query
async fn handle_search_intent(analyzer: &dyn IntentAnalyzer, arguments: Value) -> Result<ToolResult> {
    let args = parse_search_intent_args(arguments)?;
    debug!(query = %args.query, "Analyzing search intent");

    let started = Instant::now();
    let outcome = analyzer.analyze(&args.query).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(data) => {
            info!(
                latency_ms,
                intent = data.intent().unwrap_or("-"),
                categories = data.category_count(),
                "Search intent analyzed"
            );
            let text = serde_json::to_string_pretty(&data)?;
            Ok(ToolResult::text(text).with_meta(ToolMeta::now().with_latency_ms(latency_ms)))
        }
        Err(e) => {
            warn!(error_type = e.error_type(), latency_ms, error = %e, "Search intent analysis failed");
            Ok(ToolResult::error(format!("{}: {}", ERROR_PREFIX, e))
                .with_meta(ToolMeta::now().with_error_type(e.error_type())))
        }
    }
}
