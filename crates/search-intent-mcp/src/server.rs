//! MCP Server implementation
//!
//! The main server struct that coordinates MCP protocol handling
//! with the search intent lookup.

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::client::{IntentAnalyzer, IntentClient};
use crate::config::Config;
use crate::handlers::handle_tool_call;
use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, InitializeParams, InitializeResult,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability,
};
use crate::tools::{ToolDefinition, get_tool_definitions};
use crate::{Error, Result};

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "search-intent-mcp";

/// MCP Server for search intent analysis
///
/// Serves newline-delimited JSON-RPC 2.0 over any async reader/writer pair,
/// normally the process stdin/stdout.
///
/// # Example
///
/// ```ignore
/// use search_intent_mcp::{Config, SearchIntentServer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::new(std::env::var("SEARCH_INTENT_API_KEY").ok(), search_intent_mcp::config::DEFAULT_API_URL, 30)?;
///     SearchIntentServer::new(&config)?.run().await?;
///     Ok(())
/// }
/// ```
pub struct SearchIntentServer {
    analyzer: Arc<dyn IntentAnalyzer>,
    tools: Vec<ToolDefinition>,
}

impl SearchIntentServer {
    /// Create a server backed by the HTTP search intent client
    pub fn new(config: &Config) -> Result<Self> {
        let client = IntentClient::new(config)?;
        Ok(Self::with_analyzer(Arc::new(client)))
    }

    /// Create a server backed by any analyzer
    pub fn with_analyzer(analyzer: Arc<dyn IntentAnalyzer>) -> Self {
        Self {
            analyzer,
            tools: get_tool_definitions(),
        }
    }

    /// Serve MCP over the process stdin/stdout until stdin closes
    pub async fn run(&self) -> Result<()> {
        tracing::info!("MCP server ready, listening on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve MCP messages read line by line from `reader`, writing one
    /// response line per request to `writer`.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding line that is not UTF-8");
                    let response = encode(JsonRpcResponse::error(
                        None,
                        PARSE_ERROR,
                        format!("Parse error: {}", e),
                    ))?;
                    write_line(&mut writer, &response).await?;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let response = match self.handle_message(line).await {
                Ok(response) => response,
                Err(Error::Json(e)) => encode(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))?,
                Err(e) => encode(JsonRpcResponse::error(
                    None,
                    INTERNAL_ERROR,
                    format!("Internal error: {}", e),
                ))?,
            };

            // Notifications produce no output
            if response.is_empty() {
                continue;
            }

            write_line(&mut writer, &response).await?;
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the JSON-RPC response as a string, or an empty string for
    /// notifications. Text that is not JSON at all is an [`Error::Json`].
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let value: Value = serde_json::from_str(message)?;
        let raw_id = value.get("id").filter(|id| !id.is_null()).cloned();

        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return encode(JsonRpcResponse::error(
                    raw_id,
                    INVALID_REQUEST,
                    format!("Invalid Request: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return encode(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                format!("Invalid Request: unsupported jsonrpc version '{}'", request.jsonrpc),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, &request.params)?,
            "initialized" | "notifications/initialized" => return Ok(String::new()),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id)?,
            "tools/call" if request.is_notification() => {
                // Still run the call, but a notification never gets a reply
                self.handle_tools_call(None, request.params).await?;
                return Ok(String::new());
            }
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            _ if request.is_notification() => {
                tracing::debug!(method = %request.method, "Ignoring notification");
                return Ok(String::new());
            }
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        encode(response)
    }

    /// Handle the initialize request
    ///
    /// Returns server capabilities and info.
    fn handle_initialize(&self, id: Option<Value>, params: &Value) -> Result<JsonRpcResponse> {
        if let Ok(params) = serde_json::from_value::<InitializeParams>(params.clone()) {
            tracing::info!(
                client = %params.client_info.name,
                client_version = %params.client_info.version,
                protocol_version = %params.protocol_version,
                "Client initializing"
            );
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        Ok(JsonRpcResponse::success(
            id,
            json!({ "tools": serde_json::to_value(&self.tools)? }),
        ))
    }

    /// Handle tools/call request
    ///
    /// Argument problems become JSON-RPC errors; lookup failures come back as
    /// successful responses carrying an `isError` tool result.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let tool_params: ToolCallParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid params: {}", e),
                ));
            }
        };

        match handle_tool_call(
            self.analyzer.as_ref(),
            &tool_params.name,
            tool_params.arguments,
        )
        .await
        {
            Ok(result) => Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?)),
            Err(e) => {
                tracing::debug!(tool = %tool_params.name, error = %e, "Rejected tool call");
                Ok(JsonRpcResponse::error(id, e.rpc_code(), e.to_string()))
            }
        }
    }

    /// Get available tools
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }
}

fn encode(response: JsonRpcResponse) -> Result<String> {
    serde_json::to_string(&response).map_err(Error::from)
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
