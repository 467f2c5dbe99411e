//! MCP Tool definitions
//!
//! The server exposes exactly one tool:
//!
//! - `search_intent_analysis` - Classify the intent behind a search query,
//!   returning related categories, reasoning, reference links and
//!   follow-up search suggestions.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Name of the single tool exposed by this server
pub const SEARCH_INTENT_TOOL: &str = "search_intent_analysis";

const SEARCH_INTENT_DESCRIPTION: &str = "\
Analyze the intent behind a search query.

Features:
- Classify the search intent of a query
- Identify related topic categories
- Suggest related search terms
- Provide reference links

Examples:
\"iphone 15\" -> product research / purchase intent
\"python tutorial\" -> learning intent

Response fields:
- query: the original search term
- intent: the classified search intent
- possibleCategories: related categories
- reasoning: why the intent was chosen
- references: reference links (url, title)
- groundingMetadata.searchSuggestions: related search terms";

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<ToolMeta>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Auxiliary metadata attached to every tool result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolMeta {
    pub version: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl ToolMeta {
    /// Metadata stamped with the current time and server version
    pub fn now() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            latency_ms: None,
            error_type: None,
        }
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: false,
            meta: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: ToolMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Text of the first content block
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

/// Get all available tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: SEARCH_INTENT_TOOL.to_string(),
        description: SEARCH_INTENT_DESCRIPTION.to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Enter a search term to analyze"
                }
            },
            "required": ["query"]
        }),
    }]
}
