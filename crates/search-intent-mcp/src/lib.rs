//! MCP Server for search intent analysis
//!
//! This crate exposes a single Model Context Protocol tool,
//! `search_intent_analysis`, which forwards a search query to the
//! search intent API and returns its classification.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (agent/IDE) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ server + handlers (tool registrar) ]
//!        | (IntentAnalyzer)
//!        v
//! [ client (intent fetcher) ]
//!        | (HTTPS, bearer auth)
//!        v
//! [ aisearchintent.com/api/search-intent ]
//! ```
//!
//! Each tool call performs exactly one outbound request. Every lookup
//! failure is returned to the caller as an `isError` tool result; only
//! malformed tool arguments are reported as JSON-RPC errors.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod protocol;
pub mod server;
pub mod tools;

pub use client::{FetchError, IntentAnalyzer, IntentClient};
pub use config::Config;
pub use error::{Error, Result};
pub use intent::IntentResult;
pub use server::SearchIntentServer;
pub use tools::{ToolContent, ToolDefinition, ToolResult, get_tool_definitions};
