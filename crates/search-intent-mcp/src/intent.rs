//! Search intent payload types
//!
//! The API's `data` object is handed back to the caller exactly as received,
//! so [`IntentResult`] wraps the raw JSON and only offers read-only views of
//! the documented fields (`query`, `intent`, `possibleCategories`,
//! `reasoning`, `references`, `groundingMetadata.searchSuggestions`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outer structure of every API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    /// `null` and absent both decode to `None`
    #[serde(default)]
    pub data: Option<Value>,
}

/// Intent classification for a single query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentResult(Value);

impl IntentResult {
    pub fn intent(&self) -> Option<&str> {
        self.0.get("intent").and_then(Value::as_str)
    }

    /// Number of entries in `possibleCategories`, zero when absent
    pub fn category_count(&self) -> usize {
        self.0
            .get("possibleCategories")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

impl From<Value> for IntentResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
