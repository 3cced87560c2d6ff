//! Reasoning service configuration from TOML (`[gemini]` section)

use serde::{Deserialize, Serialize};

/// Gemini API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable holding the API key (default: "API_KEY").
    pub api_key_env: String,
    /// Base URL for the Gemini REST API.
    pub base_url: String,
    /// Model name used for every turn.
    pub model: String,
    /// Whole-request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            timeout_secs: None,
        }
    }
}
