//! Output format value object

use serde::{Deserialize, Serialize};

/// How trial output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable dialogue and verdict (default)
    #[default]
    Text,
    /// Full session snapshot as JSON
    Json,
}
