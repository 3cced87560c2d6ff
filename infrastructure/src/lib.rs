//! Infrastructure layer for consistency-trial
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGeminiConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig, FileTrialConfig,
};
pub use gemini::{
    error::{GeminiError, Result},
    gateway::GeminiGateway,
};
pub use logging::JsonlConversationLogger;
