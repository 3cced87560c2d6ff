//! Configuration file loading for consistency-trial
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TRIAL_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./trial.toml` or `./.trial.toml`
//! 4. Global: `$XDG_CONFIG_HOME/consistency-trial/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGeminiConfig, FileLoggingConfig, FileOutputConfig, FileReplConfig,
    FileTrialConfig,
};
pub use loader::ConfigLoader;
