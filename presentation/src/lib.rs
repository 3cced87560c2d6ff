//! Presentation layer for consistency-trial
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive trial REPL.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod trial;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{DeliberationSpinner, SimpleProgress};
pub use trial::{ReplCommand, TrialRepl};
