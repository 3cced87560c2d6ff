//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for trial output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Dialogue, status lines and the final verdict
    Text,
    /// Session snapshot as JSON after every turn
    Json,
}

impl From<OutputFormat> for trial_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => trial_domain::OutputFormat::Text,
            OutputFormat::Json => trial_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for consistency-trial
#[derive(Parser, Debug)]
#[command(name = "consistency-trial")]
#[command(author, version, about = "A turn-based trial of your moral consistency")]
#[command(long_about = r#"
Consistency Trial poses a series of moral dilemmas and cross-examines your
answers. Every principle you state is recorded; every contradiction costs
you points. After the last round the Court delivers its verdict.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./trial.toml        Project-level config (or ./.trial.toml)
3. ~/.config/consistency-trial/config.toml   Global config

The API key is read from the environment variable named by
gemini.api_key_env (default: API_KEY).

Example:
  consistency-trial
  consistency-trial --model gemini-2.5-flash --log-file trial.jsonl
  consistency-trial --output json -q
"#)]
pub struct Cli {
    /// Reasoning model to use (overrides gemini.model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format (overrides output.format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Append trial events as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Let the service keep going after the round limit instead of
    /// concluding the trial
    #[arg(long)]
    pub advisory_round_cap: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
