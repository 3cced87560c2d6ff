//! CLI entrypoint for Consistency Trial
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trial_application::{ConversationLogger, TrialController};
use trial_domain::{ConfigIssue, RoundCapPolicy};
use trial_infrastructure::{ConfigLoader, FileConfig, GeminiGateway, JsonlConversationLogger};
use trial_presentation::{Cli, OutputConfig, ReplConfig, TrialRepl};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("{}", e))
            .context("Failed to load configuration")?
    };

    if let Some(model) = &cli.model {
        config.gemini.model = model.clone();
    }

    report_issues(&config.validate())?;

    let (mut rules, _) = config.trial.to_rules();
    if cli.advisory_round_cap {
        rules = rules.with_round_cap(RoundCapPolicy::Advisory);
    }

    info!(
        "Starting Consistency Trial (model: {}, {} rounds)",
        config.gemini.model, rules.max_rounds
    );

    // === Dependency Injection ===
    // A missing key is a configuration failure: no request is ever sent
    let gateway = GeminiGateway::from_config(&config.gemini)
        .context("The reasoning service is not configured")?;

    let mut controller = TrialController::new(Arc::new(gateway), rules);
    if let Some(logger) = transcript_logger(&cli, &config) {
        controller = controller.with_conversation_logger(logger);
    }

    let output = output_config(&cli, &config);
    if !output.color {
        colored::control::set_override(false);
    }

    let repl = ReplConfig {
        show_progress: config.repl.show_progress,
        history_file: config.repl.history_file.clone(),
    };

    TrialRepl::new(controller)
        .with_output(output)
        .with_repl(repl)
        .run()
        .await?;

    Ok(())
}

fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        if issue.is_error() {
            eprintln!("{} {}", "config error:".red().bold(), issue.message);
        } else {
            eprintln!("{} {}", "config warning:".yellow().bold(), issue.message);
        }
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }
    Ok(())
}

fn transcript_logger(cli: &Cli, config: &FileConfig) -> Option<Arc<dyn ConversationLogger>> {
    let path = cli
        .log_file
        .clone()
        .or_else(|| config.logging.transcript_file.as_ref().map(PathBuf::from))?;

    match JsonlConversationLogger::new(&path) {
        Some(logger) => {
            info!("Recording trial transcript to {}", path.display());
            Some(Arc::new(logger))
        }
        None => {
            warn!("Transcript logging disabled: cannot open {}", path.display());
            None
        }
    }
}

fn output_config(cli: &Cli, config: &FileConfig) -> OutputConfig {
    OutputConfig {
        format: config.output.resolve_format(cli.output.map(Into::into)),
        color: config.output.color,
        quiet: cli.quiet,
    }
}
