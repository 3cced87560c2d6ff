//! REPL (Read-Eval-Print Loop) for an interactive trial

use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::{DeliberationSpinner, SimpleProgress};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::debug;
use trial_application::{
    DeliberationNotifier, NoDeliberationProgress, TrialController, TrialError, is_recoverable,
};
use trial_domain::{OutputFormat, Session, TrialPhase};

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Status,
    Principles,
    Contradictions,
    Restart,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for anything else.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let name = line.split_whitespace().next().unwrap_or(line);
        Some(match name.to_lowercase().as_str() {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/status" | "/s" => ReplCommand::Status,
            "/principles" | "/p" => ReplCommand::Principles,
            "/contradictions" | "/c" => ReplCommand::Contradictions,
            "/restart" | "/r" => ReplCommand::Restart,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(name.to_string()),
        })
    }
}

/// Prompt shown for the current phase
fn prompt_for(phase: TrialPhase) -> &'static str {
    match phase {
        TrialPhase::AwaitingParticipant => "you> ",
        _ => "> ",
    }
}

/// Interactive trial REPL
pub struct TrialRepl {
    controller: TrialController,
    output: OutputConfig,
    repl: ReplConfig,
}

impl TrialRepl {
    pub fn new(controller: TrialController) -> Self {
        Self {
            controller,
            output: OutputConfig::default(),
            repl: ReplConfig::default(),
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_repl(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    /// Run the interactive REPL. The trial opens immediately.
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.repl.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();
        self.start_trial().await;

        loop {
            let readline = rl.readline(prompt_for(self.controller.session().phase()));

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command).await {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_reply(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("The Court is adjourned.");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        if self.output.format == OutputFormat::Json {
            return;
        }
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Consistency Trial              │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "The Court will test your principles over {} rounds.",
            self.controller.session().rules().max_rounds
        );
        println!("Every contradiction costs you points.");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?           - Show this help");
        println!("  /status, /s             - Show round, score and phase");
        println!("  /principles, /p         - List recorded principles");
        println!("  /contradictions, /c     - List detected contradictions");
        println!("  /restart, /r            - Abandon this trial and start over");
        println!("  /quit, /exit, /q        - Leave the Court");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, command: ReplCommand) -> bool {
        let session = self.controller.session();
        let json = self.output.format == OutputFormat::Json;

        match command {
            ReplCommand::Quit => {
                println!("The Court is adjourned.");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Status if json => println!("{}", ConsoleFormatter::format_json(session)),
            ReplCommand::Status => print!("{}", ConsoleFormatter::format_status(session)),
            ReplCommand::Principles if json => println!(
                "{}",
                serde_json::to_string_pretty(session.principles()).unwrap_or_default()
            ),
            ReplCommand::Principles => println!("{}", ConsoleFormatter::format_principles(session)),
            ReplCommand::Contradictions if json => println!(
                "{}",
                serde_json::to_string_pretty(session.contradictions()).unwrap_or_default()
            ),
            ReplCommand::Contradictions => {
                println!("{}", ConsoleFormatter::format_contradictions(session))
            }
            ReplCommand::Restart => {
                self.controller.restart();
                if !json {
                    println!("{}", "A new trial begins.".cyan().bold());
                }
                self.start_trial().await;
            }
            ReplCommand::Unknown(name) => {
                println!("Unknown command: {}", name);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn notifier(&self) -> Box<dyn DeliberationNotifier> {
        if self.output.quiet || self.output.format == OutputFormat::Json {
            Box::new(NoDeliberationProgress)
        } else if self.repl.show_progress {
            Box::new(DeliberationSpinner::new())
        } else {
            Box::new(SimpleProgress)
        }
    }

    async fn start_trial(&mut self) {
        let before = self.controller.session().clone();
        let progress = self.notifier();
        let format = self.output.format;
        let result = self.controller.start(progress.as_ref()).await;
        Self::print_outcome(format, &before, result);
    }

    async fn process_reply(&mut self, text: &str) {
        match self.controller.session().phase() {
            TrialPhase::AwaitingParticipant => {}
            TrialPhase::Terminal => {
                println!("The trial has concluded. Type /restart to stand trial again.");
                return;
            }
            TrialPhase::Failed => {
                println!("The trial was interrupted. Type /restart to begin a new trial.");
                return;
            }
            TrialPhase::NotStarted => {
                self.start_trial().await;
                return;
            }
            TrialPhase::AwaitingTurn => {
                debug!("Reply ignored while a turn is outstanding");
                return;
            }
        }

        println!();
        let before = self.controller.session().clone();
        let progress = self.notifier();
        let format = self.output.format;
        let result = self.controller.reply(text, progress.as_ref()).await;
        Self::print_outcome(format, &before, result);
    }

    fn print_outcome(format: OutputFormat, before: &Session, result: Result<&Session, TrialError>) {
        match result {
            Ok(after) => {
                match format {
                    OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(after)),
                    OutputFormat::Text => {
                        println!();
                        print!("{}", ConsoleFormatter::format_turn(before, after));
                    }
                }
                if let Some(failure) = after.failure()
                    && !is_recoverable(failure.kind)
                {
                    eprintln!(
                        "{}",
                        "Check the gemini section of your configuration before restarting."
                            .yellow()
                    );
                }
            }
            Err(e) => eprintln!("{} {}", "Rejected:".red().bold(), e),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/help"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse("/?"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse("/status"), Some(ReplCommand::Status));
        assert_eq!(ReplCommand::parse("/principles"), Some(ReplCommand::Principles));
        assert_eq!(ReplCommand::parse("/c"), Some(ReplCommand::Contradictions));
        assert_eq!(ReplCommand::parse("  /RESTART "), Some(ReplCommand::Restart));
        assert_eq!(ReplCommand::parse("/exit"), Some(ReplCommand::Quit));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            ReplCommand::parse("/verdict now"),
            Some(ReplCommand::Unknown("/verdict".to_string()))
        );
    }

    #[test]
    fn test_plain_text_is_a_reply() {
        assert_eq!(ReplCommand::parse("I would pull the lever"), None);
        assert_eq!(ReplCommand::parse("and/or"), None);
    }

    #[test]
    fn test_prompt_marks_participant_turn() {
        assert_eq!(prompt_for(TrialPhase::AwaitingParticipant), "you> ");
        assert_eq!(prompt_for(TrialPhase::Terminal), "> ");
    }
}
