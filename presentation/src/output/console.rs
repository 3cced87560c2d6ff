//! Console output formatter for trial sessions

use colored::Colorize;
use trial_domain::{Rating, Session, TrialFailure, TrialPhase};

const PROGRESS_WIDTH: usize = 20;

/// Formats trial sessions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Everything that changed between two snapshots: newly recorded
    /// principles and contradictions, then the Court's latest words.
    pub fn format_turn(before: &Session, after: &Session) -> String {
        let mut output = String::new();

        let new_principles = after.principles().get(before.principles().len()..);
        for principle in new_principles.unwrap_or_default() {
            output.push_str(&format!(
                "{} {} {}\n",
                "+ Principle recorded".green().bold(),
                format!("[{}]", principle.id).dimmed(),
                principle.summary
            ));
        }

        let new_contradictions = after.contradictions().get(before.contradictions().len()..);
        for contradiction in new_contradictions.unwrap_or_default() {
            output.push_str(&format!(
                "{} {}\n",
                "! Contradiction detected:".red().bold(),
                contradiction.explanation
            ));
        }

        let delta = after.score() - before.score();
        if delta != 0 {
            let shown = format!("{:+} points", delta);
            let shown = if delta < 0 { shown.red() } else { shown.green() };
            output.push_str(&format!("{}\n", shown));
        }

        if !output.is_empty() {
            output.push('\n');
        }

        if let Some(court) = after.last_court_utterance()
            && after.transcript().len() > before.transcript().len()
        {
            output.push_str(&format!("{}\n", format!("── {} ──", court.speaker).yellow().bold()));
            output.push_str(&court.text);
            output.push_str("\n\n");
        }

        match after.phase() {
            TrialPhase::Terminal => output.push_str(&Self::format_report(after)),
            TrialPhase::Failed => {
                if let Some(failure) = after.failure() {
                    output.push_str(&Self::format_failure(failure));
                }
            }
            _ => output.push_str(&Self::format_status(after)),
        }

        output
    }

    /// One-line status: phase, round progress and score
    pub fn format_status(session: &Session) -> String {
        let filled = (session.progress() * PROGRESS_WIDTH as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(PROGRESS_WIDTH.saturating_sub(filled))
        );
        format!(
            "{} {} {}/{}  {} {}  {} principles, {} contradictions  {}\n",
            "Round".dimmed(),
            bar.cyan(),
            session.round(),
            session.rules().max_rounds,
            "Score:".dimmed(),
            Self::colored_score(session.score()),
            session.principles().len(),
            session.contradictions().len(),
            session.phase().display_name().dimmed()
        )
    }

    /// Principles ledger
    pub fn format_principles(session: &Session) -> String {
        let mut output = Self::section_header("Principles");
        if session.principles().is_empty() {
            output.push_str("  (none recorded yet)\n");
        }
        for principle in session.principles() {
            output.push_str(&format!(
                "  {} {} {}\n",
                format!("[{}]", principle.id).cyan(),
                principle.summary,
                format!("(round {})", principle.source_round).dimmed()
            ));
        }
        output
    }

    /// Contradictions ledger
    pub fn format_contradictions(session: &Session) -> String {
        let mut output = Self::section_header("Contradictions");
        if session.contradictions().is_empty() {
            output.push_str("  (none detected)\n");
        }
        for contradiction in session.contradictions() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("Round {}:", contradiction.round).red().bold(),
                contradiction.explanation
            ));
            if !contradiction.conflicting_refs.is_empty() {
                output.push_str(&format!(
                    "    {} {}\n",
                    "between".dimmed(),
                    contradiction.conflicting_refs.join(" <-> ")
                ));
            }
        }
        output
    }

    /// The final verdict
    pub fn format_report(session: &Session) -> String {
        let mut output = String::new();
        let rating = Rating::from_score(session.score());

        output.push_str(&Self::header("The Court's Verdict"));
        output.push('\n');

        output.push_str(&format!(
            "\n{} {}\n",
            "Rating:".cyan().bold(),
            rating.title().bold()
        ));
        output.push_str(&format!(
            "{} {}  {} {}/{}\n",
            "Final score:".cyan().bold(),
            Self::colored_score(session.score()),
            "Rounds:".cyan().bold(),
            session.round(),
            session.rules().max_rounds
        ));

        if let Some(summary) = session.final_summary() {
            output.push_str(&Self::section_header("Summary"));
            output.push_str(&Self::indent(summary, "  "));
            output.push('\n');
        }

        if let Some(report) = session.consistency_report() {
            output.push_str(&Self::section_header("Consistency Report"));
            output.push_str(&Self::indent(report, "  "));
            output.push('\n');
        }

        output.push_str(&Self::format_principles(session));
        output.push_str(&Self::format_contradictions(session));
        output.push_str(&Self::footer());
        output.push_str("Type /restart to stand trial again, or /quit to leave.\n");

        output
    }

    /// Why the trial stopped
    pub fn format_failure(failure: &TrialFailure) -> String {
        format!(
            "{} {}\n{}\n",
            format!("The trial was interrupted ({}):", failure.kind.as_str())
                .red()
                .bold(),
            failure.message,
            "Type /restart to begin a new trial, or /quit to leave.".dimmed()
        )
    }

    /// Format the session snapshot as JSON
    pub fn format_json(session: &Session) -> String {
        serde_json::to_string_pretty(session).unwrap_or_else(|_| "{}".to_string())
    }

    fn colored_score(score: i64) -> colored::ColoredString {
        let text = score.to_string();
        match Rating::from_score(score) {
            Rating::ArchitectOfClarity | Rating::PrincipledThinker => text.green().bold(),
            Rating::FlexiblePragmatist | Rating::ConflictedSoul => text.yellow().bold(),
            Rating::LogicalVoid => text.red().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
