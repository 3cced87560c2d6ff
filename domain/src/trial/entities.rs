//! Trial domain entities

use super::records::{Contradiction, Principle, Utterance};
use super::rules::TrialRules;
use serde::{Deserialize, Serialize};

/// Phase of a trial session
///
/// ```text
/// NotStarted ──begin──▶ AwaitingTurn ──merge──▶ AwaitingParticipant
///                          ▲      │                     │
///                          │      └──merge──▶ Terminal  │
///                          └──────── submit_reply ──────┘
///
/// any non-terminal phase ──fail──▶ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialPhase {
    /// No dilemma issued yet
    #[default]
    NotStarted,
    /// A request to the reasoning service is outstanding
    AwaitingTurn,
    /// The court has spoken and waits for the participant
    AwaitingParticipant,
    /// The trial has concluded; the session is frozen
    Terminal,
    /// A request failed; only a restart recovers
    Failed,
}

impl TrialPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialPhase::NotStarted => "not_started",
            TrialPhase::AwaitingTurn => "awaiting_turn",
            TrialPhase::AwaitingParticipant => "awaiting_participant",
            TrialPhase::Terminal => "terminal",
            TrialPhase::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TrialPhase::NotStarted => "not started",
            TrialPhase::AwaitingTurn => "awaiting the court",
            TrialPhase::AwaitingParticipant => "awaiting the participant",
            TrialPhase::Terminal => "concluded",
            TrialPhase::Failed => "failed",
        }
    }

    /// Terminal or Failed: nothing but a restart changes the session
    pub fn is_final(&self) -> bool {
        matches!(self, TrialPhase::Terminal | TrialPhase::Failed)
    }
}

impl std::fmt::Display for TrialPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Why a session entered [`TrialPhase::Failed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Credential missing or invalid
    Configuration,
    /// The request to the reasoning service did not complete
    Transport,
    /// The service answered with a result that failed validation
    SchemaViolation,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Configuration => "configuration",
            FailureKind::Transport => "transport",
            FailureKind::SchemaViolation => "schema_violation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl TrialFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TrialFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failure: {}", self.kind.as_str(), self.message)
    }
}

/// One consistency trial (Aggregate Root)
///
/// A `Session` is a snapshot. Every transition in [`reducer`](super::reducer)
/// takes `&self` and returns a fresh `Session`; the caller replaces its copy
/// wholesale. Ledgers and transcript only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub(super) rules: TrialRules,
    pub(super) round: u32,
    pub(super) score: i64,
    pub(super) principles: Vec<Principle>,
    pub(super) contradictions: Vec<Contradiction>,
    pub(super) transcript: Vec<Utterance>,
    pub(super) phase: TrialPhase,
    pub(super) final_summary: Option<String>,
    pub(super) consistency_report: Option<String>,
    pub(super) failure: Option<TrialFailure>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TrialRules::default())
    }
}

impl Session {
    pub fn new(rules: TrialRules) -> Self {
        Self {
            rules,
            round: 0,
            score: rules.initial_score,
            principles: Vec::new(),
            contradictions: Vec::new(),
            transcript: Vec::new(),
            phase: TrialPhase::NotStarted,
            final_summary: None,
            consistency_report: None,
            failure: None,
        }
    }

    pub fn rules(&self) -> &TrialRules {
        &self.rules
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn principles(&self) -> &[Principle] {
        &self.principles
    }

    pub fn contradictions(&self) -> &[Contradiction] {
        &self.contradictions
    }

    pub fn transcript(&self) -> &[Utterance] {
        &self.transcript
    }

    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    pub fn final_summary(&self) -> Option<&str> {
        self.final_summary.as_deref()
    }

    pub fn consistency_report(&self) -> Option<&str> {
        self.consistency_report.as_deref()
    }

    pub fn failure(&self) -> Option<&TrialFailure> {
        self.failure.as_ref()
    }

    /// The most recent thing the court said
    pub fn last_court_utterance(&self) -> Option<&Utterance> {
        self.transcript
            .iter()
            .rev()
            .find(|u| u.speaker == super::records::Speaker::Court)
    }

    /// True once the round counter has reached the limit
    pub fn round_cap_reached(&self) -> bool {
        self.round >= self.rules.max_rounds
    }

    /// Round progress in `[0.0, 1.0]` for status displays
    pub fn progress(&self) -> f64 {
        if self.rules.max_rounds == 0 {
            return 1.0;
        }
        (f64::from(self.round) / f64::from(self.rules.max_rounds)).min(1.0)
    }
}
