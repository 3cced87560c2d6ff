//! Domain layer for consistency-trial
//!
//! This crate contains the trial state machine, the records it accumulates,
//! and the validation applied to every result from the reasoning service.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Trial**: one run of a [`Session`] from `NotStarted` to `Terminal` or `Failed`
//! - **Turn**: one request/merge cycle; a [`TurnResult`] is merged by the reducer
//! - **Dilemma**: a new scenario, advances the round
//! - **Cross-examination**: a follow-up on the current scenario, does not

pub mod config;
pub mod core;
pub mod prompt;
pub mod trial;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use prompt::TrialPromptTemplate;
pub use trial::{
    entities::{FailureKind, Session, TrialFailure, TrialPhase},
    rating::Rating,
    records::{Contradiction, Principle, Speaker, Utterance},
    request::TurnRequest,
    rules::{
        DEFAULT_CONSISTENCY_REPORT, DEFAULT_FINAL_SUMMARY, DEFAULT_MAX_ROUNDS, INITIAL_SCORE,
        RoundCapPolicy, START_SIGNAL, TrialRules,
    },
    turn_result::{NextStep, RawTurnResult, TurnResult},
};
