//! Ledger and transcript records
//!
//! All three record types are immutable once created. They are only ever
//! appended to a [`Session`](super::entities::Session), never edited.

use super::wire;
use serde::{Deserialize, Serialize};

/// A distilled rule the participant appears to hold (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principle {
    #[serde(rename = "principle_id")]
    pub id: String,
    #[serde(rename = "principle_summary")]
    pub summary: String,
    #[serde(deserialize_with = "wire::round_number")]
    pub source_round: u32,
}

impl Principle {
    pub fn new(id: impl Into<String>, summary: impl Into<String>, source_round: u32) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            source_round,
        }
    }
}

/// A detected conflict between principles or statements (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    #[serde(deserialize_with = "wire::round_number")]
    pub round: u32,
    /// Principle ids or free-form descriptions of the conflicting positions
    #[serde(rename = "conflict_between")]
    pub conflicting_refs: Vec<String>,
    pub explanation: String,
}

impl Contradiction {
    pub fn new(
        round: u32,
        conflicting_refs: Vec<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            round,
            conflicting_refs,
            explanation: explanation.into(),
        }
    }
}

/// Who said an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Court,
    Participant,
}

impl Speaker {
    pub fn as_str(&self) -> &str {
        match self {
            Speaker::Court => "court",
            Speaker::Participant => "participant",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::Court => write!(f, "The Court"),
            Speaker::Participant => write!(f, "You"),
        }
    }
}

/// One line of the trial transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker: Speaker,
    pub text: String,
}

impl Utterance {
    pub fn court(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Court,
            text: text.into(),
        }
    }

    pub fn participant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Participant,
            text: text.into(),
        }
    }
}
