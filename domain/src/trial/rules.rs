//! Fixed trial parameters

use serde::{Deserialize, Serialize};

/// Rounds after which the court must deliver its final report
pub const DEFAULT_MAX_ROUNDS: u32 = 7;

/// Score every trial starts from
pub const INITIAL_SCORE: i64 = 100;

/// Input sent in place of a player reply to open the trial
pub const START_SIGNAL: &str = "The player is ready to begin.";

pub const DEFAULT_FINAL_SUMMARY: &str =
    "The trial has concluded. Your moral architecture has been logged.";

pub const DEFAULT_CONSISTENCY_REPORT: &str =
    "No specific findings were articulated before termination.";

/// How the round limit is enforced.
///
/// The request always tells the service to conclude once the limit is
/// reached. `Enforced` additionally makes the reducer end the trial itself
/// if the service ignores that instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundCapPolicy {
    #[default]
    Enforced,
    Advisory,
}

impl RoundCapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundCapPolicy::Enforced => "enforced",
            RoundCapPolicy::Advisory => "advisory",
        }
    }
}

impl std::str::FromStr for RoundCapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enforced" => Ok(RoundCapPolicy::Enforced),
            "advisory" => Ok(RoundCapPolicy::Advisory),
            other => Err(format!("unknown round cap policy '{other}'")),
        }
    }
}

/// Rules a session is played under (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRules {
    pub max_rounds: u32,
    pub initial_score: i64,
    pub round_cap: RoundCapPolicy,
}

impl Default for TrialRules {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            initial_score: INITIAL_SCORE,
            round_cap: RoundCapPolicy::default(),
        }
    }
}

impl TrialRules {
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_initial_score(mut self, initial_score: i64) -> Self {
        self.initial_score = initial_score.max(0);
        self
    }

    pub fn with_round_cap(mut self, round_cap: RoundCapPolicy) -> Self {
        self.round_cap = round_cap;
        self
    }
}
