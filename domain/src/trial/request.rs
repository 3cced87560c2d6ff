//! Outbound turn request

use super::entities::Session;
use super::records::{Contradiction, Principle};
use serde::Serialize;

/// The minimal state the reasoning service needs to act consistently with
/// earlier turns (Value Object).
///
/// The transcript is deliberately not part of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRequest {
    pub round: u32,
    pub score: i64,
    pub principles: Vec<Principle>,
    pub contradictions: Vec<Contradiction>,
    pub participant_input: String,
    pub max_rounds: u32,
}

impl TurnRequest {
    pub fn from_session(session: &Session, participant_input: impl Into<String>) -> Self {
        Self {
            round: session.round(),
            score: session.score(),
            principles: session.principles().to_vec(),
            contradictions: session.contradictions().to_vec(),
            participant_input: participant_input.into(),
            max_rounds: session.rules().max_rounds,
        }
    }

    /// Whether the service must answer with `final_report`
    pub fn must_conclude(&self) -> bool {
        self.round >= self.max_rounds
    }
}
