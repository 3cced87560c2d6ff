//! Transcript port.
//!
//! A trial leaves two kinds of record: `tracing` diagnostics for whoever runs
//! the binary, and a machine-readable transcript of what happened in the
//! trial itself. This port carries the second. Each event has a fixed type
//! name and a JSON payload; the constructors below are the only events the
//! controller emits.

use serde_json::{Value, json};
use trial_domain::{Session, TrialFailure, TurnRequest};

/// One transcript record.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    /// `trial_started`, `participant_reply`, `turn_request`, `turn_merged`,
    /// `turn_failed` or `trial_concluded`
    pub event_type: &'static str,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// The opening request is about to be sent.
    pub fn trial_started(session: &Session) -> Self {
        let rules = session.rules();
        Self::new(
            "trial_started",
            json!({
                "max_rounds": rules.max_rounds,
                "initial_score": session.score(),
                "round_cap": rules.round_cap.as_str(),
            }),
        )
    }

    pub fn participant_reply(round: u32, text: &str) -> Self {
        Self::new("participant_reply", json!({ "round": round, "text": text }))
    }

    /// Ledgers are summarised by size; the full lists are in `trial_concluded`.
    pub fn turn_request(request: &TurnRequest) -> Self {
        Self::new(
            "turn_request",
            json!({
                "round": request.round,
                "score": request.score,
                "principles": request.principles.len(),
                "contradictions": request.contradictions.len(),
                "participant_input": request.participant_input,
                "must_conclude": request.must_conclude(),
            }),
        )
    }

    /// A valid result was merged; `raw` is the service's answer.
    pub fn turn_merged(raw: &Value, merged: &Session) -> Self {
        Self::new(
            "turn_merged",
            json!({
                "next_step": raw.get("next_step"),
                "score_delta": raw.get("score_delta"),
                "round": merged.round(),
                "score": merged.score(),
                "phase": merged.phase().as_str(),
                "content": merged.last_court_utterance().map(|u| u.text.as_str()),
            }),
        )
    }

    pub fn turn_failed(failure: &TrialFailure, round: u32) -> Self {
        Self::new(
            "turn_failed",
            json!({
                "kind": failure.kind.as_str(),
                "message": failure.message,
                "round": round,
            }),
        )
    }

    /// The verdict, with both ledgers in full.
    pub fn trial_concluded(session: &Session) -> Self {
        Self::new(
            "trial_concluded",
            json!({
                "round": session.round(),
                "score": session.score(),
                "principles": session.principles(),
                "contradictions": session.contradictions(),
                "final_summary": session.final_summary(),
                "consistency_report": session.consistency_report(),
            }),
        )
    }
}

/// Sink for transcript events.
///
/// `log` is synchronous and infallible; a logger that cannot write drops
/// the event.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Used when no transcript file is configured.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
