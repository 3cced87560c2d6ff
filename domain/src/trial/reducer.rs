//! Session transitions
//!
//! The reducer is the only code that produces new [`Session`] snapshots.
//! Every transition checks the current phase first and rejects calls that
//! the state machine does not allow with [`DomainError::StateViolation`],
//! leaving the caller's snapshot as it was.

use super::entities::{FailureKind, Session, TrialFailure, TrialPhase};
use super::records::Utterance;
use super::rules::{DEFAULT_CONSISTENCY_REPORT, DEFAULT_FINAL_SUMMARY, RoundCapPolicy};
use super::turn_result::{NextStep, TurnResult};
use crate::core::error::DomainError;
use serde_json::Value;

impl Session {
    fn require(&self, phase: TrialPhase, operation: &'static str) -> Result<(), DomainError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(DomainError::state_violation(operation, self.phase.display_name()))
        }
    }

    /// `NotStarted → AwaitingTurn`: the opening request is about to be sent.
    pub fn begin(&self) -> Result<Session, DomainError> {
        self.require(TrialPhase::NotStarted, "begin the trial")?;
        let mut next = self.clone();
        next.phase = TrialPhase::AwaitingTurn;
        Ok(next)
    }

    /// `AwaitingParticipant → AwaitingTurn`: record the reply before it is sent.
    ///
    /// The utterance stays in the transcript even if the following request
    /// fails.
    pub fn submit_reply(&self, text: &str) -> Result<Session, DomainError> {
        self.require(TrialPhase::AwaitingParticipant, "submit a reply")?;
        if text.trim().is_empty() {
            return Err(DomainError::EmptyReply);
        }
        let mut next = self.clone();
        next.transcript.push(Utterance::participant(text));
        next.phase = TrialPhase::AwaitingTurn;
        Ok(next)
    }

    /// Validate a raw service result and merge it.
    ///
    /// A result that fails validation is not an error for the caller: the
    /// returned session is in [`TrialPhase::Failed`] with a
    /// [`FailureKind::SchemaViolation`] cause and otherwise unchanged.
    pub fn merge(&self, raw: &Value) -> Result<Session, DomainError> {
        self.require(TrialPhase::AwaitingTurn, "merge a turn result")?;
        match TurnResult::from_value(raw) {
            Ok(result) => self.merge_result(result),
            Err(DomainError::SchemaViolation(detail)) => {
                self.fail(TrialFailure::new(FailureKind::SchemaViolation, detail))
            }
            Err(other) => self.fail(TrialFailure::new(
                FailureKind::SchemaViolation,
                other.to_string(),
            )),
        }
    }

    /// Merge an already validated result.
    pub fn merge_result(&self, result: TurnResult) -> Result<Session, DomainError> {
        self.require(TrialPhase::AwaitingTurn, "merge a turn result")?;

        let forced_by_cap = self.round_cap_reached()
            && self.rules.round_cap == RoundCapPolicy::Enforced
            && result.next_step != NextStep::FinalReport;

        let mut next = self.clone();
        next.score = self.score.saturating_add(result.score_delta).max(0);

        if let Some(principle) = result.new_principle {
            next.principles.push(principle);
        }
        if let Some(contradiction) = result.new_contradiction {
            next.contradictions.push(contradiction);
        }
        next.transcript.push(Utterance::court(result.content));

        if result.next_step == NextStep::Dilemma && !forced_by_cap {
            next.round = self.round + 1;
        }

        let is_over =
            next.score <= 0 || result.next_step == NextStep::FinalReport || forced_by_cap;

        if is_over {
            next.phase = TrialPhase::Terminal;
            next.final_summary = Some(
                result
                    .final_summary
                    .unwrap_or_else(|| DEFAULT_FINAL_SUMMARY.to_string()),
            );
            next.consistency_report = Some(
                result
                    .consistency_report
                    .unwrap_or_else(|| DEFAULT_CONSISTENCY_REPORT.to_string()),
            );
        } else {
            next.phase = TrialPhase::AwaitingParticipant;
        }

        Ok(next)
    }

    /// Move any non-final session to [`TrialPhase::Failed`].
    ///
    /// Score, round and ledgers are left as they were.
    pub fn fail(&self, failure: TrialFailure) -> Result<Session, DomainError> {
        if self.phase.is_final() {
            return Err(DomainError::state_violation(
                "fail the trial",
                self.phase.display_name(),
            ));
        }
        let mut next = self.clone();
        next.phase = TrialPhase::Failed;
        next.failure = Some(failure);
        Ok(next)
    }

    /// Discard everything and return to [`TrialPhase::NotStarted`] under the
    /// same rules. Allowed from any phase.
    pub fn restart(&self) -> Session {
        Session::new(self.rules)
    }
}
