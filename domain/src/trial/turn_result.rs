//! Turn results produced by the reasoning service
//!
//! A result arrives as loosely-typed JSON. [`TurnResult::from_value`] is the
//! only way to obtain a [`TurnResult`], so anything the reducer merges has
//! already passed structural validation.
//!
//! | field | required | constraint |
//! |---|---|---|
//! | `next_step` | yes | `dilemma`, `cross_examination` or `final_report` |
//! | `content` | yes | any string |
//! | `score_delta` | yes | finite number, rounded to the nearest integer |
//! | `new_principle` | no | complete [`Principle`] |
//! | `new_contradiction` | no | complete [`Contradiction`] |
//! | `final_summary` | no | string |
//! | `consistency_report` | no | string |

use super::records::{Contradiction, Principle};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the court does next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    /// A new scenario; advances the round
    Dilemma,
    /// A follow-up probe on the current scenario
    CrossExamination,
    /// The trial ends
    FinalReport,
}

impl NextStep {
    pub const ALL: [NextStep; 3] = [
        NextStep::Dilemma,
        NextStep::CrossExamination,
        NextStep::FinalReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NextStep::Dilemma => "dilemma",
            NextStep::CrossExamination => "cross_examination",
            NextStep::FinalReport => "final_report",
        }
    }
}

impl std::fmt::Display for NextStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NextStep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NextStep::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| {
                DomainError::SchemaViolation(format!(
                    "next_step must be one of dilemma, cross_examination, final_report; got '{s}'"
                ))
            })
    }
}

/// The wire shape of a turn result, before validation.
///
/// Every field is optional here so that a missing required field is reported
/// as a schema violation naming that field rather than as a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTurnResult {
    pub next_step: Option<String>,
    pub content: Option<String>,
    pub score_delta: Option<f64>,
    pub new_principle: Option<Principle>,
    pub new_contradiction: Option<Contradiction>,
    pub final_summary: Option<String>,
    pub consistency_report: Option<String>,
}

impl RawTurnResult {
    /// Check required fields and constraints, producing a mergeable result.
    pub fn validate(self) -> Result<TurnResult, DomainError> {
        let next_step: NextStep = self
            .next_step
            .as_deref()
            .ok_or_else(|| missing("next_step"))?
            .parse()?;

        let content = self.content.ok_or_else(|| missing("content"))?;

        let delta = self.score_delta.ok_or_else(|| missing("score_delta"))?;
        if !delta.is_finite() {
            return Err(DomainError::SchemaViolation(format!(
                "score_delta must be finite, got {delta}"
            )));
        }

        Ok(TurnResult {
            next_step,
            content,
            score_delta: delta.round() as i64,
            new_principle: self.new_principle,
            new_contradiction: self.new_contradiction,
            final_summary: self.final_summary,
            consistency_report: self.consistency_report,
        })
    }
}

fn missing(field: &str) -> DomainError {
    DomainError::SchemaViolation(format!("required field '{field}' is missing"))
}

/// A validated turn result, consumed exactly once by the reducer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnResult {
    pub next_step: NextStep,
    pub content: String,
    pub score_delta: i64,
    pub new_principle: Option<Principle>,
    pub new_contradiction: Option<Contradiction>,
    pub final_summary: Option<String>,
    pub consistency_report: Option<String>,
}

impl TurnResult {
    /// Decode and validate a result as returned by the reasoning service.
    pub fn from_value(value: &Value) -> Result<Self, DomainError> {
        if !value.is_object() {
            return Err(DomainError::SchemaViolation(format!(
                "turn result must be a JSON object, got {}",
                json_kind(value)
            )));
        }
        let raw = RawTurnResult::deserialize(value)
            .map_err(|e| DomainError::SchemaViolation(e.to_string()))?;
        raw.validate()
    }

    pub fn new(next_step: NextStep, content: impl Into<String>, score_delta: i64) -> Self {
        Self {
            next_step,
            content: content.into(),
            score_delta,
            new_principle: None,
            new_contradiction: None,
            final_summary: None,
            consistency_report: None,
        }
    }

    pub fn with_principle(mut self, principle: Principle) -> Self {
        self.new_principle = Some(principle);
        self
    }

    pub fn with_contradiction(mut self, contradiction: Contradiction) -> Self {
        self.new_contradiction = Some(contradiction);
        self
    }

    pub fn with_final_texts(
        mut self,
        final_summary: impl Into<String>,
        consistency_report: impl Into<String>,
    ) -> Self {
        self.final_summary = Some(final_summary.into());
        self.consistency_report = Some(consistency_report.into());
        self
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
