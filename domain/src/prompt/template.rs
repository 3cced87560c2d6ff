//! Prompt templates for the trial court

use crate::trial::request::TurnRequest;
use serde_json::{Value, json};

/// Templates for generating the court's instructions
pub struct TrialPromptTemplate;

impl TrialPromptTemplate {
    /// Fixed system instruction sent with every turn
    pub fn system_instruction(max_rounds: u32) -> String {
        format!(
            r#"You are an impartial philosophical court conducting a consistency-based moral trial.
Your role is NOT to judge morality as right or wrong, but to evaluate the internal logical consistency of the player's reasoning.

GAME RULES:
- Objective: Test player consistency, not correctness.
- Scoring: Start 100. Contradiction: -10. Minor inconsistency: -5. Strong consistency: +5.
- Constraints:
    - Never reveal scoring logic in conversation.
    - Treat earlier answers as binding precedents.
    - Cross-examination must reference player's own words.
- Tone: Formal, calm, judicial, analytical, detached, precise. No emotional validation or preaching.

ROUND STRUCTURE:
1. Present a morally ambiguous dilemma.
2. Receive player response.
3. Extract core principles as short logical statements.
4. Cross-examine by challenging implications or edge cases.
5. Evaluate consistency.

MAX ROUNDS: {max_rounds}.
EARLY TERMINATION: Score <= 0.

RESPONSE FORMAT:
You MUST respond in JSON format following the TrialResult structure."#
        )
    }

    /// Per-turn prompt carrying the session state and the participant input
    pub fn turn_prompt(request: &TurnRequest) -> String {
        let principles =
            serde_json::to_string(&request.principles).unwrap_or_else(|_| "[]".to_string());
        let contradictions =
            serde_json::to_string(&request.contradictions).unwrap_or_else(|_| "[]".to_string());

        let mut prompt = format!(
            r#"Current Round: {round}
Current Score: {score}
Stored Principles: {principles}
Noted Contradictions: {contradictions}

Player's Response: "{input}"

Evaluate the player's response.
If this is the start (Round 0), present the first dilemma.
If the player just answered a dilemma, extract principles and cross-examine.
If the player answered a cross-examination, evaluate consistency, update principles/contradictions, and move to next dilemma or final report.

MAX ROUNDS is {max}. If Round >= {max}, next_step MUST be final_report."#,
            round = request.round,
            score = request.score,
            input = request.participant_input,
            max = request.max_rounds,
        );

        if request.must_conclude() {
            prompt.push_str("\n\nThe round limit has been reached. Deliver the final_report now.");
        }

        prompt
    }

    /// Structured output schema the service must answer in
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "next_step": {
                    "type": "STRING",
                    "enum": ["dilemma", "cross_examination", "final_report"],
                    "description": "Determines if we are moving to a new scenario, digging deeper into the current one, or ending the trial."
                },
                "content": {
                    "type": "STRING",
                    "description": "The dialogue from the Court to the player."
                },
                "score_delta": {
                    "type": "NUMBER",
                    "description": "Adjustment to the player's internal score (hidden)."
                },
                "new_principle": {
                    "type": "OBJECT",
                    "properties": {
                        "principle_id": { "type": "STRING" },
                        "principle_summary": { "type": "STRING" },
                        "source_round": { "type": "NUMBER" }
                    },
                    "required": ["principle_id", "principle_summary", "source_round"]
                },
                "new_contradiction": {
                    "type": "OBJECT",
                    "properties": {
                        "round": { "type": "NUMBER" },
                        "conflict_between": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["round", "conflict_between", "explanation"]
                },
                "final_summary": {
                    "type": "STRING",
                    "description": "Only if next_step is final_report. A neutral analysis."
                },
                "consistency_report": {
                    "type": "STRING",
                    "description": "Only if next_step is final_report. Strengths and weaknesses."
                }
            },
            "required": ["next_step", "content", "score_delta"]
        })
    }
}
