//! Trial controller.
//!
//! Owns the current [`Session`] snapshot and drives it through the state
//! machine: each public method computes a new snapshot with the reducer,
//! dispatches at most one request, and replaces the snapshot wholesale.
//!
//! Every method that can dispatch a request takes `&mut self`, so a second
//! request cannot be started while one is outstanding.

use super::request_turn::RequestTurnUseCase;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::deliberation::DeliberationNotifier;
use crate::ports::reasoning_gateway::ReasoningGateway;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use trial_domain::{
    DomainError, FailureKind, NextStep, RoundCapPolicy, START_SIGNAL, Session, TrialFailure,
    TrialPhase, TrialRules,
};

/// A call the state machine refused. The session is unchanged.
#[derive(Error, Debug)]
pub enum TrialError {
    #[error(transparent)]
    Rejected(#[from] DomainError),
}

pub struct TrialController {
    requester: RequestTurnUseCase,
    session: Session,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl TrialController {
    pub fn new(gateway: Arc<dyn ReasoningGateway>, rules: TrialRules) -> Self {
        Self {
            requester: RequestTurnUseCase::new(gateway),
            session: Session::new(rules),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Record trial events to the given logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.requester = self.requester.with_conversation_logger(logger.clone());
        self.conversation_logger = logger;
        self
    }

    /// The latest snapshot
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Open the trial with the synthetic start signal.
    ///
    /// Transport and schema failures do not surface as `Err`: the returned
    /// session is in [`TrialPhase::Failed`] and carries the cause.
    pub async fn start(
        &mut self,
        progress: &dyn DeliberationNotifier,
    ) -> Result<&Session, TrialError> {
        let awaiting = self.session.begin()?;
        info!("Trial started (max {} rounds)", awaiting.rules().max_rounds);
        self.conversation_logger
            .log(ConversationEvent::trial_started(&awaiting));
        self.dispatch(awaiting, START_SIGNAL, progress).await
    }

    /// Submit the participant's reply and request the court's answer.
    pub async fn reply(
        &mut self,
        text: &str,
        progress: &dyn DeliberationNotifier,
    ) -> Result<&Session, TrialError> {
        let awaiting = self.session.submit_reply(text)?;
        self.conversation_logger
            .log(ConversationEvent::participant_reply(awaiting.round(), text));
        self.dispatch(awaiting, text, progress).await
    }

    /// Discard the session and return to `NotStarted`.
    pub fn restart(&mut self) -> &Session {
        info!("Trial restarted from phase {}", self.session.phase().as_str());
        self.session = self.session.restart();
        &self.session
    }

    async fn dispatch(
        &mut self,
        awaiting: Session,
        input: &str,
        progress: &dyn DeliberationNotifier,
    ) -> Result<&Session, TrialError> {
        // The participant's reply is visible before the request completes
        self.session = awaiting;

        progress.on_deliberation_start(self.session.round());
        let outcome = self.requester.execute(&self.session, input).await;
        progress.on_deliberation_end(outcome.is_ok());

        let next = match outcome {
            Ok(raw) => self.merge(&raw)?,
            Err(e) => {
                let kind = e.failure_kind();
                error!("Turn failed ({}): {}", kind.as_str(), e);
                let failure = TrialFailure::new(kind, e.to_string());
                self.conversation_logger
                    .log(ConversationEvent::turn_failed(&failure, self.session.round()));
                self.session.fail(failure)?
            }
        };

        if next.phase() == TrialPhase::Terminal {
            info!(
                "Trial concluded at round {} with score {}",
                next.round(),
                next.score()
            );
            self.conversation_logger
                .log(ConversationEvent::trial_concluded(&next));
        }

        self.session = next;
        Ok(&self.session)
    }

    /// Hand the raw answer to the reducer, which validates it.
    fn merge(&self, raw: &Value) -> Result<Session, TrialError> {
        let next_step = raw
            .get("next_step")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<NextStep>().ok());

        if self.session.round_cap_reached()
            && self.session.rules().round_cap == RoundCapPolicy::Enforced
            && let Some(step) = next_step
            && step != NextStep::FinalReport
        {
            warn!(
                "Service answered {} at round {}; concluding the trial",
                step,
                self.session.round()
            );
        }

        let next = self.session.merge(raw)?;

        if let Some(failure) = next.failure() {
            warn!("Turn failed with schema violation: {}", failure.message);
            self.conversation_logger
                .log(ConversationEvent::turn_failed(failure, self.session.round()));
        } else {
            debug!(
                "Merged {}: round {} -> {}, score {} -> {}",
                next_step.map_or("turn", |s| s.as_str()),
                self.session.round(),
                next.round(),
                self.session.score(),
                next.score()
            );
            self.conversation_logger
                .log(ConversationEvent::turn_merged(raw, &next));
        }

        Ok(next)
    }
}

impl std::fmt::Debug for TrialController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrialController")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Whether `kind` is worth offering a restart for.
///
/// A configuration failure will recur on every attempt.
pub fn is_recoverable(kind: FailureKind) -> bool {
    !matches!(kind, FailureKind::Configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::conversation_logger::ConversationEvent;
    use crate::ports::deliberation::NoDeliberationProgress;
    use crate::ports::reasoning_gateway::GatewayError;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use trial_domain::{Speaker, TurnRequest};

    // === Mock implementations ===

    struct MockGateway {
        answers: Mutex<VecDeque<Result<Value, GatewayError>>>,
        requests: Mutex<Vec<TurnRequest>>,
    }

    impl MockGateway {
        fn new(answers: Vec<Result<Value, GatewayError>>) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(VecDeque::from(answers)),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<TurnRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReasoningGateway for MockGateway {
        async fn request_turn(&self, request: &TurnRequest) -> Result<Value, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            self.answers
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Transport("No more answers".to_string())))
        }
    }

    #[derive(Default)]
    struct CountingProgress {
        started: AtomicUsize,
        ended: AtomicUsize,
    }

    impl DeliberationNotifier for CountingProgress {
        fn on_deliberation_start(&self, _round: u32) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }

        fn on_deliberation_end(&self, _success: bool) {
            self.ended.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn turn(next_step: &str, content: &str, delta: i64) -> Result<Value, GatewayError> {
        Ok(json!({ "next_step": next_step, "content": content, "score_delta": delta }))
    }

    // === Tests ===

    #[tokio::test]
    async fn test_full_trial_flow() {
        let gateway = MockGateway::new(vec![
            turn("dilemma", "A trolley approaches.", 0),
            Ok(json!({
                "next_step": "cross_examination",
                "content": "Would you push the man?",
                "score_delta": 5,
                "new_principle": {
                    "principle_id": "P1",
                    "principle_summary": "Outcomes matter most",
                    "source_round": 1
                }
            })),
            Ok(json!({
                "next_step": "final_report",
                "content": "The court is adjourned.",
                "score_delta": -10,
                "new_contradiction": {
                    "round": 1,
                    "conflict_between": ["P1"],
                    "explanation": "Refused to push despite better outcome"
                },
                "final_summary": "A conflicted consequentialist.",
                "consistency_report": "Wavered under personal involvement."
            })),
        ]);
        let progress = CountingProgress::default();
        let mut controller = TrialController::new(gateway.clone(), TrialRules::default());

        let session = controller.start(&progress).await.unwrap();
        assert_eq!(session.phase(), TrialPhase::AwaitingParticipant);
        assert_eq!(session.round(), 1);

        controller.reply("Pull the lever.", &progress).await.unwrap();
        let session = controller.reply("No, I would not.", &progress).await.unwrap();

        assert_eq!(session.phase(), TrialPhase::Terminal);
        assert_eq!(session.round(), 1);
        assert_eq!(session.score(), 95);
        assert_eq!(session.principles().len(), 1);
        assert_eq!(session.contradictions().len(), 1);
        assert_eq!(session.final_summary(), Some("A conflicted consequentialist."));

        let speakers: Vec<Speaker> = session.transcript().iter().map(|u| u.speaker).collect();
        assert_eq!(
            speakers,
            vec![
                Speaker::Court,
                Speaker::Participant,
                Speaker::Court,
                Speaker::Participant,
                Speaker::Court
            ]
        );

        let requests = gateway.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].participant_input, START_SIGNAL);
        assert_eq!(requests[2].participant_input, "No, I would not.");
        assert_eq!(requests[2].principles.len(), 1);
        assert_eq!(requests[2].score, 105);

        assert_eq!(progress.started.load(Ordering::SeqCst), 3);
        assert_eq!(progress.ended.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_reply_and_fails() {
        let gateway = MockGateway::new(vec![
            turn("dilemma", "A trolley approaches.", 0),
            Err(GatewayError::Transport("connection reset".to_string())),
        ]);
        let mut controller = TrialController::new(gateway, TrialRules::default());
        controller.start(&NoDeliberationProgress).await.unwrap();

        let session = controller
            .reply("Pull the lever.", &NoDeliberationProgress)
            .await
            .unwrap();

        assert_eq!(session.phase(), TrialPhase::Failed);
        assert_eq!(session.failure().unwrap().kind, FailureKind::Transport);
        assert_eq!(session.round(), 1);
        assert_eq!(session.score(), 100);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].text, "Pull the lever.");
    }

    #[tokio::test]
    async fn test_schema_violation_is_distinguishable() {
        let gateway = MockGateway::new(vec![Ok(json!({"next_step": "dilemma"}))]);
        let mut controller = TrialController::new(gateway, TrialRules::default());

        let session = controller.start(&NoDeliberationProgress).await.unwrap();
        let failure = session.failure().unwrap();
        assert_eq!(session.phase(), TrialPhase::Failed);
        assert_eq!(failure.kind, FailureKind::SchemaViolation);
        assert_eq!(failure.message, "required field 'content' is missing");
    }

    #[tokio::test]
    async fn test_configuration_failure() {
        let gateway = MockGateway::new(vec![Err(GatewayError::Configuration(
            "API_KEY is not set".to_string(),
        ))]);
        let mut controller = TrialController::new(gateway, TrialRules::default());

        let session = controller.start(&NoDeliberationProgress).await.unwrap();
        let kind = session.failure().unwrap().kind;
        assert_eq!(kind, FailureKind::Configuration);
        assert!(!is_recoverable(kind));
    }

    #[tokio::test]
    async fn test_state_violations_are_rejected() {
        let gateway = MockGateway::new(vec![turn("final_report", "Done.", 0)]);
        let mut controller = TrialController::new(gateway.clone(), TrialRules::default());

        // Cannot reply before the trial starts
        let err = controller
            .reply("hello", &NoDeliberationProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, TrialError::Rejected(DomainError::StateViolation { .. })));

        controller.start(&NoDeliberationProgress).await.unwrap();
        assert_eq!(controller.session().phase(), TrialPhase::Terminal);

        // Cannot start twice or reply after the verdict
        assert!(controller.start(&NoDeliberationProgress).await.is_err());
        assert!(controller.reply("more", &NoDeliberationProgress).await.is_err());
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_reply_sends_nothing() {
        let gateway = MockGateway::new(vec![turn("dilemma", "Begin.", 0)]);
        let mut controller = TrialController::new(gateway.clone(), TrialRules::default());
        controller.start(&NoDeliberationProgress).await.unwrap();

        let err = controller
            .reply("   ", &NoDeliberationProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, TrialError::Rejected(DomainError::EmptyReply)));
        assert_eq!(controller.session().phase(), TrialPhase::AwaitingParticipant);
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_restart_after_failure() {
        let gateway = MockGateway::new(vec![
            Err(GatewayError::Transport("down".to_string())),
            turn("dilemma", "Begin again.", 0),
        ]);
        let mut controller = TrialController::new(gateway, TrialRules::default());

        controller.start(&NoDeliberationProgress).await.unwrap();
        assert_eq!(controller.session().phase(), TrialPhase::Failed);

        let session = controller.restart();
        assert_eq!(session.phase(), TrialPhase::NotStarted);
        assert!(session.transcript().is_empty());

        let session = controller.start(&NoDeliberationProgress).await.unwrap();
        assert_eq!(session.phase(), TrialPhase::AwaitingParticipant);
        assert_eq!(session.round(), 1);
    }

    #[tokio::test]
    async fn test_request_at_cap_asks_for_report_and_enforces_it() {
        let rules = TrialRules::default().with_max_rounds(1);
        let gateway = MockGateway::new(vec![
            turn("dilemma", "Only dilemma.", 0),
            turn("dilemma", "Another dilemma?", 0),
        ]);
        let mut controller = TrialController::new(gateway.clone(), rules);

        controller.start(&NoDeliberationProgress).await.unwrap();
        let session = controller
            .reply("My answer.", &NoDeliberationProgress)
            .await
            .unwrap();

        assert!(gateway.requests()[1].must_conclude());
        assert_eq!(session.phase(), TrialPhase::Terminal);
        assert_eq!(session.round(), 1);
    }

    #[tokio::test]
    async fn test_events_are_logged() {
        let gateway = MockGateway::new(vec![
            turn("dilemma", "Begin.", 0),
            turn("cross_examination", "Explain.", -100),
        ]);
        let logger = Arc::new(RecordingLogger::default());
        let mut controller = TrialController::new(gateway, TrialRules::default())
            .with_conversation_logger(logger.clone());

        controller.start(&NoDeliberationProgress).await.unwrap();
        controller
            .reply("Because.", &NoDeliberationProgress)
            .await
            .unwrap();

        assert_eq!(controller.session().phase(), TrialPhase::Terminal);
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                "trial_started",
                "turn_request",
                "turn_merged",
                "participant_reply",
                "turn_request",
                "turn_merged",
                "trial_concluded"
            ]
        );
    }
}
