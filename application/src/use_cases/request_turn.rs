//! Request Turn use case.
//!
//! The Turn Requester: turns a session snapshot plus one piece of input into
//! exactly one raw turn result from the reasoning service, or a gateway
//! failure. Validation belongs to [`Session::merge`]; the requester never
//! touches the session itself.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::reasoning_gateway::{GatewayError, ReasoningGateway};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use trial_domain::util::truncate_str;
use trial_domain::{Session, TurnRequest};

pub struct RequestTurnUseCase {
    gateway: Arc<dyn ReasoningGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for RequestTurnUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl RequestTurnUseCase {
    pub fn new(gateway: Arc<dyn ReasoningGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Build the request from `session` and send it.
    ///
    /// The answer is returned unvalidated, exactly as the service gave it.
    pub async fn execute(&self, session: &Session, input: &str) -> Result<Value, GatewayError> {
        let request = TurnRequest::from_session(session, input);

        info!(
            "Requesting turn (round {}, score {}): {}",
            request.round,
            request.score,
            truncate_str(input, 80)
        );
        debug!(
            "Turn request carries {} principles, {} contradictions",
            request.principles.len(),
            request.contradictions.len()
        );
        if request.must_conclude() {
            debug!("Round limit reached; service is instructed to deliver final_report");
        }

        self.conversation_logger
            .log(ConversationEvent::turn_request(&request));

        let raw = self.gateway.request_turn(&request).await?;
        debug!(
            "Service answered next_step={}",
            raw.get("next_step").and_then(serde_json::Value::as_str).unwrap_or("<missing>")
        );

        Ok(raw)
    }
}
