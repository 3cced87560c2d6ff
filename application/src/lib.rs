//! Application layer for consistency-trial
//!
//! This crate contains the Turn Requester, the controller that drives a
//! session through its state machine, and the port definitions adapters
//! implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    deliberation::{DeliberationNotifier, NoDeliberationProgress},
    reasoning_gateway::{GatewayError, ReasoningGateway},
};
pub use use_cases::request_turn::RequestTurnUseCase;
pub use use_cases::trial_controller::{TrialController, TrialError, is_recoverable};
