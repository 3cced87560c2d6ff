//! Reasoning service port
//!
//! Defines the interface for asking the external reasoning service for the
//! court's next turn.

use async_trait::async_trait;
use serde_json::Value;
use trial_domain::{FailureKind, TurnRequest};
use thiserror::Error;

/// Errors that can occur while requesting a turn
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The credential for the service is missing or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request did not complete (connection, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered, but not with a JSON turn result
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// How a session failure caused by this error is classified
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            GatewayError::Configuration(_) => FailureKind::Configuration,
            GatewayError::Transport(_) | GatewayError::Status { .. } => FailureKind::Transport,
            GatewayError::InvalidResponse(_) => FailureKind::SchemaViolation,
        }
    }
}

/// Gateway to the reasoning service
///
/// One call, one result: no streaming, no partial output. Implementations
/// (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ReasoningGateway: Send + Sync {
    /// Send the request and return the service's structured answer as JSON.
    ///
    /// The value is not validated here; that is the reducer's job.
    async fn request_turn(&self, request: &TurnRequest) -> Result<Value, GatewayError>;
}
