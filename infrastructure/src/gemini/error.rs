//! Error types for the Gemini adapter

use thiserror::Error;
use trial_application::GatewayError;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when calling the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Environment variable {env} is not set; it must hold the Gemini API key")]
    MissingApiKey { env: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response was blocked: {0}")]
    Blocked(String),

    #[error("Response contained no text")]
    EmptyResponse,

    #[error("Response text is not JSON: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },
}

impl From<GeminiError> for GatewayError {
    fn from(error: GeminiError) -> Self {
        match error {
            GeminiError::MissingApiKey { .. } => GatewayError::Configuration(error.to_string()),
            GeminiError::Api { status, body } if status == 401 || status == 403 => {
                GatewayError::Configuration(format!("credential rejected ({status}): {body}"))
            }
            GeminiError::Api { status, body } => GatewayError::Status { status, body },
            GeminiError::ClientBuild(_) | GeminiError::Http(_) => {
                GatewayError::Transport(error.to_string())
            }
            GeminiError::Blocked(_)
            | GeminiError::EmptyResponse
            | GeminiError::ParseError { .. } => GatewayError::InvalidResponse(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_configuration() {
        let error: GatewayError = GeminiError::MissingApiKey {
            env: "API_KEY".to_string(),
        }
        .into();
        assert!(matches!(error, GatewayError::Configuration(msg) if msg.contains("API_KEY")));
    }

    #[test]
    fn test_rejected_key_is_configuration() {
        let error: GatewayError = GeminiError::Api {
            status: 403,
            body: "API key not valid".to_string(),
        }
        .into();
        assert!(matches!(error, GatewayError::Configuration(_)));
    }

    #[test]
    fn test_server_error_keeps_status() {
        let error: GatewayError = GeminiError::Api {
            status: 500,
            body: "internal".to_string(),
        }
        .into();
        assert!(matches!(error, GatewayError::Status { status: 500, .. }));
    }

    #[test]
    fn test_unparseable_text_is_invalid_response() {
        let error: GatewayError = GeminiError::ParseError {
            error: "expected value".to_string(),
            raw: "Sure! Here".to_string(),
        }
        .into();
        assert!(matches!(error, GatewayError::InvalidResponse(_)));
    }
}
