//! Gemini reasoning gateway implementation

use super::error::{GeminiError, Result};
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use trial_application::{GatewayError, ReasoningGateway};
use trial_domain::util::truncate_str;
use trial_domain::{TrialPromptTemplate, TurnRequest};

const CONNECT_TIMEOUT_SECS: u64 = 30;

const MAX_ERROR_BODY_BYTES: usize = 2048;

/// Reasoning gateway backed by the Gemini `generateContent` API
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiGateway {
    /// Build a gateway from configuration, reading the API key from the
    /// environment variable named by `api_key_env`.
    ///
    /// Fails with [`GeminiError::MissingApiKey`] before any request is made
    /// when the variable is unset or blank.
    pub fn from_config(config: &FileGeminiConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GeminiError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;

        let gateway = Self::new(
            api_key,
            &config.base_url,
            &config.model,
            config.timeout_secs.map(Duration::from_secs),
        )?;

        info!("GeminiGateway initialized (model {})", config.model);
        Ok(gateway)
    }

    /// Build a gateway with an explicit key.
    ///
    /// `timeout` bounds a whole request; `None` lets a request run until the
    /// service answers.
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        model: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GeminiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_body(request: &TurnRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content::text(
                None,
                TrialPromptTemplate::system_instruction(request.max_rounds),
            ),
            contents: vec![Content::text(
                Some("user"),
                TrialPromptTemplate::turn_prompt(request),
            )],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: TrialPromptTemplate::response_schema(),
            },
        }
    }

    async fn generate(&self, request: &TurnRequest) -> Result<Value> {
        let body = Self::build_body(request);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body: truncate_str(&text, MAX_ERROR_BODY_BYTES).to_string(),
            });
        }

        let data: GenerateContentResponse = response.json().await?;
        if let Some(reason) = data.block_reason() {
            return Err(GeminiError::Blocked(reason));
        }
        let text = data.text().ok_or(GeminiError::EmptyResponse)?;
        debug!("Gemini answered with {} bytes", text.len());

        parse_turn_json(&text)
    }
}

/// Parse the model's text as JSON, tolerating a surrounding code fence.
fn parse_turn_json(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(unfenced.trim()).map_err(|e| GeminiError::ParseError {
        error: e.to_string(),
        raw: truncate_str(trimmed, MAX_ERROR_BODY_BYTES).to_string(),
    })
}

#[async_trait]
impl ReasoningGateway for GeminiGateway {
    async fn request_turn(&self, request: &TurnRequest) -> std::result::Result<Value, GatewayError> {
        self.generate(request).await.map_err(GatewayError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> TurnRequest {
        TurnRequest {
            round: 0,
            score: 100,
            principles: vec![],
            contradictions: vec![],
            participant_input: trial_domain::START_SIGNAL.to_string(),
            max_rounds: 7,
        }
    }

    fn candidate(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    fn gateway(server: &MockServer) -> GeminiGateway {
        GeminiGateway::new("test-key", &server.uri(), "test-model", None).unwrap()
    }

    #[tokio::test]
    async fn test_request_turn_returns_parsed_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate(
                r#"{"next_step":"dilemma","content":"A lifeboat...","score_delta":0}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let value = gateway(&server).request_turn(&request()).await.unwrap();
        assert_eq!(value["next_step"], "dilemma");
        assert_eq!(value["content"], "A lifeboat...");
    }

    #[tokio::test]
    async fn test_rate_limit_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = gateway(&server).request_turn(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 429, ref body } if body == "quota exceeded"));
    }

    #[tokio::test]
    async fn test_non_json_text_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("The court is silent.")))
            .mount(&server)
            .await;

        let err = gateway(&server).request_turn(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })),
            )
            .mount(&server)
            .await;

        let err = gateway(&server).request_turn(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(msg) if msg.contains("SAFETY")));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let gateway = GeminiGateway::new("k", "http://127.0.0.1:9", "m", None).unwrap();
        let err = gateway.request_turn(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[test]
    fn test_missing_env_var_is_configuration_error() {
        let config = FileGeminiConfig {
            api_key_env: "CONSISTENCY_TRIAL_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..FileGeminiConfig::default()
        };
        let err = GeminiGateway::from_config(&config).err().unwrap();
        assert!(matches!(err, GeminiError::MissingApiKey { .. }));
    }

    #[test]
    fn test_parse_turn_json_strips_fence() {
        let value = parse_turn_json("```json\n{\"content\":\"x\"}\n```").unwrap();
        assert_eq!(value["content"], "x");
        assert!(parse_turn_json("not json").is_err());
    }

    #[test]
    fn test_body_carries_prompt_and_schema() {
        let body = serde_json::to_value(GeminiGateway::build_body(&request())).unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Current Round: 0"));
        assert!(
            body["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("MAX ROUNDS: 7.")
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"][0],
            "next_step"
        );
    }
}
