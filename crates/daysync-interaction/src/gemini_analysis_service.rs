//! GeminiAnalysisService - Direct REST API implementation of the analysis
//! service.
//!
//! Follow-up questions and companion replies use the chat model; day analysis
//! uses the analysis model in JSON response mode.

use crate::analysis_schema::{day_analysis_response_schema, parse_day_analysis};
use crate::prompts;
use async_trait::async_trait;
use daysync_core::analysis::{AnalysisError, AnalysisService};
use daysync_core::config::{AnalysisConfig, GeminiConfig, SecretConfig};
use daysync_core::entry::{DayAnalysis, DayEntry};
use daysync_core::session::{ChatMessage, MessageRole};
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Analysis service that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiAnalysisService {
    client: Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    analysis_model: String,
    follow_up_temperature: f64,
    companion_temperature: f64,
    history_window: usize,
}

impl GeminiAnalysisService {
    /// Creates a service with the provided API key and model settings.
    pub fn new(api_key: impl Into<String>, config: &AnalysisConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            chat_model: config.chat_model.clone(),
            analysis_model: config.analysis_model.clone(),
            follow_up_temperature: config.follow_up_temperature,
            companion_temperature: config.companion_temperature,
            history_window: config.history_window,
        }
    }

    /// Builds a service from loaded secrets.
    ///
    /// `model_name` in secret.json overrides the configured chat model.
    pub fn from_secrets(
        secrets: &SecretConfig,
        config: &AnalysisConfig,
    ) -> Result<Self, AnalysisError> {
        let GeminiConfig {
            api_key,
            model_name,
        } = secrets.gemini.clone().ok_or_else(|| {
            AnalysisError::Config("Gemini configuration not found in secret.json".to_string())
        })?;

        if api_key.trim().is_empty() {
            return Err(AnalysisError::Config(
                "Gemini API key is empty; set it in secret.json or GEMINI_API_KEY".to_string(),
            ));
        }

        let service = Self::new(api_key, config);
        Ok(match model_name {
            Some(model) if !model.trim().is_empty() => service.with_chat_model(model),
            _ => service,
        })
    }

    /// Overrides the chat model after construction.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Points the service at another endpoint (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    pub fn analysis_model(&self) -> &str {
        &self.analysis_model
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<Option<String>, AnalysisError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            api_key = self.api_key
        );

        tracing::debug!("[GeminiAnalysisService] POST {}:generateContent", model);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let is_retryable = err.is_connect() || err.is_timeout();
                // The URL carries the API key.
                AnalysisError::Transport {
                    message: format!("Gemini API request failed: {}", err.without_url()),
                    is_retryable,
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            let err = map_http_error(status, body_text, retry_after);
            tracing::warn!("[GeminiAnalysisService] {}", err);
            return Err(err);
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            AnalysisError::Malformed(format!("Failed to parse Gemini response: {err}"))
        })?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl AnalysisService for GeminiAnalysisService {
    async fn request_follow_up(
        &self,
        last_user_message: &str,
        conversation_history: &[String],
    ) -> Result<String, AnalysisError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompts::follow_up_prompt(
                last_user_message,
                conversation_history,
            ))],
            system_instruction: Some(Content::system(prompts::system_instruction(
                prompts::FOLLOW_UP_ROLE,
            ))),
            generation_config: GenerationConfig {
                temperature: Some(self.follow_up_temperature),
                ..Default::default()
            },
        };

        let text = self.send_request(&self.chat_model, &request).await?;
        Ok(text.unwrap_or_else(|| prompts::FOLLOW_UP_FALLBACK.to_string()))
    }

    async fn request_day_analysis(
        &self,
        primary_entry: &str,
        follow_up_responses: &[String],
        past_entries: &[DayEntry],
    ) -> Result<DayAnalysis, AnalysisError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompts::day_analysis_prompt(
                primary_entry,
                follow_up_responses,
                past_entries,
                self.history_window,
            ))],
            system_instruction: Some(Content::system(prompts::system_instruction(
                prompts::ANALYZER_ROLE,
            ))),
            generation_config: GenerationConfig {
                temperature: None,
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(day_analysis_response_schema()),
            },
        };

        let text = self
            .send_request(&self.analysis_model, &request)
            .await?
            .ok_or(AnalysisError::EmptyResponse)?;

        let analysis = parse_day_analysis(&text)?;
        tracing::debug!(
            "[GeminiAnalysisService] Day analysed: score {}, {} advice items",
            analysis.happiness_score,
            analysis.advice.len()
        );
        Ok(analysis)
    }

    async fn request_companion_reply(
        &self,
        message: &str,
        session_history: &[ChatMessage],
    ) -> Result<String, AnalysisError> {
        let mut contents: Vec<Content> = session_history.iter().map(Content::from).collect();
        contents.push(Content::user(message.to_string()));

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::system(prompts::system_instruction(
                prompts::COMPANION_ROLE,
            ))),
            generation_config: GenerationConfig {
                temperature: Some(self.companion_temperature),
                ..Default::default()
            },
        };

        let text = self.send_request(&self.chat_model, &request).await?;
        Ok(text.unwrap_or_else(|| prompts::COMPANION_FALLBACK.to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn user(text: String) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text }],
        }
    }

    fn system(text: String) -> Self {
        Self {
            role: "system".to_string(),
            parts: vec![Part { text }],
        }
    }
}

impl From<&ChatMessage> for Content {
    fn from(message: &ChatMessage) -> Self {
        let role = match message.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        };
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: message.content.clone(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Concatenated text of the first candidate, or `None` when it is blank.
fn extract_text_response(response: GenerateContentResponse) -> Option<String> {
    let text: String = response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text.trim().to_string())
    }
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> AnalysisError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    AnalysisError::Http {
        status: status.as_u16(),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date values are ignored.
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
