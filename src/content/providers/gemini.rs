//! Gemini (Google) structured-text provider.

use crate::config::Config;
use crate::content::provider::ContentProvider;
use crate::content::types::{CardRequest, TextContent};
use crate::error::{parse_google_error, CardGenError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gemini text model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeminiTextModel {
    /// Gemini 2.5 Flash (fast, economical).
    #[default]
    Flash,
    /// Gemini 2.5 Flash-Lite (cheapest).
    FlashLite,
    /// Gemini 2.5 Pro (highest quality).
    Pro,
}

impl GeminiTextModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flash => "gemini-2.5-flash",
            Self::FlashLite => "gemini-2.5-flash-lite",
            Self::Pro => "gemini-2.5-pro",
        }
    }
}

/// Builder for GeminiTextProvider.
#[derive(Debug, Clone, Default)]
pub struct GeminiTextProviderBuilder {
    config: Option<Config>,
    model: GeminiTextModel,
}

impl GeminiTextProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an already resolved configuration. Falls back to [`Config::from_env`].
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the Gemini model variant.
    pub fn model(mut self, model: GeminiTextModel) -> Self {
        self.model = model;
        self
    }

    /// Builds the provider, resolving the API key.
    pub fn build(self) -> Result<GeminiTextProvider> {
        let config = match self.config {
            Some(config) => config,
            None => Config::from_env()?,
        };

        Ok(GeminiTextProvider {
            client: config.http_client()?,
            config,
            model: self.model,
        })
    }
}

/// Gemini structured-text provider.
pub struct GeminiTextProvider {
    client: reqwest::Client,
    config: Config,
    model: GeminiTextModel,
}

impl GeminiTextProvider {
    /// Creates a new `GeminiTextProviderBuilder`.
    pub fn builder() -> GeminiTextProviderBuilder {
        GeminiTextProviderBuilder::new()
    }

    /// Returns the model this provider calls.
    pub fn model(&self) -> GeminiTextModel {
        self.model
    }

    async fn generate_impl(&self, request: &CardRequest) -> Result<String> {
        let start = Instant::now();

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url(),
            self.model.as_str(),
        );

        let body = GeminiTextRequest::from_card_request(request);

        tracing::debug!(model = self.model.as_str(), "requesting card content");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.config.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(parse_google_error(status.as_u16(), &text, &headers));
        }

        let gemini_response: GeminiTextResponse = response
            .json()
            .await
            .map_err(|e| self.config.map_transport_error(e))?;
        let text = gemini_response.into_text()?;

        tracing::debug!(
            model = self.model.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            len = text.len(),
            "card content received"
        );

        Ok(text)
    }
}

#[async_trait]
impl ContentProvider for GeminiTextProvider {
    async fn generate(&self, request: &CardRequest) -> Result<String> {
        self.generate_impl(request).await
    }

    fn name(&self) -> &str {
        "Gemini (Google)"
    }

    async fn health_check(&self) -> Result<()> {
        self.config
            .check_model(&self.client, self.model.as_str())
            .await
    }
}

// Request/Response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTextRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiTextPart>,
}

#[derive(Debug, Serialize)]
struct GeminiTextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

impl GeminiTextRequest {
    fn from_card_request(req: &CardRequest) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiTextPart {
                    text: req.content_prompt(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json",
                response_schema: TextContent::response_schema(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTextResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContentResponse>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    block_reason_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiTextResponse {
    /// Extracts the first candidate's text, surfacing blocks as errors.
    fn into_text(self) -> Result<String> {
        // Blocked prompts still come back as HTTP 200
        if let Some(ref feedback) = self.prompt_feedback {
            if let Some(ref reason) = feedback.block_reason {
                let msg = feedback
                    .block_reason_message
                    .clone()
                    .unwrap_or_else(|| format!("Prompt blocked: {}", reason));
                return Err(CardGenError::ContentBlocked(msg));
            }
        }

        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            CardGenError::UnexpectedResponse("No candidates in Gemini response".into())
        })?;

        if let Some(ref finish_reason) = candidate.finish_reason {
            if matches!(
                finish_reason.as_str(),
                "SAFETY" | "RECITATION" | "PROHIBITED_CONTENT" | "BLOCKLIST" | "SPII"
            ) {
                return Err(CardGenError::ContentBlocked(format!(
                    "Content blocked by Gemini safety filter: {}",
                    finish_reason
                )));
            }
        }

        let text: String = candidate
            .content
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(CardGenError::UnexpectedResponse(
                "No text in Gemini response".into(),
            ));
        }

        Ok(text)
    }
}
