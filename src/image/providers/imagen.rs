//! Imagen (Google) image generation provider.

use crate::config::Config;
use crate::error::{parse_google_error, CardGenError, Result};
use crate::image::provider::ImageProvider;
use crate::image::types::{GeneratedImage, GenerationMetadata, GenerationRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Imagen model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImagenModel {
    /// Imagen 4 (balanced).
    #[default]
    Imagen4,
    /// Imagen 4 Fast (lower latency).
    Imagen4Fast,
    /// Imagen 4 Ultra (highest quality).
    Imagen4Ultra,
}

impl ImagenModel {
    /// Returns the API model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Imagen4 => "imagen-4.0-generate-001",
            Self::Imagen4Fast => "imagen-4.0-fast-generate-001",
            Self::Imagen4Ultra => "imagen-4.0-ultra-generate-001",
        }
    }
}

/// Builder for ImagenProvider.
#[derive(Debug, Clone, Default)]
pub struct ImagenProviderBuilder {
    config: Option<Config>,
    model: ImagenModel,
}

impl ImagenProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an already resolved configuration. Falls back to [`Config::from_env`].
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the Imagen model variant.
    pub fn model(mut self, model: ImagenModel) -> Self {
        self.model = model;
        self
    }

    /// Builds the provider, resolving the API key.
    pub fn build(self) -> Result<ImagenProvider> {
        let config = match self.config {
            Some(config) => config,
            None => Config::from_env()?,
        };

        Ok(ImagenProvider {
            client: config.http_client()?,
            config,
            model: self.model,
        })
    }
}

/// Imagen image generation provider.
pub struct ImagenProvider {
    client: reqwest::Client,
    config: Config,
    model: ImagenModel,
}

impl ImagenProvider {
    /// Creates a new `ImagenProviderBuilder`.
    pub fn builder() -> ImagenProviderBuilder {
        ImagenProviderBuilder::new()
    }

    /// Returns the model this provider calls.
    pub fn model(&self) -> ImagenModel {
        self.model
    }

    async fn generate_impl(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        let start = Instant::now();

        let url = format!(
            "{}/v1beta/models/{}:predict",
            self.config.base_url(),
            self.model.as_str(),
        );

        let body = ImagenRequest::from_generation_request(request);

        tracing::debug!(
            model = self.model.as_str(),
            aspect_ratio = request.aspect_ratio.as_str(),
            "requesting background image"
        );

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

        let imagen_response: ImagenResponse = response
            .json()
            .await
            .map_err(|e| self.config.map_transport_error(e))?;

        let (encoded, mime_type) = imagen_response.into_first_image()?;

        let duration_ms = start.elapsed().as_millis() as u64;

        GeneratedImage::from_base64(
            &encoded,
            mime_type.as_deref(),
            request.format,
            GenerationMetadata {
                model: Some(self.model.as_str().to_string()),
                duration_ms: Some(duration_ms),
            },
        )
    }
}

#[async_trait]
impl ImageProvider for ImagenProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        self.generate_impl(request).await
    }

    fn name(&self) -> &str {
        "Imagen (Google)"
    }

    async fn health_check(&self) -> Result<()> {
        self.config
            .check_model(&self.client, self.model.as_str())
            .await
    }
}

// Request/Response types
#[derive(Debug, Serialize)]
struct ImagenRequest {
    instances: Vec<ImagenInstance>,
    parameters: ImagenParameters,
}

#[derive(Debug, Serialize)]
struct ImagenInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImagenParameters {
    sample_count: u32,
    aspect_ratio: &'static str,
    output_options: ImagenOutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImagenOutputOptions {
    mime_type: &'static str,
}

impl ImagenRequest {
    fn from_generation_request(req: &GenerationRequest) -> Self {
        Self {
            instances: vec![ImagenInstance {
                prompt: req.prompt.clone(),
            }],
            parameters: ImagenParameters {
                sample_count: 1,
                aspect_ratio: req.aspect_ratio.as_str(),
                output_options: ImagenOutputOptions {
                    mime_type: req.format.mime_type(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImagenResponse {
    #[serde(default)]
    predictions: Vec<ImagenPrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagenPrediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    rai_filtered_reason: Option<String>,
}

impl ImagenResponse {
    /// Returns the first image payload and its MIME type.
    fn into_first_image(self) -> Result<(String, Option<String>)> {
        let mut filtered = None;
        for prediction in self.predictions {
            match prediction.bytes_base64_encoded {
                Some(bytes) if !bytes.is_empty() => return Ok((bytes, prediction.mime_type)),
                _ => filtered = filtered.or(prediction.rai_filtered_reason),
            }
        }

        Err(CardGenError::EmptyResult(match filtered {
            Some(reason) => format!("image was filtered: {reason}"),
            None => "response contained 0 predictions".into(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::types::{AspectRatio, ImageFormat};

    #[test]
    fn test_imagen_model_as_str() {
        assert_eq!(ImagenModel::Imagen4.as_str(), "imagen-4.0-generate-001");
        assert_eq!(ImagenModel::default(), ImagenModel::Imagen4);
    }

    #[test]
    fn test_builder_with_explicit_config() {
        let config = Config::builder().api_key("test-key").build().unwrap();
        let provider = ImagenProviderBuilder::new()
            .config(config)
            .model(ImagenModel::Imagen4Fast)
            .build()
            .unwrap();
        assert_eq!(provider.model(), ImagenModel::Imagen4Fast);
        assert_eq!(provider.name(), "Imagen (Google)");
    }

    #[test]
    fn test_request_serialization() {
        let req = GenerationRequest::new("Abstract waves");
        let json = serde_json::to_value(ImagenRequest::from_generation_request(&req)).unwrap();

        assert_eq!(json["instances"][0]["prompt"], "Abstract waves");
        assert_eq!(json["parameters"]["sampleCount"], 1);
        assert_eq!(json["parameters"]["aspectRatio"], "16:9");
        assert_eq!(json["parameters"]["outputOptions"]["mimeType"], "image/jpeg");
    }

    #[test]
    fn test_request_respects_overrides() {
        let req = GenerationRequest::new("x")
            .with_aspect_ratio(AspectRatio::Square)
            .with_format(ImageFormat::Png);
        let json = serde_json::to_value(ImagenRequest::from_generation_request(&req)).unwrap();
        assert_eq!(json["parameters"]["aspectRatio"], "1:1");
        assert_eq!(json["parameters"]["outputOptions"]["mimeType"], "image/png");
    }

    #[test]
    fn test_response_first_image() {
        let json = r#"{
            "predictions": [
                {"bytesBase64Encoded": "/9j/4AAQ", "mimeType": "image/jpeg"},
                {"bytesBase64Encoded": "iVBORw0KGgo=", "mimeType": "image/png"}
            ]
        }"#;
        let resp: ImagenResponse = serde_json::from_str(json).unwrap();
        let (bytes, mime) = resp.into_first_image().unwrap();
        assert_eq!(bytes, "/9j/4AAQ");
        assert_eq!(mime.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_response_without_predictions_is_empty_result() {
        for json in [r#"{}"#, r#"{"predictions": []}"#] {
            let resp: ImagenResponse = serde_json::from_str(json).unwrap();
            let err = resp.into_first_image().unwrap_err();
            assert!(matches!(err, CardGenError::EmptyResult(_)));
            assert!(err.to_string().contains("no images"));
        }
    }

    #[test]
    fn test_response_filtered_is_empty_result() {
        let json = r#"{"predictions": [{"raiFilteredReason": "blocked by safety settings"}]}"#;
        let resp: ImagenResponse = serde_json::from_str(json).unwrap();
        let err = resp.into_first_image().unwrap_err();
        assert!(matches!(err, CardGenError::EmptyResult(_)));
        assert!(err.to_string().contains("blocked by safety settings"));
    }
}
