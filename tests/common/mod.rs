//! Shared helpers for the HTTP-level tests.

#![allow(dead_code)]

use cardgen::Config;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";
pub const CONTENT_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";
pub const IMAGE_PATH: &str = "/v1beta/models/imagen-4.0-generate-001:predict";

/// Base64 of a minimal JPEG header.
pub const JPEG_BASE64: &str = "/9j/4AAQ";

pub fn config(server: &MockServer) -> Config {
    Config::builder()
        .api_key(API_KEY)
        .base_url(server.uri())
        .build()
        .unwrap()
}

pub fn config_with_timeout(server: &MockServer, timeout: Duration) -> Config {
    Config::builder()
        .api_key(API_KEY)
        .base_url(server.uri())
        .request_timeout(timeout)
        .build()
        .unwrap()
}

pub fn card_json() -> String {
    json!({
        "title": "Quantum Architect",
        "tagline": "Engineering tomorrow's realities",
        "email": "alex@quantumforge.io",
        "phone": "(555) 123-4567",
        "website": "quantumforge.io"
    })
    .to_string()
}

pub fn gemini_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

pub fn imagen_body() -> Value {
    json!({
        "predictions": [{
            "bytesBase64Encoded": JPEG_BASE64,
            "mimeType": "image/jpeg"
        }]
    })
}
