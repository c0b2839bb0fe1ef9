//! Card request and generated text content.

use crate::design::DesignStyle;
use crate::error::{CardGenError, Result};
use serde::{Deserialize, Serialize};

/// What the user asked for: who the card is for and how it should look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRequest {
    /// Person's name, printed verbatim on the card.
    pub name: String,
    /// Industry or theme the card should evoke.
    pub industry: String,
    /// Visual/tonal preset.
    pub design: DesignStyle,
}

impl CardRequest {
    /// Creates a new request.
    pub fn new(name: impl Into<String>, industry: impl Into<String>, design: DesignStyle) -> Self {
        Self {
            name: name.into(),
            industry: industry.into(),
            design,
        }
    }

    /// Returns the first required field that is blank after trimming.
    pub fn blank_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name")
        } else if self.industry.trim().is_empty() {
            Some("industry")
        } else {
            None
        }
    }

    /// Builds the instruction sent to the text model.
    pub fn content_prompt(&self) -> String {
        format!(
            "You are a creative branding expert. For a person named \"{name}\" working in the \
             \"{industry}\" industry, generate the content for a unique and memorable visiting \
             card. The desired design style is \"{design}\". Provide a creative job title, a \
             short and catchy tagline (max 10 words), a fictional but realistic-sounding email \
             address, phone number, and website URL. The tone should be professional and match \
             the requested design style.",
            name = self.name,
            industry = self.industry,
            design = self.design,
        )
    }
}

/// Text fields produced by the content model. All five are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    /// Creative job title.
    pub title: String,
    /// Short tagline (max 10 words by contract, not enforced).
    pub tagline: String,
    /// Fictional email address.
    pub email: String,
    /// Fictional phone number.
    pub phone: String,
    /// Fictional website domain.
    pub website: String,
}

/// Field names, in schema order.
pub(crate) const TEXT_CONTENT_FIELDS: [(&str, &str); 5] = [
    ("title", "A creative and professional job title."),
    (
        "tagline",
        "A short, catchy tagline or professional summary (max 10 words).",
    ),
    (
        "email",
        "A fictional but professional-sounding email address.",
    ),
    (
        "phone",
        "A fictional but realistic-looking phone number in a common format (e.g., (555) 123-4567).",
    ),
    (
        "website",
        "A fictional but professional-looking domain name (e.g., innovatesolutions.io).",
    ),
];

impl TextContent {
    /// Response schema handed to the model so it answers with exactly these fields.
    pub fn response_schema() -> serde_json::Value {
        let properties: serde_json::Map<String, serde_json::Value> = TEXT_CONTENT_FIELDS
            .iter()
            .map(|(field, description)| {
                (
                    field.to_string(),
                    serde_json::json!({ "type": "STRING", "description": description }),
                )
            })
            .collect();
        let required: Vec<&str> = TEXT_CONTENT_FIELDS.iter().map(|(field, _)| *field).collect();

        serde_json::json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
        })
    }

    /// Parses a raw model reply, tolerating a markdown code fence around it.
    pub fn from_response(raw: &str) -> Result<Self> {
        let payload = strip_code_fence(raw);
        if payload.is_empty() {
            return Err(CardGenError::Parse("content response was empty".into()));
        }
        serde_json::from_str(payload)
            .map_err(|e| CardGenError::Parse(format!("content response is not a valid card: {e}")))
    }
}

/// Removes a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
///
/// Models occasionally wrap structured output in a fence even when asked for
/// raw JSON. Text without a fence is returned trimmed and otherwise untouched.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = match trimmed.strip_prefix("```") {
        // Skip the info string ("json", "JSON", ...) up to the end of the line.
        Some(rest) => match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        },
        None => trimmed,
    };
    let body = body.trim();
    body.strip_suffix("```").unwrap_or(body).trim()
}
