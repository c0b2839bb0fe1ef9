//! Card record and workflow state.

use crate::content::{CardRequest, TextContent};
use crate::design::DesignStyle;
use crate::image::GeneratedImage;
use serde::Serialize;
use std::sync::Arc;

/// A finished card: the request, the generated text and the background image.
///
/// Only built once both service calls succeeded; shared read-only behind an
/// `Arc` and replaced wholesale by the next generation.
#[derive(Debug, Clone, Serialize)]
pub struct CardRecord {
    /// Name as submitted.
    pub name: String,
    /// Style the card was generated for.
    pub design: DesignStyle,
    /// Generated text fields.
    #[serde(flatten)]
    pub content: TextContent,
    /// `data:` URI wrapping the background image.
    pub image_url: String,
    /// Decoded background image.
    #[serde(skip)]
    pub image: GeneratedImage,
}

impl CardRecord {
    /// Assembles a record from its parts.
    pub fn new(request: &CardRequest, content: TextContent, image: GeneratedImage) -> Self {
        Self {
            name: request.name.clone(),
            design: request.design,
            content,
            image_url: image.to_data_url(),
            image,
        }
    }
}

/// Where the generation workflow currently is. Exactly one variant is active.
#[derive(Debug, Clone, Default)]
pub enum WorkflowState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A generation is in flight.
    Loading,
    /// The last generation produced this card.
    Success(Arc<CardRecord>),
    /// The last generation failed with this message.
    Error(String),
}

impl WorkflowState {
    /// Returns true while a generation is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the card, if the last generation succeeded.
    pub fn record(&self) -> Option<&Arc<CardRecord>> {
        match self {
            Self::Success(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the failure message, if the last generation failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}
