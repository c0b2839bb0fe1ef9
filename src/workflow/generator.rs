//! Generation orchestrator.
//!
//! Runs the content call, the parse and the image call strictly in sequence
//! and publishes the outcome through a single [`WorkflowState`] slot. Readers
//! observe the slot through [`CardGenerator::subscribe`].

use crate::config::Config;
use crate::content::providers::GeminiTextProvider;
use crate::content::{CardRequest, ContentProvider, ContentProviderExt};
use crate::design::DesignStyle;
use crate::error::Result;
use crate::image::providers::ImagenProvider;
use crate::image::{GenerationRequest, ImageProvider};
use crate::workflow::state::{CardRecord, WorkflowState};
use std::sync::Arc;
use tokio::sync::watch;

/// Message published when an in-flight generation is dropped before finishing.
pub const CANCELLED_MESSAGE: &str = "generation was cancelled";

/// Why a submission was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// A required field is empty after trimming.
    #[error("{0} must not be blank")]
    BlankField(&'static str),
    /// Another generation is still in flight.
    #[error("a generation is already in progress")]
    Busy,
}

/// Builds the background-image prompt for a card.
///
/// The prompt forbids any text in the image: the card template draws its own
/// text on top of it.
pub fn image_prompt(design: DesignStyle, industry: &str) -> String {
    format!(
        "An abstract background image for a professional visiting card. Style: {design}. \
         Theme: {industry}. The image must be purely abstract and decorative. CRITICAL RULE: \
         Absolutely no text, no letters, no words, no numbers, no logos, no typography. The \
         image must be a beautiful, text-free visual pattern or texture."
    )
}

struct Inner {
    content: Arc<dyn ContentProvider>,
    image: Arc<dyn ImageProvider>,
    state: watch::Sender<WorkflowState>,
}

/// Owns the workflow state and sequences the two service calls.
///
/// Cloning is cheap; clones share the same state slot.
#[derive(Clone)]
pub struct CardGenerator {
    inner: Arc<Inner>,
}

impl CardGenerator {
    /// Creates a generator over the given providers, starting in `Idle`.
    pub fn new(content: Arc<dyn ContentProvider>, image: Arc<dyn ImageProvider>) -> Self {
        let (state, _) = watch::channel(WorkflowState::Idle);
        Self {
            inner: Arc::new(Inner {
                content,
                image,
                state,
            }),
        }
    }

    /// Creates a generator backed by Gemini (text) and Imagen (image).
    pub fn from_config(config: Config) -> Result<Self> {
        let content = GeminiTextProvider::builder()
            .config(config.clone())
            .build()?;
        let image = ImagenProvider::builder().config(config).build()?;
        Ok(Self::new(Arc::new(content), Arc::new(image)))
    }

    /// Like [`CardGenerator::from_config`], reading configuration from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_config(Config::from_env()?)
    }

    /// The content provider in use.
    pub fn content_provider(&self) -> &dyn ContentProvider {
        self.inner.content.as_ref()
    }

    /// The image provider in use.
    pub fn image_provider(&self) -> &dyn ImageProvider {
        self.inner.image.as_ref()
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> WorkflowState {
        self.inner.state.borrow().clone()
    }

    /// Returns a receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.inner.state.subscribe()
    }

    /// Validates the request and enters `Loading`.
    ///
    /// Blank fields leave the state untouched. While another generation is
    /// in flight the request is rejected as [`Rejection::Busy`]. On success the
    /// previous result or error is already gone when this returns.
    pub fn begin(&self, request: CardRequest) -> std::result::Result<Generation, Rejection> {
        if let Some(field) = request.blank_field() {
            tracing::debug!(field, "ignoring submission with blank field");
            return Err(Rejection::BlankField(field));
        }

        let mut accepted = false;
        self.inner.state.send_if_modified(|state| {
            if state.is_loading() {
                return false;
            }
            *state = WorkflowState::Loading;
            accepted = true;
            true
        });

        if !accepted {
            tracing::debug!("ignoring submission while loading");
            return Err(Rejection::Busy);
        }

        tracing::info!(design = %request.design, "generation started");
        Ok(Generation {
            generator: self.clone(),
            request,
            finished: false,
        })
    }

    /// Runs a whole generation and returns the state it ended in.
    pub async fn submit(&self, request: CardRequest) -> std::result::Result<WorkflowState, Rejection> {
        Ok(self.begin(request)?.run().await)
    }

    async fn execute(&self, request: &CardRequest) -> Result<CardRecord> {
        let content = self
            .inner
            .content
            .generate_text_content(request)
            .await?;

        let prompt = image_prompt(request.design, &request.industry);
        let image = self
            .inner
            .image
            .generate(&GenerationRequest::new(prompt))
            .await?;

        Ok(CardRecord::new(request, content, image))
    }

    fn publish(&self, state: WorkflowState) {
        tracing::info!(state = state.label(), "generation finished");
        self.inner.state.send_replace(state);
    }
}

/// An accepted submission. The workflow is `Loading` until it is run to
/// completion or dropped.
#[must_use = "the workflow stays loading until the generation is run"]
pub struct Generation {
    generator: CardGenerator,
    request: CardRequest,
    finished: bool,
}

impl Generation {
    /// The request being generated.
    pub fn request(&self) -> &CardRequest {
        &self.request
    }

    /// Performs both service calls and publishes `Success` or `Error`.
    pub async fn run(mut self) -> WorkflowState {
        let state = match self.generator.execute(&self.request).await {
            Ok(record) => WorkflowState::Success(Arc::new(record)),
            Err(e) => {
                tracing::warn!(category = ?e.category(), "generation failed: {e}");
                WorkflowState::Error(e.to_string())
            }
        };

        self.generator.publish(state.clone());
        self.finished = true;
        state
    }
}

impl Drop for Generation {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.generator.inner.state.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            tracing::warn!("generation dropped before completion");
            *state = WorkflowState::Error(CANCELLED_MESSAGE.to_string());
            true
        });
    }
}
