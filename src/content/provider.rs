//! Content provider trait.

use crate::content::types::{CardRequest, TextContent};
use crate::error::Result;
use async_trait::async_trait;

/// Trait for structured-text generation services.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Asks the model for the card's text fields and returns its raw reply.
    ///
    /// The reply is expected to be a JSON object matching
    /// [`TextContent::response_schema`], possibly wrapped in a code fence.
    async fn generate(&self, request: &CardRequest) -> Result<String>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;

    /// Checks if the provider is reachable and authenticated.
    async fn health_check(&self) -> Result<()>;
}

/// Extension trait that turns a raw reply into [`TextContent`].
#[async_trait]
pub trait ContentProviderExt: ContentProvider {
    /// Generates and parses the card text in one step.
    ///
    /// A reply that cannot be parsed is a [`crate::CardGenError::Parse`].
    async fn generate_text_content(&self, request: &CardRequest) -> Result<TextContent> {
        let raw = self.generate(request).await?;
        TextContent::from_response(&raw)
    }
}

impl<T: ContentProvider + ?Sized> ContentProviderExt for T {}
