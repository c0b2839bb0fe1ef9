#![warn(missing_docs)]
//! cardgen - AI visiting cards from a name, an industry and a design style.
//!
//! A card takes two calls to Google's Generative Language API: Gemini writes
//! the text (job title, tagline, contact details) as structured JSON, then
//! Imagen paints a text-free 16:9 background. [`CardGenerator`] sequences the
//! two calls and exposes the outcome as a single [`WorkflowState`].
//!
//! # Quick Start
//!
//! ```no_run
//! use cardgen::{CardGenerator, CardRequest, DesignStyle};
//!
//! #[tokio::main]
//! async fn main() -> cardgen::Result<()> {
//!     let generator = CardGenerator::from_env()?;
//!     let request = CardRequest::new("Alex Doe", "Quantum Computing", DesignStyle::Futuristic);
//!     match generator.submit(request).await {
//!         Ok(state) => println!("{}", cardgen::render::text::render_state(&state)),
//!         Err(rejected) => eprintln!("not submitted: {rejected}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! - `API_KEY` (or `GOOGLE_API_KEY`): required, read once by [`Config`]
//! - `CARDGEN_BASE_URL`: API endpoint override
//! - `CARDGEN_TIMEOUT_SECS`: per-request timeout; unset means none
//!
//! # Features
//!
//! - `cli` (default): the `cardgen` binary

pub mod config;
pub mod content;
pub mod design;
mod error;
pub mod image;
pub mod render;
pub mod workflow;

// Re-export error types at crate root
pub use error::{CardGenError, ErrorCategory, Result};

pub use config::{Config, ConfigBuilder};
pub use content::providers::{GeminiTextModel, GeminiTextProvider, GeminiTextProviderBuilder};
pub use content::{CardRequest, ContentProvider, ContentProviderExt, TextContent};
pub use design::{DesignStyle, Layout};
pub use image::providers::{ImagenModel, ImagenProvider, ImagenProviderBuilder};
pub use image::{AspectRatio, GeneratedImage, GenerationRequest, ImageFormat, ImageProvider};
pub use workflow::{CardGenerator, CardRecord, Generation, Rejection, WorkflowState};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::content::{CardRequest, ContentProvider, ContentProviderExt, TextContent};
    pub use crate::design::DesignStyle;
    pub use crate::error::{CardGenError, Result};
    pub use crate::image::{GeneratedImage, GenerationRequest, ImageProvider};
    pub use crate::workflow::{CardGenerator, CardRecord, WorkflowState};
}
