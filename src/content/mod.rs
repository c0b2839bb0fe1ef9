//! Structured text generation (card title, tagline and contact details).

mod provider;
pub mod providers;
mod types;

pub use provider::{ContentProvider, ContentProviderExt};
pub use types::{strip_code_fence, CardRequest, TextContent};
