//! Design style tags and their layout archetypes.

use crate::error::CardGenError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Visual/tonal preset chosen for a card.
///
/// Influences both the tone of the generated text and the template the card
/// is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DesignStyle {
    /// Clean, sparse layout.
    #[default]
    Minimalist,
    /// Contemporary look.
    Modern,
    /// Refined and graceful.
    Elegant,
    /// Business formal.
    Corporate,
    /// Playful and artistic.
    Creative,
    /// Sci-fi inspired.
    Futuristic,
    /// 1920s geometric glamour.
    #[serde(rename = "Art Deco")]
    ArtDeco,
    /// Mid-century throwback.
    Retro,
    /// Neon, high-tech, low-life.
    Cyberpunk,
    /// Aged, classic feel.
    Vintage,
    /// Raw, bold blocks.
    Brutalist,
    /// Dark and ornate.
    Gothic,
    /// Organic textures and greens.
    #[serde(rename = "Nature-inspired")]
    NatureInspired,
    /// Soft painted washes.
    Watercolor,
    /// Iridescent sheen.
    Holographic,
}

/// Card layout archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Full-bleed image with a frosted text panel on the left.
    Split,
    /// Dimmed image with a centered text block.
    Centered,
    /// Image with a bottom gradient and overlaid text.
    Overlay,
}

impl DesignStyle {
    /// Every style, in the order presented to users.
    pub const ALL: [DesignStyle; 15] = [
        Self::Minimalist,
        Self::Modern,
        Self::Elegant,
        Self::Corporate,
        Self::Creative,
        Self::Futuristic,
        Self::ArtDeco,
        Self::Retro,
        Self::Cyberpunk,
        Self::Vintage,
        Self::Brutalist,
        Self::Gothic,
        Self::NatureInspired,
        Self::Watercolor,
        Self::Holographic,
    ];

    /// Returns the display label (also what the prompts embed).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimalist => "Minimalist",
            Self::Modern => "Modern",
            Self::Elegant => "Elegant",
            Self::Corporate => "Corporate",
            Self::Creative => "Creative",
            Self::Futuristic => "Futuristic",
            Self::ArtDeco => "Art Deco",
            Self::Retro => "Retro",
            Self::Cyberpunk => "Cyberpunk",
            Self::Vintage => "Vintage",
            Self::Brutalist => "Brutalist",
            Self::Gothic => "Gothic",
            Self::NatureInspired => "Nature-inspired",
            Self::Watercolor => "Watercolor",
            Self::Holographic => "Holographic",
        }
    }

    /// Returns the layout archetype used to render this style.
    pub fn layout(&self) -> Layout {
        match self {
            Self::Modern | Self::Elegant | Self::Corporate | Self::ArtDeco | Self::Brutalist => {
                Layout::Split
            }
            Self::Vintage | Self::NatureInspired | Self::Watercolor => Layout::Centered,
            _ => Layout::Overlay,
        }
    }
}

impl std::fmt::Display for DesignStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Split => write!(f, "split"),
            Self::Centered => write!(f, "centered"),
            Self::Overlay => write!(f, "overlay"),
        }
    }
}

/// Lowercases and drops separators so "art-deco", "Art Deco" and "art_deco" match.
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for DesignStyle {
    type Err = CardGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|style| normalize(style.as_str()) == wanted)
            .ok_or_else(|| CardGenError::InvalidRequest(format!("unknown design style: {s:?}")))
    }
}
