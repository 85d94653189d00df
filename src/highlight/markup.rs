//! Markup payload generation for highlight markers.
//!
//! The overlay layer renders text with a transparent foreground so only the
//! highlight background shows; the real glyphs are drawn by the editable
//! surface layered above it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closing payload shared by every highlight range.
pub const CLOSE_MARK: &str = "</mark>";

/// CSS-shorthand font descriptor stamped into opening payloads.
///
/// Rendered as `{size}px/{line-height}px {family}`, e.g.
/// `16px/20px 'Arial', 'sans-serif'`. The overlay must use the exact font of
/// the editable surface so highlight backgrounds line up with the glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font size in pixels
    pub size_px: u32,
    /// Line height in pixels
    pub line_height_px: u32,
    /// Font family list, quoted as it should appear in the shorthand
    pub family: String,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size_px: 16,
            line_height_px: 20,
            family: "'Arial', 'sans-serif'".to_string(),
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px/{}px {}",
            self.size_px, self.line_height_px, self.family
        )
    }
}

/// Build the opening payload for a range with the given color.
///
/// The foreground stays transparent: only the background highlight is meant
/// to be visible through the overlay.
pub fn open_mark(color: &str, font: &FontSpec) -> String {
    format!(
        "<mark style=\"color: transparent; background-color: {}; font: {}\">",
        color, font
    )
}
