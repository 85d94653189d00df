//! Command-line argument parsing for the demo compositor
//!
//! Supports:
//! - Reading text from a file or stdin
//! - Repeatable highlight specs (`START:END[:COLOR]`)
//! - Default-color and font overrides on top of the persisted config

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::highlight::FontSpec;
use crate::theme::Color;

/// Composite highlight overlays onto plain text
#[derive(Parser, Debug)]
#[command(
    name = "overmark",
    version,
    about = "Composite highlight overlays onto plain text"
)]
pub struct CliArgs {
    /// File to read; stdin is used when omitted
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Highlight to apply, as START:END[:COLOR]; may be repeated
    #[arg(short = 'H', long = "highlight", value_name = "SPEC")]
    pub highlights: Vec<HighlightSpec>,

    /// Default color for highlights given without one (overrides config)
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,

    /// Font size in pixels (overrides config)
    #[arg(long, value_name = "PX")]
    pub font_size: Option<u32>,

    /// Line height in pixels (overrides config)
    #[arg(long, value_name = "PX")]
    pub line_height: Option<u32>,

    /// Font family shorthand, e.g. "'Fira Code', monospace" (overrides config)
    #[arg(long, value_name = "FAMILY")]
    pub font_family: Option<String>,
}

impl CliArgs {
    /// Apply font overrides on top of the configured font
    pub fn resolve_font(&self, mut font: FontSpec) -> FontSpec {
        if let Some(size) = self.font_size {
            font.size_px = size;
        }
        if let Some(height) = self.line_height {
            font.line_height_px = height;
        }
        if let Some(family) = &self.font_family {
            font.family = family.clone();
        }
        font
    }
}

/// A single highlight given on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSpec {
    pub start: f64,
    pub end: f64,
    pub color: Option<String>,
}

impl FromStr for HighlightSpec {
    type Err = String;

    /// Parse `START:END[:COLOR]`, validating COLOR as hex when present.
    ///
    /// Bounds are parsed as plain numbers; range validation (negative,
    /// non-finite) stays with the highlight store so the CLI surfaces the
    /// same errors an embedding host would.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');

        let start = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| format!("Missing start in highlight spec: {}", s))?;
        let start: f64 = start
            .parse()
            .map_err(|_| format!("Invalid start {:?} in highlight spec: {}", start, s))?;

        let end = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| format!("Missing end in highlight spec: {}", s))?;
        let end: f64 = end
            .parse()
            .map_err(|_| format!("Invalid end {:?} in highlight spec: {}", end, s))?;

        let color = match parts.next() {
            Some(color) => {
                Color::from_hex(color).map_err(|e| format!("Bad color in {}: {}", s, e))?;
                Some(color.to_string())
            }
            None => None,
        };

        Ok(HighlightSpec { start, end, color })
    }
}
