//! Overmark - highlight overlay compositing
//!
//! This crate keeps a colored highlight overlay in sync with a live-edited
//! plain-text surface: an externally managed set of `(start, end, color)`
//! ranges is composited into markup over the current text on every change.
//! The [`highlight`] module is the core; [`widget`] is a thin embeddable
//! shell wiring a text surface, font, compositor, and display sink together.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod highlight;
pub mod theme;
pub mod tracing;
pub mod widget;

// Re-export commonly used types
pub use config::WidgetConfig;
pub use highlight::{FontSpec, HighlightCompositor, HighlightError, HighlightRange, RemoveTarget};
pub use widget::{DisplaySink, MarkupBuffer, TextDoc};
