//! Highlight compositing for text overlays.
//!
//! This module is the core of the crate: it converts a set of possibly
//! overlapping `(start, end, color)` character ranges into markup insertions
//! over a mutable text snapshot, recomputed on every edit.
//!
//! The pieces are:
//!
//! - [`RangeStore`]: the authoritative, insertion-ordered range set
//! - [`build_markers`](marker::build_markers): derives the position-ordered
//!   open/close marker sequence from the range set
//! - [`HighlightCompositor`]: owns store and marker cache, and splices marker
//!   payloads into a text snapshot back to front
//!
//! # Example
//!
//! ```
//! use overmark::highlight::{FontSpec, HighlightCompositor};
//!
//! let mut compositor = HighlightCompositor::new();
//! compositor.add_highlight(0.0, 5.0, Some("#FF0000")).unwrap();
//!
//! let markup = compositor.composite("hello world", &FontSpec::default());
//! assert!(markup.starts_with("<mark "));
//! assert!(markup.ends_with("</mark> world"));
//! ```

pub mod compositor;
pub mod marker;
pub mod markup;
pub mod range;

pub use compositor::{CompositorStats, HighlightCompositor};
pub use marker::{Marker, MarkerKind};
pub use markup::{open_mark, FontSpec, CLOSE_MARK};
pub use range::{
    HighlightError, HighlightRange, IndexedRange, RangeStore, RemoveTarget,
    DEFAULT_HIGHLIGHT_COLOR,
};
