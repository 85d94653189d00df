//! The highlighted-document shell.
//!
//! [`TextDoc`] is the embeddable widget: an editable surface layered over a
//! display-only overlay. It owns the surface, the active font, the highlight
//! compositor, and the display sink, and forwards a fixed set of operations
//! between them. Composition is synchronous: text mutations re-composite
//! before returning, so the sink is never observed stale after an edit.
//!
//! Highlight mutations deliberately do NOT re-render on their own; the
//! content-changed notification ([`TextDoc::refresh`]) is the sole render
//! trigger, which lets callers batch a series of adds for one composition.

use std::ops::Range;

use crate::highlight::{
    FontSpec, HighlightCompositor, HighlightError, HighlightRange, IndexedRange, RemoveTarget,
};

use super::surface::EditSurface;

/// Receiver for composited overlay markup.
///
/// The shell assigns the full markup string on every composition, verbatim
/// and unescaped; the sink decides how to display it.
pub trait DisplaySink {
    fn set_markup(&mut self, markup: &str);
}

/// In-memory [`DisplaySink`] holding the latest markup
#[derive(Debug, Clone, Default)]
pub struct MarkupBuffer {
    markup: String,
}

impl MarkupBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently composited markup
    pub fn markup(&self) -> &str {
        &self.markup
    }
}

impl DisplaySink for MarkupBuffer {
    fn set_markup(&mut self, markup: &str) {
        self.markup.clear();
        self.markup.push_str(markup);
    }
}

/// A plain-text editing surface with a colored highlight overlay
#[derive(Debug, Clone, Default)]
pub struct TextDoc<S: DisplaySink> {
    surface: EditSurface,
    font: FontSpec,
    compositor: HighlightCompositor,
    sink: S,
}

impl<S: DisplaySink> TextDoc<S> {
    pub fn new(sink: S) -> Self {
        Self {
            surface: EditSurface::new(),
            font: FontSpec::default(),
            compositor: HighlightCompositor::new(),
            sink,
        }
    }

    /// Create a document with initial content, compositing it once
    pub fn with_text(sink: S, text: &str) -> Self {
        let mut doc = Self::new(sink);
        doc.set_text(text);
        doc
    }

    // ------------------------------------------------------------------
    // Text operations (content changes re-composite synchronously)
    // ------------------------------------------------------------------

    /// Current content of the editable surface
    pub fn text(&self) -> String {
        self.surface.snapshot()
    }

    pub fn len_chars(&self) -> usize {
        self.surface.len_chars()
    }

    /// Replace the entire content
    pub fn set_text(&mut self, text: &str) {
        self.surface.set_text(text);
        self.refresh();
    }

    /// Insert `text` at a character offset
    pub fn insert(&mut self, offset: usize, text: &str) {
        self.surface.insert(offset, text);
        self.refresh();
    }

    /// Remove the characters in `range`
    pub fn remove(&mut self, range: Range<usize>) {
        self.surface.remove(range);
        self.refresh();
    }

    // ------------------------------------------------------------------
    // Font
    // ------------------------------------------------------------------

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Change the display font.
    ///
    /// Marker payloads pick up the new font at the next marker rebuild, which
    /// happens on the first render after a highlight mutation.
    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    // ------------------------------------------------------------------
    // Highlight operations (no automatic re-render; see refresh)
    // ------------------------------------------------------------------

    /// Add a highlight range
    pub fn add_highlight(
        &mut self,
        start: f64,
        end: f64,
        color: Option<&str>,
    ) -> Result<(), HighlightError> {
        self.compositor.add_highlight(start, end, color)
    }

    /// Look up the first highlight matching the given bounds
    pub fn get_highlight(&self, start: Option<f64>, end: Option<f64>) -> Option<IndexedRange> {
        self.compositor.get_highlight(start, end)
    }

    /// Remove a highlight by bounds or store index
    pub fn remove_highlight(
        &mut self,
        target: RemoveTarget,
    ) -> Result<HighlightRange, HighlightError> {
        self.compositor.remove_highlight(target)
    }

    // ------------------------------------------------------------------
    // Composition
    // ------------------------------------------------------------------

    /// The content-changed notification: composite the current highlight set
    /// over the current text and hand the markup to the display sink.
    pub fn refresh(&mut self) {
        let snapshot = self.surface.snapshot();
        let markup = self.compositor.composite(&snapshot, &self.font);
        tracing::trace!(
            "composited {} chars into {} bytes of markup",
            snapshot.chars().count(),
            markup.len()
        );
        self.sink.set_markup(&markup);
    }

    pub fn compositor(&self) -> &HighlightCompositor {
        &self.compositor
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the document, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::open_mark;

    fn doc(text: &str) -> TextDoc<MarkupBuffer> {
        TextDoc::with_text(MarkupBuffer::new(), text)
    }

    #[test]
    fn test_with_text_composites_initial_content() {
        let doc = doc("hello");
        assert_eq!(doc.sink().markup(), "hello");
    }

    #[test]
    fn test_highlight_mutation_does_not_render_until_refresh() {
        let mut doc = doc("hello world");
        doc.add_highlight(0.0, 5.0, Some("#FF0000")).unwrap();

        assert_eq!(doc.sink().markup(), "hello world");

        doc.refresh();
        assert!(doc.sink().markup().contains("#FF0000"));
    }

    #[test]
    fn test_edit_recomposites_synchronously() {
        let mut doc = doc("hello world");
        doc.add_highlight(0.0, 5.0, Some("#FF0000")).unwrap();
        doc.refresh();

        doc.insert(11, "!");
        assert_eq!(doc.text(), "hello world!");
        assert_eq!(
            doc.sink().markup(),
            format!(
                "{}hello</mark> world!",
                open_mark("#FF0000", &FontSpec::default())
            )
        );
    }

    #[test]
    fn test_shrinking_text_suppresses_out_of_range_highlights() {
        let mut doc = doc("hello world");
        doc.add_highlight(6.0, 11.0, Some("#00FF00")).unwrap();
        doc.refresh();
        assert!(doc.sink().markup().contains("#00FF00"));

        // Shrink below the open position; the pair disappears entirely.
        doc.remove(3..11);
        assert_eq!(doc.sink().markup(), "hel");
    }

    #[test]
    fn test_remove_highlight_then_refresh_clears_overlay() {
        let mut doc = doc("hello");
        doc.add_highlight(0.0, 5.0, None).unwrap();
        doc.refresh();
        assert!(doc.sink().markup().contains("<mark"));

        doc.remove_highlight(RemoveTarget::Index(0)).unwrap();
        doc.refresh();
        assert_eq!(doc.sink().markup(), "hello");
    }

    #[test]
    fn test_delegated_lookup_and_error_surface() {
        let mut doc = doc("hello");
        doc.add_highlight(1.0, 4.0, None).unwrap();

        assert!(doc.get_highlight(Some(1.0), Some(4.0)).is_some());
        assert!(doc.get_highlight(Some(2.0), None).is_none());
        assert!(matches!(
            doc.remove_highlight(RemoveTarget::Bounds { start: 9, end: 9 }),
            Err(HighlightError::NotFound)
        ));
        assert!(matches!(
            doc.add_highlight(f64::NAN, 1.0, None),
            Err(HighlightError::InvalidBound { .. })
        ));
    }

    #[test]
    fn test_set_font_applies_on_next_rebuild() {
        let mut doc = doc("hello");
        doc.add_highlight(0.0, 5.0, None).unwrap();
        doc.refresh();
        assert!(doc.sink().markup().contains("16px/20px"));

        doc.set_font(FontSpec {
            size_px: 32,
            line_height_px: 40,
            family: "'Arial', 'sans-serif'".to_string(),
        });
        doc.refresh();
        // Cache still fresh: old payloads.
        assert!(doc.sink().markup().contains("16px/20px"));

        doc.add_highlight(0.0, 1.0, None).unwrap();
        doc.refresh();
        assert!(doc.sink().markup().contains("32px/40px"));
    }
}
