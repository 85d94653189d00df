//! The highlight compositor.
//!
//! Owns the range store and the derived marker index, and produces the
//! composited overlay markup from a text snapshot. The marker index is a
//! two-state cache: any store mutation marks it stale; the next render
//! rebuilds it before compositing.

use super::marker::{self, Marker, MarkerKind};
use super::markup::FontSpec;
use super::range::{HighlightError, HighlightRange, IndexedRange, RangeStore, RemoveTarget};

/// Cheap render instrumentation, mostly useful for verifying cache behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositorStats {
    /// Total composite calls
    pub renders: u64,
    /// How many of those had to rebuild the marker index
    pub rebuilds: u64,
}

/// Compositor for colored highlight overlays.
///
/// The compositor does not own the text: the host hands it the current
/// snapshot (and the active display font) on every render, and receives the
/// markup string to assign to its display sink.
#[derive(Debug, Clone, Default)]
pub struct HighlightCompositor {
    store: RangeStore,
    markers: Vec<Marker>,
    stale: bool,
    stats: CompositorStats,
}

impl HighlightCompositor {
    pub fn new() -> Self {
        Self {
            store: RangeStore::new(),
            markers: Vec::new(),
            stale: false,
            stats: CompositorStats::default(),
        }
    }

    /// Add a highlight range. Invalidates the marker index.
    ///
    /// Fails with [`HighlightError::InvalidBound`] when either bound is NaN,
    /// infinite, or negative; the range set is unchanged on failure.
    pub fn add_highlight(
        &mut self,
        start: f64,
        end: f64,
        color: Option<&str>,
    ) -> Result<(), HighlightError> {
        self.store.add(start, end, color)?;
        self.stale = true;
        Ok(())
    }

    /// Look up the first range matching the given bounds.
    ///
    /// A `None` or non-numeric (NaN) bound accepts any value; a bound that no
    /// stored range can hold (infinite, negative, fractional) matches nothing.
    pub fn get_highlight(&self, start: Option<f64>, end: Option<f64>) -> Option<IndexedRange> {
        let start = match QueryBound::classify(start) {
            QueryBound::Any => None,
            QueryBound::At(value) => Some(value),
            QueryBound::Never => return None,
        };
        let end = match QueryBound::classify(end) {
            QueryBound::Any => None,
            QueryBound::At(value) => Some(value),
            QueryBound::Never => return None,
        };
        self.store.find(start, end)
    }

    /// Remove a highlight by bounds or store index. Invalidates the marker
    /// index.
    ///
    /// Fails with [`HighlightError::NotFound`] when the reference does not
    /// resolve to a stored range.
    pub fn remove_highlight(
        &mut self,
        target: RemoveTarget,
    ) -> Result<HighlightRange, HighlightError> {
        let removed = self.store.remove(target)?;
        self.stale = true;
        Ok(removed)
    }

    /// All ranges in store order
    pub fn ranges(&self) -> &[HighlightRange] {
        self.store.ranges()
    }

    /// Whether the next render will rebuild the marker index
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn stats(&self) -> CompositorStats {
        self.stats
    }

    /// Composite the highlight set into `text`, returning the overlay markup.
    ///
    /// Rebuilds the marker index first if a store mutation invalidated it;
    /// otherwise the cached index is reused as-is (a font change alone does
    /// not trigger a rebuild, so payloads pick up a new font only after the
    /// next store mutation).
    pub fn composite(&mut self, text: &str, font: &FontSpec) -> String {
        if self.stale {
            self.markers = marker::build_markers(self.store.ranges(), font);
            self.stale = false;
            self.stats.rebuilds += 1;
            tracing::trace!("rebuilt marker index ({} markers)", self.markers.len());
        }
        self.stats.renders += 1;

        splice_markers(&self.markers, text)
    }
}

/// A host-number lookup bound, classified
enum QueryBound {
    /// Unconstrained: match any value
    Any,
    /// Match exactly this offset
    At(usize),
    /// Constrained to a value no stored range can hold
    Never,
}

impl QueryBound {
    fn classify(value: Option<f64>) -> Self {
        match value {
            None => QueryBound::Any,
            Some(v) if v.is_nan() => QueryBound::Any,
            Some(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => QueryBound::At(v as usize),
            Some(_) => QueryBound::Never,
        }
    }
}

/// Splice marker payloads into `text`, walking back to front.
///
/// Inserting at descending positions never shifts the offsets of markers
/// still pending, so no running offset is needed. Boundary rules:
/// - a marker positioned past the end of the text is skipped silently;
/// - an open marker is inserted only if its own position < text length;
/// - a close marker is inserted only if its pair's open position < text
///   length (so a close can land unpaired-side-gated, and an open whose
///   close fell past the end goes out unmatched).
fn splice_markers(markers: &[Marker], text: &str) -> String {
    if markers.is_empty() {
        return text.to_string();
    }

    // Byte offset of every character position, plus one past the end, so
    // splice points can be resolved without rescanning.
    let byte_at: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let len = byte_at.len() - 1;

    let mut pieces: Vec<&str> = Vec::with_capacity(markers.len() * 2 + 1);
    let mut cursor = len;

    for marker in markers.iter().rev() {
        if marker.position > len {
            continue;
        }
        let insert = match marker.kind {
            MarkerKind::Open => marker.position < len,
            MarkerKind::Close => marker.open_position() < len,
        };
        if !insert {
            continue;
        }

        pieces.push(&text[byte_at[marker.position]..byte_at[cursor]]);
        pieces.push(marker.payload.as_ref());
        cursor = marker.position;
    }
    pieces.push(&text[..byte_at[cursor]]);

    let mut out = String::with_capacity(pieces.iter().map(|p| p.len()).sum());
    for piece in pieces.iter().rev() {
        out.push_str(piece);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composite(compositor: &mut HighlightCompositor, text: &str) -> String {
        compositor.composite(text, &FontSpec::default())
    }

    fn open_tag(color: &str) -> String {
        super::super::markup::open_mark(color, &FontSpec::default())
    }

    #[test]
    fn test_composite_without_ranges_returns_text_verbatim() {
        let mut compositor = HighlightCompositor::new();
        assert_eq!(composite(&mut compositor, "hello world"), "hello world");
    }

    #[test]
    fn test_composite_single_range() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 5.0, Some("#FF0000")).unwrap();

        let markup = composite(&mut compositor, "hello world");
        assert_eq!(
            markup,
            format!("{}hello</mark> world", open_tag("#FF0000"))
        );
    }

    #[test]
    fn test_composite_disjoint_ranges_wrap_independently() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 5.0, Some("#FF0000")).unwrap();
        compositor
            .add_highlight(6.0, 11.0, Some("#00FF00"))
            .unwrap();

        let markup = composite(&mut compositor, "hello world");
        assert_eq!(
            markup,
            format!(
                "{}hello</mark> {}world</mark>",
                open_tag("#FF0000"),
                open_tag("#00FF00")
            )
        );
    }

    #[test]
    fn test_composite_close_at_text_end_is_inserted() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(6.0, 11.0, Some("#00FF00")).unwrap();

        let markup = composite(&mut compositor, "hello world");
        assert!(markup.ends_with("world</mark>"));
    }

    #[test]
    fn test_open_past_text_end_suppresses_both_halves() {
        let mut compositor = HighlightCompositor::new();
        // Open at 5 is outside "abc"; close at 2 is inside but gated on the
        // open's position, so nothing is inserted.
        compositor.add_highlight(5.0, 2.0, None).unwrap();

        assert_eq!(composite(&mut compositor, "abc"), "abc");
    }

    #[test]
    fn test_close_past_text_end_leaves_open_unmatched() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 5.0, Some("#FF0000")).unwrap();

        // Text shrank to 3 chars: the open (position 0) still qualifies, the
        // close (position 5) is past the end and gets skipped, leaving the
        // open tag unmatched in the output.
        let markup = composite(&mut compositor, "abc");
        assert_eq!(markup, format!("{}abc", open_tag("#FF0000")));
    }

    #[test]
    fn test_composite_on_empty_text_skips_everything() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 5.0, None).unwrap();
        assert_eq!(composite(&mut compositor, ""), "");
    }

    #[test]
    fn test_overlapping_ranges_nest_by_store_order() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 8.0, Some("#111111")).unwrap();
        compositor.add_highlight(2.0, 5.0, Some("#222222")).unwrap();

        let markup = composite(&mut compositor, "abcdefghij");
        assert_eq!(
            markup,
            format!(
                "{}ab{}cde</mark>fgh</mark>ij",
                open_tag("#111111"),
                open_tag("#222222")
            )
        );
    }

    #[test]
    fn test_shared_start_keeps_first_added_open_first() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 4.0, Some("#111111")).unwrap();
        compositor.add_highlight(0.0, 2.0, Some("#222222")).unwrap();

        let markup = composite(&mut compositor, "abcdef");
        let first = markup.find("#111111").unwrap();
        let second = markup.find("#222222").unwrap();
        assert!(first < second, "first-added open must appear first: {}", markup);
    }

    #[test]
    fn test_multibyte_text_positions_are_character_offsets() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(2.0, 4.0, Some("#FF0000")).unwrap();

        let markup = composite(&mut compositor, "æøå æø");
        assert_eq!(markup, format!("æø{}å </mark>æø", open_tag("#FF0000")));
    }

    #[test]
    fn test_repeated_renders_reuse_marker_cache() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 5.0, None).unwrap();

        let first = composite(&mut compositor, "hello world");
        let second = composite(&mut compositor, "hello world");

        assert_eq!(first, second);
        assert_eq!(compositor.stats().renders, 2);
        assert_eq!(compositor.stats().rebuilds, 1);
        assert!(!compositor.is_stale());
    }

    #[test]
    fn test_add_invalidates_marker_cache() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 5.0, Some("#FF0000")).unwrap();
        composite(&mut compositor, "hello world");

        compositor.add_highlight(6.0, 11.0, Some("#00FF00")).unwrap();
        assert!(compositor.is_stale());

        let markup = composite(&mut compositor, "hello world");
        assert!(markup.contains("#00FF00"));
        assert_eq!(compositor.stats().rebuilds, 2);
    }

    #[test]
    fn test_remove_invalidates_marker_cache() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 5.0, Some("#FF0000")).unwrap();
        composite(&mut compositor, "hello world");

        compositor
            .remove_highlight(RemoveTarget::Bounds { start: 0, end: 5 })
            .unwrap();

        let markup = composite(&mut compositor, "hello world");
        assert_eq!(markup, "hello world");
    }

    #[test]
    fn test_failed_add_does_not_invalidate_cache() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 5.0, None).unwrap();
        composite(&mut compositor, "hello world");

        assert!(compositor.add_highlight(f64::NAN, 5.0, None).is_err());
        assert!(!compositor.is_stale());
    }

    #[test]
    fn test_get_highlight_with_nan_bound_acts_unspecified() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(4.0, 8.0, None).unwrap();

        let found = compositor.get_highlight(Some(f64::NAN), None).unwrap();
        assert_eq!(found.range.start, 4);
    }

    #[test]
    fn test_get_highlight_with_unmatchable_bound_returns_none() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(4.0, 8.0, None).unwrap();

        assert!(compositor.get_highlight(Some(f64::INFINITY), None).is_none());
        assert!(compositor.get_highlight(Some(-2.0), None).is_none());
        assert!(compositor.get_highlight(Some(4.5), None).is_none());
    }

    #[test]
    fn test_font_change_alone_does_not_rebuild() {
        let mut compositor = HighlightCompositor::new();
        compositor.add_highlight(0.0, 5.0, None).unwrap();

        let default_font = FontSpec::default();
        let first = compositor.composite("hello world", &default_font);

        let other_font = FontSpec {
            size_px: 32,
            ..FontSpec::default()
        };
        let second = compositor.composite("hello world", &other_font);

        // Cached payloads still carry the font from the rebuild.
        assert_eq!(first, second);
        assert_eq!(compositor.stats().rebuilds, 1);
    }
}
