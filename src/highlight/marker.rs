//! Marker-order builder.
//!
//! Turns the current range set into a single position-ordered sequence of
//! open/close markers. The sequence is a cache owned by the compositor: it is
//! rebuilt lazily on render after any store mutation, never eagerly, so
//! back-to-back adds cost one re-sort instead of many.

use std::borrow::Cow;

use super::markup::{self, FontSpec};
use super::range::HighlightRange;

/// Which half of a range a marker represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Open,
    Close,
}

/// One half of a range's rendering instruction.
///
/// `pair_position` is the counterpart marker's position, so the compositing
/// walk can gate a close marker on where its open sits.
#[derive(Debug, Clone)]
pub struct Marker {
    /// Character offset at which the payload is spliced in
    pub position: usize,
    /// Position of this marker's counterpart (close for opens, open for closes)
    pub pair_position: usize,
    pub kind: MarkerKind,
    /// Markup spliced into the text at `position`
    pub payload: Cow<'static, str>,
}

impl Marker {
    /// Position of the pair's open marker, regardless of which half this is
    pub fn open_position(&self) -> usize {
        match self.kind {
            MarkerKind::Open => self.position,
            MarkerKind::Close => self.pair_position,
        }
    }
}

/// Build the ordered marker index for `ranges`.
///
/// Emits open before close per range, ranges in store order, then stable-sorts
/// by position: markers at equal positions keep emission order, which is what
/// makes rendered ties deterministic (first-added open first).
pub fn build_markers(ranges: &[HighlightRange], font: &FontSpec) -> Vec<Marker> {
    let mut markers = Vec::with_capacity(ranges.len() * 2);

    for range in ranges {
        markers.push(Marker {
            position: range.start,
            pair_position: range.end,
            kind: MarkerKind::Open,
            payload: Cow::Owned(markup::open_mark(&range.color, font)),
        });
        markers.push(Marker {
            position: range.end,
            pair_position: range.start,
            kind: MarkerKind::Close,
            payload: Cow::Borrowed(markup::CLOSE_MARK),
        });
    }

    // sort_by_key is stable; ties keep emission order
    markers.sort_by_key(|marker| marker.position);
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: usize, end: usize, color: &str) -> HighlightRange {
        HighlightRange {
            start,
            end,
            color: color.to_string(),
        }
    }

    #[test]
    fn test_two_markers_per_range_linked_both_ways() {
        let font = FontSpec::default();
        let markers = build_markers(&[range(2, 7, "#FF0000")], &font);

        assert_eq!(markers.len(), 2);
        let open = &markers[0];
        let close = &markers[1];
        assert_eq!(open.kind, MarkerKind::Open);
        assert_eq!(open.position, 2);
        assert_eq!(open.pair_position, 7);
        assert_eq!(close.kind, MarkerKind::Close);
        assert_eq!(close.position, 7);
        assert_eq!(close.pair_position, 2);
        assert_eq!(open.open_position(), 2);
        assert_eq!(close.open_position(), 2);
    }

    #[test]
    fn test_markers_sorted_by_position() {
        let font = FontSpec::default();
        let markers = build_markers(&[range(6, 11, "#00FF00"), range(0, 5, "#FF0000")], &font);

        let positions: Vec<usize> = markers.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![0, 5, 6, 11]);
    }

    #[test]
    fn test_equal_positions_keep_emission_order() {
        let font = FontSpec::default();
        // Both ranges open at 3; first-added must sort first.
        let markers = build_markers(&[range(3, 8, "#111111"), range(3, 5, "#222222")], &font);

        assert_eq!(markers[0].kind, MarkerKind::Open);
        assert!(markers[0].payload.contains("#111111"));
        assert_eq!(markers[1].kind, MarkerKind::Open);
        assert!(markers[1].payload.contains("#222222"));
    }

    #[test]
    fn test_close_at_same_position_as_later_open_sorts_first() {
        let font = FontSpec::default();
        // Range A closes exactly where range B opens: emission order has A's
        // close before B's open, and the stable sort must keep it that way.
        let markers = build_markers(&[range(0, 5, "#111111"), range(5, 9, "#222222")], &font);

        assert_eq!(markers[1].position, 5);
        assert_eq!(markers[1].kind, MarkerKind::Close);
        assert_eq!(markers[2].position, 5);
        assert_eq!(markers[2].kind, MarkerKind::Open);
    }

    #[test]
    fn test_reversed_range_markers_sort_close_before_open() {
        let font = FontSpec::default();
        let markers = build_markers(&[range(9, 3, "#FFFF00")], &font);

        assert_eq!(markers[0].kind, MarkerKind::Close);
        assert_eq!(markers[0].position, 3);
        assert_eq!(markers[1].kind, MarkerKind::Open);
        assert_eq!(markers[1].position, 9);
    }

    #[test]
    fn test_open_payload_parameterized_close_fixed() {
        let font = FontSpec::default();
        let markers = build_markers(&[range(0, 4, "#ABCDEF")], &font);

        assert!(markers[0].payload.contains("background-color: #ABCDEF"));
        assert!(markers[0].payload.contains(&font.to_string()));
        assert_eq!(markers[1].payload.as_ref(), markup::CLOSE_MARK);
    }
}
