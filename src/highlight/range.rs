//! Highlight range storage.
//!
//! Holds the authoritative, insertion-ordered set of highlight ranges and
//! supports lookup and removal by bounds or by store position. Ranges are
//! never deduplicated, merged, or checked for overlap; insertion order is the
//! identity used by index-based operations.

/// Color applied when a range is added without one.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#FFFF00";

/// Errors from highlight store operations
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightError {
    /// A bound passed to add was NaN, infinite, or negative
    InvalidBound { value: f64 },
    /// No stored range matched the given reference
    NotFound,
}

impl std::fmt::Display for HighlightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HighlightError::InvalidBound { value } => {
                write!(f, "Invalid bound {}: must be a non-negative number", value)
            }
            HighlightError::NotFound => write!(f, "No matching highlight"),
        }
    }
}

impl std::error::Error for HighlightError {}

/// A highlighted span of the text buffer, in character offsets.
///
/// `start > end` is legal and simply produces a degenerate range; bounds are
/// allowed to exceed the current text length (the compositor skips them until
/// the text grows back).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
    pub color: String,
}

/// A found range together with its store position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRange {
    pub range: HighlightRange,
    pub index: usize,
}

/// Reference used to remove a range: by bounds (resolved via find) or by
/// store position directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveTarget {
    Bounds { start: usize, end: usize },
    Index(usize),
}

impl From<&HighlightRange> for RemoveTarget {
    fn from(range: &HighlightRange) -> Self {
        RemoveTarget::Bounds {
            start: range.start,
            end: range.end,
        }
    }
}

/// Insertion-ordered collection of highlight ranges
#[derive(Debug, Clone, Default)]
pub struct RangeStore {
    ranges: Vec<HighlightRange>,
}

impl RangeStore {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Number of stored ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// All ranges in store order
    pub fn ranges(&self) -> &[HighlightRange] {
        &self.ranges
    }

    /// Append a range.
    ///
    /// Bounds arrive as host numbers and must be finite and non-negative;
    /// fractions truncate. Fails with [`HighlightError::InvalidBound`] without
    /// touching the store otherwise.
    pub fn add(&mut self, start: f64, end: f64, color: Option<&str>) -> Result<(), HighlightError> {
        let start = offset(start)?;
        let end = offset(end)?;
        let color = color.unwrap_or(DEFAULT_HIGHLIGHT_COLOR).to_string();

        tracing::trace!("add highlight {}..{} {}", start, end, color);
        self.ranges.push(HighlightRange { start, end, color });
        Ok(())
    }

    /// First stored range matching the given bounds, with its position.
    ///
    /// A `None` bound accepts any value, so callers can search by start only,
    /// end only, both, or neither (which matches the first range, if any).
    pub fn find(&self, start: Option<usize>, end: Option<usize>) -> Option<IndexedRange> {
        self.ranges
            .iter()
            .enumerate()
            .find(|(_, range)| {
                start.map_or(true, |s| range.start == s) && end.map_or(true, |e| range.end == e)
            })
            .map(|(index, range)| IndexedRange {
                range: range.clone(),
                index,
            })
    }

    /// Remove a range, returning it.
    ///
    /// Bounds targets are resolved via [`find`](Self::find) first; an
    /// unresolved target or out-of-range index fails with
    /// [`HighlightError::NotFound`].
    pub fn remove(&mut self, target: RemoveTarget) -> Result<HighlightRange, HighlightError> {
        let index = match target {
            RemoveTarget::Bounds { start, end } => {
                self.find(Some(start), Some(end))
                    .ok_or(HighlightError::NotFound)?
                    .index
            }
            RemoveTarget::Index(index) => {
                if index >= self.ranges.len() {
                    return Err(HighlightError::NotFound);
                }
                index
            }
        };

        let removed = self.ranges.remove(index);
        tracing::trace!("removed highlight {}..{}", removed.start, removed.end);
        Ok(removed)
    }
}

/// Validate a host-number bound and convert it to a character offset
fn offset(value: f64) -> Result<usize, HighlightError> {
    if !value.is_finite() || value < 0.0 {
        return Err(HighlightError::InvalidBound { value });
    }
    Ok(value as usize)
}
