//! The live editable text surface.
//!
//! Rope-backed storage for the content the host is editing. The compositor
//! never touches this directly; it receives a snapshot at render time. All
//! offsets are character offsets, clamped to the current length so host edit
//! events arriving slightly out of sync cannot panic the widget.

use std::ops::Range;

use ropey::Rope;

/// Mutable plain-text content of the editing surface
#[derive(Debug, Clone, Default)]
pub struct EditSurface {
    rope: Rope,
}

impl EditSurface {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Length in characters
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Current content as an owned snapshot for the render path
    pub fn snapshot(&self) -> String {
        self.rope.to_string()
    }

    /// Insert `text` at a character offset (clamped to the end)
    pub fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
    }

    /// Remove the characters in `range` (bounds clamped to the length)
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.rope.remove(start..end);
    }

    /// Replace the entire content
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    pub fn clear(&mut self) {
        self.rope = Rope::new();
    }
}
