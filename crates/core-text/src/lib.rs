//! Bounded line buffer.
//!
//! A `Document` is an ordered list of `Line`s holding single-byte characters. Capacity is
//! fixed by `Limits` (maximum line count, maximum line length). Edits that would exceed
//! either bound are dropped and reported as `EditOutcome::Dropped` instead of failing, so
//! callers can log them and carry on.
//!
//! Invariants upheld by every public operation:
//! * `1 <= line_count() <= limits.max_lines()` (a document is never empty).
//! * Every line holds at most `limits.max_content_len()` bytes.
//! * A `Position` handed to an edit is clamped first and remains valid afterwards.

mod document;
mod line;
pub mod motion;

pub use document::Document;
pub use line::Line;

/// A cursor position inside a document expressed as (line index, byte column).
///
/// `col` may equal the line length (cursor after the last character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub fn origin() -> Self {
        Self { line: 0, col: 0 }
    }

    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.col = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.col > max_len {
            self.col = max_len;
        }
    }
}

/// Capacity bounds of a document.
///
/// `max_line_len` counts one reserved terminator slot, so the longest storable line holds
/// `max_line_len - 1` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    max_lines: usize,
    max_line_len: usize,
}

impl Limits {
    pub const DEFAULT_MAX_LINES: usize = 100;
    pub const DEFAULT_MAX_LINE_LEN: usize = 256;

    /// Build limits, raising degenerate values to the smallest usable bounds
    /// (one line, one content byte).
    pub fn new(max_lines: usize, max_line_len: usize) -> Self {
        Self {
            max_lines: max_lines.max(1),
            max_line_len: max_line_len.max(2),
        }
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    /// Longest line content that may be stored.
    pub fn max_content_len(&self) -> usize {
        self.max_line_len - 1
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_LINES, Self::DEFAULT_MAX_LINE_LEN)
    }
}

/// Which capacity bound rejected an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// The target line already holds `max_content_len` bytes.
    LineFull,
    /// Joining two lines would produce a line longer than `max_content_len`.
    JoinTooLong,
    /// The document already holds `max_lines` lines.
    DocumentFull,
}

/// Result of a single buffer edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Document content changed.
    Applied,
    /// Nothing to do at this position (e.g. backspace at the origin, non-printable byte).
    Unchanged,
    /// The edit would break a capacity bound and was dropped.
    Dropped(Overflow),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }
}

/// Bytes accepted by `Document::insert_char` (ASCII 32..=126).
pub fn is_printable(b: u8) -> bool {
    (32..=126).contains(&b)
}
