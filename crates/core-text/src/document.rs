use crate::{EditOutcome, Limits, Line, Overflow, Position, is_printable};

/// Ordered, bounded collection of lines. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    limits: Limits,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl Document {
    /// A document holding exactly one empty line.
    pub fn new(limits: Limits) -> Self {
        Self {
            lines: vec![Line::new()],
            limits,
        }
    }

    /// Split `blob` into lines on `\n`, `\r` or `\r\n`.
    ///
    /// Overlong lines are cut to `max_content_len` and lines past `max_lines` are dropped.
    /// A single trailing terminator does not produce an extra empty line, and an empty blob
    /// yields one empty line.
    pub fn from_text(blob: &[u8], limits: Limits) -> Self {
        let max_content = limits.max_content_len();
        let mut lines = Vec::new();
        let mut truncated_lines = 0usize;
        let mut rest = blob;
        let mut push = |lines: &mut Vec<Line>, raw: &[u8]| {
            let (line, cut) = Line::truncated(raw, max_content);
            if cut {
                truncated_lines += 1;
            }
            lines.push(line);
        };
        let dropped_tail = loop {
            if lines.len() == limits.max_lines() {
                break !rest.is_empty();
            }
            match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    push(&mut lines, &rest[..i]);
                    let skip = if rest[i] == b'\r' && rest.get(i + 1) == Some(&b'\n') {
                        2
                    } else {
                        1
                    };
                    rest = &rest[i + skip..];
                    if rest.is_empty() {
                        break false;
                    }
                }
                None => {
                    push(&mut lines, rest);
                    break false;
                }
            }
        };
        if truncated_lines > 0 || dropped_tail {
            tracing::debug!(
                target: "text",
                truncated_lines,
                dropped_tail,
                line_count = lines.len(),
                "load_truncated"
            );
        }
        Self { lines, limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Length of a line in bytes; 0 for an index past the end.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, Line::len)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// True while the document is a single empty line (fresh start state).
    pub fn is_pristine(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Pull `pos` inside the document bounds.
    pub fn clamp(&self, pos: &mut Position) {
        pos.clamp_to(self.lines.len(), |i| self.line_len(i));
    }

    /// Insert a printable byte at `pos` and advance the column.
    pub fn insert_char(&mut self, pos: &mut Position, ch: u8) -> EditOutcome {
        if !is_printable(ch) {
            return EditOutcome::Unchanged;
        }
        self.clamp(pos);
        let line = &mut self.lines[pos.line];
        if line.len() >= self.limits.max_content_len() {
            return EditOutcome::Dropped(Overflow::LineFull);
        }
        line.insert(pos.col, ch);
        pos.col += 1;
        EditOutcome::Applied
    }

    /// Backspace: remove the byte left of `pos`, or join the line onto the previous one when
    /// `pos` is at column 0. The join is dropped when the result would exceed the line bound.
    pub fn delete_before(&mut self, pos: &mut Position) -> EditOutcome {
        self.clamp(pos);
        if pos.col > 0 {
            self.lines[pos.line].remove(pos.col - 1);
            pos.col -= 1;
            return EditOutcome::Applied;
        }
        if pos.line == 0 {
            return EditOutcome::Unchanged;
        }
        let prev_len = self.lines[pos.line - 1].len();
        if prev_len + self.lines[pos.line].len() > self.limits.max_content_len() {
            return EditOutcome::Dropped(Overflow::JoinTooLong);
        }
        let current = self.lines.remove(pos.line);
        self.lines[pos.line - 1].append(&current);
        pos.line -= 1;
        pos.col = prev_len;
        EditOutcome::Applied
    }

    /// Forward delete: remove the byte at `pos`, or join the next line onto this one when
    /// `pos` is at the end of the line. The cursor does not move.
    pub fn delete_at(&mut self, pos: &mut Position) -> EditOutcome {
        self.clamp(pos);
        let len = self.lines[pos.line].len();
        if pos.col < len {
            self.lines[pos.line].remove(pos.col);
            return EditOutcome::Applied;
        }
        if pos.line + 1 >= self.lines.len() {
            return EditOutcome::Unchanged;
        }
        if len + self.lines[pos.line + 1].len() > self.limits.max_content_len() {
            return EditOutcome::Dropped(Overflow::JoinTooLong);
        }
        let next = self.lines.remove(pos.line + 1);
        self.lines[pos.line].append(&next);
        EditOutcome::Applied
    }

    /// Enter: move the suffix from `pos` onward into a new line directly below and put the
    /// cursor at its start. Dropped when the document is full.
    pub fn split_line(&mut self, pos: &mut Position) -> EditOutcome {
        self.clamp(pos);
        if self.lines.len() >= self.limits.max_lines() {
            return EditOutcome::Dropped(Overflow::DocumentFull);
        }
        let tail = self.lines[pos.line].split_off(pos.col);
        self.lines.insert(pos.line + 1, tail);
        pos.line += 1;
        pos.col = 0;
        EditOutcome::Applied
    }

    /// File image of the document: every line followed by `\n`.
    pub fn serialize(&self) -> Vec<u8> {
        let size = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = Vec::with_capacity(size);
        for line in &self.lines {
            out.extend_from_slice(line.as_bytes());
            out.push(b'\n');
        }
        out
    }
}
