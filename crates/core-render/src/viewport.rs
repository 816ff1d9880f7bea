//! Viewport bookkeeping: which document rows are on screen.
//!
//! Guarantees after `reconcile(row, offset, height)` returns `first`:
//! * `first <= row <= first + height - 1`.
//!
//! Paging moves `first_line` by a whole screen and clamps it to
//! `[0, max(0, line_count - height)]`; callers reconcile against the cursor afterwards.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub first_line: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(first_line: usize, height: usize) -> Self {
        Self {
            first_line,
            height: height.max(1),
        }
    }

    /// Largest `first_line` that still fills the screen.
    pub fn max_first_line(&self, line_count: usize) -> usize {
        line_count.saturating_sub(self.height)
    }

    pub fn page_up(&mut self) {
        self.first_line = self.first_line.saturating_sub(self.height);
    }

    pub fn page_down(&mut self, line_count: usize) {
        self.first_line = self
            .first_line
            .saturating_add(self.height)
            .min(self.max_first_line(line_count));
    }
}

/// Compute the row offset that keeps `cursor_row` visible in a window of `visible_rows`.
pub fn reconcile(cursor_row: usize, row_offset: usize, visible_rows: usize) -> usize {
    let visible_rows = visible_rows.max(1);
    if cursor_row < row_offset {
        cursor_row
    } else if cursor_row >= row_offset + visible_rows {
        cursor_row + 1 - visible_rows
    } else {
        row_offset
    }
}
