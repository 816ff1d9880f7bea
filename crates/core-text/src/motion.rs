//! Cursor motion helpers.
//!
//! These operate purely on a `Document` + `Position` pair and never touch document content.
//! Every helper leaves `pos` inside the document bounds.

use crate::{Document, Position};

/// Move left one byte; at column 0 wrap to the end of the previous line.
pub fn left(doc: &Document, pos: &mut Position) {
    doc.clamp(pos);
    if pos.col > 0 {
        pos.col -= 1;
    } else if pos.line > 0 {
        pos.line -= 1;
        pos.col = doc.line_len(pos.line);
    }
}

/// Move right one byte; at end of line wrap to the start of the next line.
pub fn right(doc: &Document, pos: &mut Position) {
    doc.clamp(pos);
    if pos.col < doc.line_len(pos.line) {
        pos.col += 1;
    } else if pos.line + 1 < doc.line_count() {
        pos.line += 1;
        pos.col = 0;
    }
}

pub fn up(doc: &Document, pos: &mut Position) {
    if pos.line > 0 {
        pos.line -= 1;
    }
    doc.clamp(pos);
}

pub fn down(doc: &Document, pos: &mut Position) {
    if pos.line + 1 < doc.line_count() {
        pos.line += 1;
    }
    doc.clamp(pos);
}

pub fn line_start(_doc: &Document, pos: &mut Position) {
    pos.col = 0;
}

pub fn line_end(doc: &Document, pos: &mut Position) {
    doc.clamp(pos);
    pos.col = doc.line_len(pos.line);
}

/// Move `rows` lines up, stopping at the first line.
pub fn page_up(doc: &Document, pos: &mut Position, rows: usize) {
    pos.line = pos.line.saturating_sub(rows);
    doc.clamp(pos);
}

/// Move `rows` lines down, stopping at the last line.
pub fn page_down(doc: &Document, pos: &mut Position, rows: usize) {
    pos.line = pos.line.saturating_add(rows);
    doc.clamp(pos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Limits;

    fn doc(text: &str) -> Document {
        Document::from_text(text.as_bytes(), Limits::default())
    }

    #[test]
    fn left_wraps_to_previous_line_end() {
        let d = doc("abc\nde");
        let mut p = Position::new(1, 0);
        left(&d, &mut p);
        assert_eq!(p, Position::new(0, 3));
        let mut origin = Position::origin();
        left(&d, &mut origin);
        assert_eq!(origin, Position::origin());
    }

    #[test]
    fn right_wraps_to_next_line_start() {
        let d = doc("ab\ncd");
        let mut p = Position::new(0, 2);
        right(&d, &mut p);
        assert_eq!(p, Position::new(1, 0));
        let mut end = Position::new(1, 2);
        right(&d, &mut end);
        assert_eq!(end, Position::new(1, 2));
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let d = doc("long line\nab\nanother long");
        let mut p = Position::new(0, 8);
        down(&d, &mut p);
        assert_eq!(p, Position::new(1, 2));
        up(&d, &mut p);
        assert_eq!(p, Position::new(0, 2));
        up(&d, &mut p);
        assert_eq!(p, Position::new(0, 2));
    }

    #[test]
    fn line_start_and_end() {
        let d = doc("hello");
        let mut p = Position::new(0, 2);
        line_end(&d, &mut p);
        assert_eq!(p.col, 5);
        line_start(&d, &mut p);
        assert_eq!(p.col, 0);
    }

    #[test]
    fn paging_stops_at_document_edges() {
        let text: String = (0..30).map(|i| format!("{i}\n")).collect();
        let d = doc(&text);
        let mut p = Position::new(5, 1);
        page_up(&d, &mut p, 10);
        assert_eq!(p.line, 0);
        page_down(&d, &mut p, 10);
        assert_eq!(p.line, 10);
        page_down(&d, &mut p, 100);
        assert_eq!(p.line, 29);
    }
}
