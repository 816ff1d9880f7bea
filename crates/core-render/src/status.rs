//! Status bar and message line composition.
//!
//! Status bar layout: `<name> - <n> lines[ (modified)]` on the left and `<row>/<n>` flush
//! right, padded with spaces to the full screen width and drawn in reverse video by the
//! engine. `<name>` is the base file name (at most 20 bytes) or `[No Name]`.
//!
//! Composition is two-stage, segments first and string second, so truncation rules live in
//! one place (`format_status`).

use std::borrow::Cow;

const NAME_MAX: usize = 20;

/// Simple DTO describing what we need to render a status line.
pub struct StatusContext<'a> {
    pub file_name: Option<&'a str>,
    pub dirty: bool,
    pub line_count: usize,
    /// 0-based cursor row.
    pub line: usize,
}

/// Discrete status line segments (order-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    FileName(Cow<'a, str>),
    LineCount(usize),
    Modified,
    /// Right-aligned 1-based cursor row over the total line count.
    Position { line_1: usize, total: usize },
}

/// Produce ordered segments representing the status line.
pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name: Cow<'a, str> = match ctx.file_name {
        Some(n) => Cow::Borrowed(truncate_str(n, NAME_MAX)),
        None => Cow::Borrowed("[No Name]"),
    };
    let mut out = Vec::with_capacity(4);
    out.push(StatusSegment::FileName(name));
    out.push(StatusSegment::LineCount(ctx.line_count));
    if ctx.dirty {
        out.push(StatusSegment::Modified);
    }
    out.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        total: ctx.line_count,
    });
    out
}

/// Render segments into exactly `width` bytes: left part, spaces, right part. The right part
/// is dropped when both do not fit; the left part is cut at `width`.
pub fn format_status(segments: &[StatusSegment<'_>], width: usize) -> String {
    use std::fmt::Write as _;
    let mut left = String::with_capacity(width);
    let mut right = String::new();
    for seg in segments {
        match seg {
            StatusSegment::FileName(name) => left.push_str(name),
            StatusSegment::LineCount(n) => {
                let _ = write!(left, " - {n} lines");
            }
            StatusSegment::Modified => left.push_str(" (modified)"),
            StatusSegment::Position { line_1, total } => {
                let _ = write!(right, "{line_1}/{total}");
            }
        }
    }
    let mut s = truncate_str(&left, width).to_string();
    let remaining = width - s.len();
    if right.len() <= remaining {
        s.extend(std::iter::repeat_n(' ', remaining - right.len()));
        s.push_str(&right);
    } else {
        s.extend(std::iter::repeat_n(' ', remaining));
    }
    s
}

/// Convenience wrapper used by the engine.
pub fn build_status(ctx: &StatusContext, width: usize) -> String {
    format_status(&compose_status(ctx), width)
}

/// Message line content: the message cut to `width`, or empty.
pub fn build_message(message: Option<&str>, width: usize) -> &str {
    message.map_or("", |m| truncate_str(m, width))
}

/// Cut `s` to at most `max` bytes on a char boundary.
fn truncate_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
