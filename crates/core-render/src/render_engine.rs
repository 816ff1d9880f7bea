//! RenderEngine: composes one full frame from `EditorState` and flushes it in a single write.
//!
//! Frame order:
//! 1. hide cursor, cursor home
//! 2. one row per text line of the screen: document line (tabs expanded, non-printable bytes
//!    shown as `?`), welcome banner, or `~`; every row padded with spaces to the screen width
//!    so stale content from the previous frame is overwritten
//! 3. status bar in reverse video
//! 4. message line (erased, then the message if it has not expired)
//! 5. cursor placed at the cursor's screen cell, cursor shown
//!
//! The engine trusts `state.row_offset`; keeping the cursor inside the viewport is the
//! session's job (see `viewport::reconcile`).

use crate::status::{StatusContext, build_message, build_status};
use crate::writer::Writer;
use anyhow::Result;
use core_state::EditorState;
use core_terminal::ScreenSize;
use std::io::Write;
use std::time::Instant;

pub const DEFAULT_TAB_STOP: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub tab_stop: usize,
    /// Banner drawn a third of the way down an untouched empty document.
    pub welcome: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            welcome: format!("minied editor -- version {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderMetrics {
    pub frames: u64,
    pub last_frame_bytes: usize,
}

/// Public facade used by the session to produce a frame from state and flush it.
#[derive(Debug, Default)]
pub struct RenderEngine {
    options: RenderOptions,
    metrics: RenderMetrics,
}

impl RenderEngine {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options: RenderOptions {
                tab_stop: options.tab_stop.max(1),
                ..options
            },
            metrics: RenderMetrics::default(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn metrics(&self) -> RenderMetrics {
        self.metrics
    }

    /// Build the complete frame for `state` on a screen of `size`. `now` decides whether the
    /// ephemeral message is still shown.
    pub fn build_frame(
        &self,
        state: &EditorState,
        size: ScreenSize,
        now: Instant,
    ) -> Result<Writer> {
        let cols = size.cols();
        let text_rows = size.text_rows();
        let tab_stop = self.options.tab_stop;
        let doc = &state.document;

        let mut w = Writer::with_capacity((cols + 2) * (text_rows + 2) + 32);
        w.hide_cursor()?;
        w.home()?;

        let mut row = Vec::with_capacity(cols);
        for y in 0..text_rows {
            row.clear();
            let file_row = state.row_offset + y;
            if let Some(line) = doc.line(file_row) {
                expand_line(line.as_bytes(), tab_stop, cols, &mut row);
            } else if doc.is_pristine() && y == text_rows / 3 {
                self.welcome_row(cols, &mut row);
            } else {
                row.push(b'~');
            }
            row.resize(cols, b' ');
            w.print(&row);
            w.newline();
        }

        let name = state.display_name();
        let status = build_status(
            &StatusContext {
                file_name: name.as_deref(),
                dirty: state.dirty,
                line_count: doc.line_count(),
                line: state.cursor.line,
            },
            cols,
        );
        w.reverse_video()?;
        w.print(status.as_bytes());
        w.reset_style()?;
        w.newline();

        w.clear_line()?;
        w.print(build_message(state.ephemeral_text(now), cols).as_bytes());

        let cursor_line = doc
            .line(state.cursor.line)
            .map(|l| l.as_bytes())
            .unwrap_or_default();
        let rx = render_col(cursor_line, state.cursor.col, tab_stop).min(cols - 1);
        let ry = state
            .cursor
            .line
            .saturating_sub(state.row_offset)
            .min(text_rows - 1);
        w.move_to(to_u16(rx), to_u16(ry))?;
        w.show_cursor()?;
        Ok(w)
    }

    /// Build and flush one frame to `out`.
    pub fn render<W: Write + ?Sized>(
        &mut self,
        state: &EditorState,
        size: ScreenSize,
        now: Instant,
        out: &mut W,
    ) -> Result<()> {
        let frame = self.build_frame(state, size, now)?;
        let bytes = frame.len();
        frame.flush_to(out)?;
        self.metrics.frames += 1;
        self.metrics.last_frame_bytes = bytes;
        tracing::trace!(target: "render", bytes, row_offset = state.row_offset, "frame_flushed");
        Ok(())
    }

    fn welcome_row(&self, cols: usize, out: &mut Vec<u8>) {
        let banner = self.options.welcome.as_bytes();
        let banner = &banner[..banner.len().min(cols)];
        let mut padding = (cols - banner.len()) / 2;
        if padding > 0 {
            out.push(b'~');
            padding -= 1;
        }
        out.extend(std::iter::repeat_n(b' ', padding));
        out.extend_from_slice(banner);
    }
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// Append the on-screen form of `line` to `out`, cut at `width` cells.
pub fn expand_line(line: &[u8], tab_stop: usize, width: usize, out: &mut Vec<u8>) {
    let start = out.len();
    for &b in line {
        if out.len() - start >= width {
            break;
        }
        match b {
            b'\t' => {
                out.push(b' ');
                while (out.len() - start) % tab_stop != 0 {
                    out.push(b' ');
                }
            }
            b if core_text::is_printable(b) => out.push(b),
            _ => out.push(b'?'),
        }
    }
    out.truncate(start + width.min(out.len() - start));
}

/// Screen column of byte column `col` in `line` after tab expansion.
pub fn render_col(line: &[u8], col: usize, tab_stop: usize) -> usize {
    line.iter().take(col).fold(0, |rx, &b| {
        if b == b'\t' {
            rx + tab_stop - (rx % tab_stop)
        } else {
            rx + 1
        }
    })
}
