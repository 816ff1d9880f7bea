//! Motion sub-dispatch (cursor movement).
//!
//! Motions change the cursor and, for paging, the row offset. They never touch the document
//! or the dirty flag.

use super::DispatchResult;
use crate::MotionKind;
use core_render::{Viewport, reconcile};
use core_state::EditorState;
use core_text::motion;

pub(crate) fn handle_motion(
    kind: MotionKind,
    state: &mut EditorState,
    text_rows: usize,
) -> DispatchResult {
    let before = state.cursor;
    match kind {
        MotionKind::Left => motion::left(&state.document, &mut state.cursor),
        MotionKind::Right => motion::right(&state.document, &mut state.cursor),
        MotionKind::Up => motion::up(&state.document, &mut state.cursor),
        MotionKind::Down => motion::down(&state.document, &mut state.cursor),
        MotionKind::LineStart => motion::line_start(&state.document, &mut state.cursor),
        MotionKind::LineEnd => motion::line_end(&state.document, &mut state.cursor),
        MotionKind::PageUp | MotionKind::PageDown => page(kind, state, text_rows),
    }
    tracing::trace!(
        target: "actions.dispatch",
        ?kind,
        from_line = before.line,
        from_col = before.col,
        to_line = state.cursor.line,
        to_col = state.cursor.col,
        "motion"
    );
    DispatchResult::clean()
}

/// Move cursor and viewport by a whole screen, then bring the cursor back into view.
fn page(kind: MotionKind, state: &mut EditorState, text_rows: usize) {
    let mut vp = Viewport::new(state.row_offset, text_rows);
    let rows = vp.height;
    if kind == MotionKind::PageUp {
        motion::page_up(&state.document, &mut state.cursor, rows);
        vp.page_up();
    } else {
        motion::page_down(&state.document, &mut state.cursor, rows);
        vp.page_down(state.document.line_count());
    }
    state.row_offset = reconcile(state.cursor.line, vp.first_line, rows);
}
