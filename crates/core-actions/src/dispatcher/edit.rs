//! Text edit action handling (insert/backspace/delete/newline).
//!
//! Capacity overflow is not an error: the edit is dropped, the document and cursor stay as
//! they were, and the outcome is logged at debug.

use super::DispatchResult;
use crate::EditKind;
use core_state::EditorState;
use core_text::EditOutcome;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState) -> DispatchResult {
    let before = state.cursor;
    let outcome = match kind {
        EditKind::InsertChar(ch) => state.insert_char(ch),
        EditKind::DeleteBefore => state.delete_before(),
        EditKind::DeleteAt => state.delete_at(),
        EditKind::SplitLine => state.split_line(),
    };
    match outcome {
        EditOutcome::Applied => {
            tracing::trace!(
                target: "actions.dispatch",
                ?kind,
                line = before.line,
                col = before.col,
                to_line = state.cursor.line,
                to_col = state.cursor.col,
                "edit"
            );
            DispatchResult::dirty()
        }
        EditOutcome::Unchanged => DispatchResult::clean(),
        EditOutcome::Dropped(reason) => {
            tracing::debug!(
                target: "actions.dispatch",
                op = op_name(kind),
                ?reason,
                line = before.line,
                col = before.col,
                "edit_dropped"
            );
            DispatchResult::clean()
        }
    }
}

fn op_name(kind: EditKind) -> &'static str {
    match kind {
        EditKind::InsertChar(_) => "insert_char",
        EditKind::DeleteBefore => "delete_before",
        EditKind::DeleteAt => "delete_at",
        EditKind::SplitLine => "split_line",
    }
}
