//! Dispatcher applying `Action` to mutable editor state.
//!
//! Sub-modules:
//! * `motion` - cursor movement and paging
//! * `edit`   - text mutation (insert/backspace/delete/newline)
//! * `quit`   - dirty-quit confirmation guard
//!
//! Saving needs storage and possibly a filename prompt, so `Action::Save` is only flagged in the
//! result and carried out by the session.

use crate::Action;
use core_state::EditorState;
use std::time::Duration;

mod edit;
mod motion;
mod quit;

/// Inputs the dispatcher needs beyond the state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchContext {
    /// Text rows on screen; the page size for PageUp/PageDown.
    pub text_rows: usize,
    /// Lifetime of messages posted while dispatching.
    pub message_ttl: Duration,
}

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The document content changed.
    pub dirty: bool,
    pub quit: bool,
    pub save_requested: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            save_requested: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            save_requested: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: false,
            quit: true,
            save_requested: false,
        }
    }
    pub fn save() -> Self {
        Self {
            dirty: false,
            quit: false,
            save_requested: true,
        }
    }
}

/// Apply an action to editor state. The cursor is pulled back inside the document afterwards
/// whatever the action did.
pub fn dispatch(action: Action, state: &mut EditorState, ctx: &DispatchContext) -> DispatchResult {
    let result = match action {
        Action::Motion(kind) => motion::handle_motion(kind, state, ctx.text_rows),
        Action::Edit(kind) => edit::handle_edit(kind, state),
        Action::Quit => quit::handle_quit(state, ctx.message_ttl),
        Action::Save => DispatchResult::save(),
    };
    state.clamp_cursor();
    result
}
