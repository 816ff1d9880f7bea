//! Dirty-quit guard.
//!
//! With unsaved changes each quit press spends one confirmation; the press that spends the
//! last one terminates. A clean document quits on the first press. The session restores the
//! counter whenever any other key arrives.

use super::DispatchResult;
use core_state::EditorState;
use std::time::Duration;

pub(crate) fn handle_quit(state: &mut EditorState, message_ttl: Duration) -> DispatchResult {
    if !state.dirty {
        return DispatchResult::quit();
    }
    state.quit_confirmations_remaining = state.quit_confirmations_remaining.saturating_sub(1);
    let remaining = state.quit_confirmations_remaining;
    if remaining == 0 {
        tracing::info!(target: "actions.dispatch", "quit_discarding_changes");
        return DispatchResult::quit();
    }
    let plural = if remaining == 1 { "" } else { "s" };
    state.set_ephemeral(
        format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {remaining} more time{plural} to quit."
        ),
        message_ttl,
    );
    tracing::debug!(target: "actions.dispatch", remaining, "quit_confirmation_pending");
    DispatchResult::clean()
}
