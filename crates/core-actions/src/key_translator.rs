//! KeyEvent -> Action mapping.
//!
//! The editor is modeless, so translation is a pure function of the key. Keys with no
//! binding (bare ESC, unbound control bytes, bytes above 126) map to `None` and are ignored
//! by the session.

use crate::{Action, EditKind, MotionKind};
use core_events::{BACKSPACE, CTRL_H, CTRL_Q, CTRL_S, ENTER, KeyEvent};
use core_text::is_printable;

pub fn translate(key: KeyEvent) -> Option<Action> {
    let action = match key {
        KeyEvent::Up => Action::Motion(MotionKind::Up),
        KeyEvent::Down => Action::Motion(MotionKind::Down),
        KeyEvent::Left => Action::Motion(MotionKind::Left),
        KeyEvent::Right => Action::Motion(MotionKind::Right),
        KeyEvent::Home => Action::Motion(MotionKind::LineStart),
        KeyEvent::End => Action::Motion(MotionKind::LineEnd),
        KeyEvent::PageUp => Action::Motion(MotionKind::PageUp),
        KeyEvent::PageDown => Action::Motion(MotionKind::PageDown),
        KeyEvent::Delete => Action::Edit(EditKind::DeleteAt),
        KeyEvent::Esc => return None,
        KeyEvent::Byte(b) => return translate_byte(b),
    };
    Some(action)
}

fn translate_byte(b: u8) -> Option<Action> {
    match b {
        CTRL_Q => Some(Action::Quit),
        CTRL_S => Some(Action::Save),
        ENTER => Some(Action::Edit(EditKind::SplitLine)),
        BACKSPACE | CTRL_H => Some(Action::Edit(EditKind::DeleteBefore)),
        b if is_printable(b) => Some(Action::Edit(EditKind::InsertChar(b))),
        _ => None,
    }
}
