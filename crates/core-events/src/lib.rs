//! Key events produced by the input decoder and the byte values of the key wire protocol.
//!
//! Raw mode delivers Ctrl-modified letters as their low control byte (Ctrl-Q = 17), Enter as a
//! carriage return and Backspace as DEL (127) or BS (8). Multi-byte CSI sequences are resolved
//! by `core-input` into the dedicated variants below; every other byte is passed through as
//! `KeyEvent::Byte`.

use std::fmt;

/// One decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// A single literal byte (printable characters and control bytes alike).
    Byte(u8),
    /// Bare escape, including any escape sequence that could not be resolved.
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Forward delete (`ESC [ 3 ~`).
    Delete,
}

pub const ESC: u8 = 0x1b;
pub const ENTER: u8 = b'\r';
pub const BACKSPACE: u8 = 127;
pub const CTRL_H: u8 = ctrl(b'h');
pub const CTRL_Q: u8 = ctrl(b'q');
pub const CTRL_S: u8 = ctrl(b's');

/// Byte a terminal in raw mode sends for Ctrl + `key`.
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1f
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Byte(b) if (32..=126).contains(b) => write!(f, "'{}'", *b as char),
            KeyEvent::Byte(b) if *b < 32 => write!(f, "Ctrl-{}", (b | 0x40) as char),
            KeyEvent::Byte(b) => write!(f, "0x{b:02x}"),
            other => write!(f, "{other:?}"),
        }
    }
}
