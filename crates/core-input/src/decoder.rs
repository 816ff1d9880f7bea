//! Escape-sequence key decoder.
//!
//! Recognized sequences (anything else after an `ESC` resolves to a bare `Esc`):
//!
//! | bytes            | key                         |
//! |------------------|-----------------------------|
//! | `ESC [ A/B/C/D`  | Up / Down / Right / Left    |
//! | `ESC [ H/F`      | Home / End                  |
//! | `ESC [ 1~ 7~`    | Home                        |
//! | `ESC [ 4~ 8~`    | End                         |
//! | `ESC [ 3~`       | Delete                      |
//! | `ESC [ 5~ 6~`    | PageUp / PageDown           |
//!
//! At most three bytes are read after `ESC`. An expired wait or a read failure while a
//! sequence is open consumes what was read so far and yields `Esc`; nothing is pushed back.

use crate::{ByteSource, InputError};
use core_events::{ESC, KeyEvent};
use tracing::{debug, trace};

/// Decoder state between bytes of one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeFsm {
    #[default]
    Ground,
    /// Saw `ESC`.
    Escape,
    /// Saw `ESC` followed by one more byte.
    Intro(u8),
    /// Saw `ESC [ <digit>`.
    CsiParam(u8),
}

/// Result of feeding one byte to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Pending(DecodeFsm),
    Emit(KeyEvent),
}

impl DecodeFsm {
    pub fn advance(self, byte: u8) -> Step {
        match self {
            DecodeFsm::Ground if byte == ESC => Step::Pending(DecodeFsm::Escape),
            DecodeFsm::Ground => Step::Emit(KeyEvent::Byte(byte)),
            DecodeFsm::Escape => Step::Pending(DecodeFsm::Intro(byte)),
            DecodeFsm::Intro(b'[') if byte.is_ascii_digit() => {
                Step::Pending(DecodeFsm::CsiParam(byte))
            }
            DecodeFsm::Intro(b'[') => Step::Emit(csi_final(byte)),
            DecodeFsm::Intro(_) => Step::Emit(KeyEvent::Esc),
            DecodeFsm::CsiParam(digit) if byte == b'~' => Step::Emit(csi_tilde(digit)),
            DecodeFsm::CsiParam(_) => Step::Emit(KeyEvent::Esc),
        }
    }

    /// Key produced when the wait expires in this state; `None` when no key is open.
    pub fn expire(self) -> Option<KeyEvent> {
        match self {
            DecodeFsm::Ground => None,
            _ => Some(KeyEvent::Esc),
        }
    }
}

fn csi_final(byte: u8) -> KeyEvent {
    match byte {
        b'A' => KeyEvent::Up,
        b'B' => KeyEvent::Down,
        b'C' => KeyEvent::Right,
        b'D' => KeyEvent::Left,
        b'H' => KeyEvent::Home,
        b'F' => KeyEvent::End,
        _ => KeyEvent::Esc,
    }
}

fn csi_tilde(digit: u8) -> KeyEvent {
    match digit {
        b'1' | b'7' => KeyEvent::Home,
        b'3' => KeyEvent::Delete,
        b'4' | b'8' => KeyEvent::End,
        b'5' => KeyEvent::PageUp,
        b'6' => KeyEvent::PageDown,
        _ => KeyEvent::Esc,
    }
}

/// Pulls bytes from a `ByteSource` and emits one `KeyEvent` per call.
pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Decode the next key, or `Ok(None)` if the wait expired before any byte arrived.
    ///
    /// A read error before the first byte is returned to the caller; once an `ESC` has been
    /// read, errors and timeouts both close the sequence as `Esc`.
    pub fn poll_key(&mut self) -> Result<Option<KeyEvent>, InputError> {
        let mut fsm = DecodeFsm::Ground;
        loop {
            let byte = match self.source.read_byte() {
                Ok(Some(b)) => b,
                Ok(None) => {
                    if fsm != DecodeFsm::Ground {
                        trace!(target: "input.decode", state = ?fsm, "sequence_timeout");
                    }
                    return Ok(fsm.expire());
                }
                Err(e) if fsm != DecodeFsm::Ground => {
                    debug!(
                        target: "input.decode",
                        state = ?fsm,
                        error = %e,
                        "sequence_read_failed"
                    );
                    return Ok(Some(KeyEvent::Esc));
                }
                Err(e) => return Err(e),
            };
            match fsm.advance(byte) {
                Step::Pending(next) => fsm = next,
                Step::Emit(key) => {
                    trace!(target: "input.decode", %key, "key");
                    return Ok(Some(key));
                }
            }
        }
    }

    /// Block until a key arrives, riding out expired waits.
    pub fn next_key(&mut self) -> Result<KeyEvent, InputError> {
        loop {
            if let Some(key) = self.poll_key()? {
                return Ok(key);
            }
        }
    }
}
