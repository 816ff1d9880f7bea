//! Raw byte input and key decoding.
//!
//! `ByteSource` is the seam to the terminal: one byte per call with a bounded wait, `Ok(None)`
//! on timeout. `KeyDecoder` turns that stream into `KeyEvent`s using the escape-sequence state
//! machine in `decoder`. `StdinBytes` is the production source; `ScriptedBytes` replays a
//! fixed byte script. `ShutdownSignal` carries termination signals to the session loop.

mod decoder;
mod line;
mod shutdown;
mod stdin;

pub use decoder::{DecodeFsm, KeyDecoder, Step};
pub use line::read_line;
pub use shutdown::ShutdownSignal;
pub use stdin::StdinBytes;

use std::collections::VecDeque;

/// Failure of the underlying byte source. Both variants are fatal for the editor.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("terminal read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("terminal input closed")]
    Disconnected,
}

/// Byte-oriented input with a bounded wait.
pub trait ByteSource {
    /// Wait for one byte. Returns `Ok(None)` if nothing arrived within the wait window.
    fn read_byte(&mut self) -> Result<Option<u8>, InputError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> Result<Option<u8>, InputError> {
        (**self).read_byte()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read_byte(&mut self) -> Result<Option<u8>, InputError> {
        (**self).read_byte()
    }
}

/// Replays a fixed script of bytes and timeouts, then reports `Disconnected`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBytes {
    script: VecDeque<Option<u8>>,
}

impl ScriptedBytes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut s = Self::new();
        s.push_bytes(bytes);
        s
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.script.extend(bytes.iter().copied().map(Some));
        self
    }

    /// Queue one expired wait.
    pub fn push_timeout(&mut self) -> &mut Self {
        self.script.push_back(None);
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

impl ByteSource for ScriptedBytes {
    fn read_byte(&mut self) -> Result<Option<u8>, InputError> {
        self.script.pop_front().ok_or(InputError::Disconnected)
    }
}
