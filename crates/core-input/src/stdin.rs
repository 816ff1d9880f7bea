//! Production byte source: a reader thread pumps stdin into a bounded channel and the
//! editor loop waits on it with `recv_timeout`.
//!
//! The thread only moves bytes; all decoding and state changes stay on the caller's thread.

use crate::{ByteSource, InputError};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::io::{self, Read};
use std::time::Duration;
use tracing::{debug, warn};

const STDIN_CHANNEL_CAP: usize = 4096;

pub struct StdinBytes {
    rx: Receiver<io::Result<u8>>,
    timeout: Duration,
}

impl StdinBytes {
    /// Start pumping the process's stdin. `timeout` bounds every `read_byte` wait.
    pub fn spawn(timeout: Duration) -> io::Result<Self> {
        Self::from_reader(io::stdin(), timeout)
    }

    /// Pump an arbitrary reader (pipes, files, test doubles).
    pub fn from_reader<R>(reader: R, timeout: Duration) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::bounded(STDIN_CHANNEL_CAP);
        std::thread::Builder::new()
            .name("stdin-pump".into())
            .spawn(move || pump(reader, tx))?;
        Ok(Self { rx, timeout })
    }
}

fn pump<R: Read>(mut reader: R, tx: Sender<io::Result<u8>>) {
    let mut buf = [0u8; 256];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                debug!(target: "input.stdin", "eof");
                return;
            }
            Ok(n) => {
                for &b in &buf[..n] {
                    if tx.send(Ok(b)).is_err() {
                        return;
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(target: "input.stdin", error = %e, "read_failed");
                let _ = tx.send(Err(e));
                return;
            }
        }
    }
}

impl ByteSource for StdinBytes {
    fn read_byte(&mut self) -> Result<Option<u8>, InputError> {
        match self.rx.recv_timeout(self.timeout) {
            Ok(Ok(b)) => Ok(Some(b)),
            Ok(Err(e)) => Err(InputError::Io(e)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(InputError::Disconnected),
        }
    }
}
