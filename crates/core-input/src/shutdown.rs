//! Termination requests from outside the key stream.
//!
//! `ShutdownSignal` is a shared flag. `install_termination_handlers` sets it on SIGTERM, SIGINT,
//! SIGQUIT and (on unix) SIGHUP instead of letting the default action kill the process, so the
//! session can leave through its normal exit path and the terminal guard restores the tty.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_signaled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Route termination signals to this flag.
    pub fn install_termination_handlers(&self) -> io::Result<()> {
        for &sig in signal_hook::consts::TERM_SIGNALS {
            signal_hook::flag::register(sig, Arc::clone(&self.flag))?;
        }
        #[cfg(unix)]
        signal_hook::flag::register(signal_hook::consts::SIGHUP, Arc::clone(&self.flag))?;
        info!(target: "input.shutdown", "termination_handlers_installed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let shutdown = ShutdownSignal::new();
        let watcher = shutdown.clone();
        assert!(!watcher.is_signaled());
        shutdown.signal();
        assert!(watcher.is_signaled());
    }
}
