//! Terminal backend abstraction and crossterm implementation.
//!
//! Raw mode is a scoped resource: `CrosstermBackend::enter_guard` returns a `TerminalGuard`
//! that restores the original settings when dropped, so early returns, `?` propagation and
//! panics that unwind all leave the terminal usable.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

pub mod geometry;
pub use geometry::{STATUS_ROWS, ScreenSize, window_size};

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    /// Temporarily return to cooked (line-buffered, echoing) input.
    fn suspend(&mut self) -> Result<()>;
    /// Re-enter raw input after `suspend`.
    fn resume(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

impl<T: TerminalBackend + ?Sized> TerminalBackend for &mut T {
    fn enter(&mut self) -> Result<()> {
        (**self).enter()
    }
    fn leave(&mut self) -> Result<()> {
        (**self).leave()
    }
    fn suspend(&mut self) -> Result<()> {
        (**self).suspend()
    }
    fn resume(&mut self) -> Result<()> {
        (**self).resume()
    }
    fn set_title(&mut self, title: &str) -> Result<()> {
        (**self).set_title(title)
    }
}

pub struct CrosstermBackend {
    entered: bool,
    suspended: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self {
            entered: false,
            suspended: false,
        }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen)?;
            self.entered = true;
            self.suspended = false;
            tracing::debug!(target: "terminal", "raw_mode_entered");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            self.suspended = false;
            tracing::debug!(target: "terminal", "raw_mode_left");
        }
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        if self.entered && !self.suspended {
            disable_raw_mode()?;
            self.suspended = true;
        }
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if self.entered && self.suspended {
            enable_raw_mode()?;
            self.suspended = false;
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl TerminalGuard<'_> {
    pub fn backend_mut(&mut self) -> &mut CrosstermBackend {
        &mut *self.backend
    }
}

impl<'a> Drop for TerminalGuard<'a> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}

/// Best-effort restoration for paths that cannot reach a guard (panic hook).
pub fn emergency_restore() {
    let _ = execute!(stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}
