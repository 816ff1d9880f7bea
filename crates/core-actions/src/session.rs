//! EditorSession: the single-threaded control loop.
//!
//! One iteration: re-query geometry, reconcile the viewport, paint a frame, wait (bounded) for
//! one key, process it fully. An expired wait just loops, which keeps the frame current after
//! a resize or when a message expires.
//!
//! Phases:
//! * `Running` - normal editing; the dirty-quit guard is a counter inside this phase.
//! * `PromptingFilename` - a save of an unnamed document is asking for a name.
//! * `Terminated` - quit accepted or a termination signal arrived; `run` clears the screen and
//!   returns.

use crate::dispatcher::{DispatchContext, dispatch};
use crate::io_ops::Storage;
use crate::key_translator::translate;
use crate::prompt::FilenamePrompt;
use crate::Action;
use anyhow::Result;
use core_config::Config;
use core_events::KeyEvent;
use core_input::{ByteSource, InputError, KeyDecoder, ShutdownSignal};
use core_render::writer::Writer;
use core_render::{RenderEngine, RenderOptions, reconcile};
use core_state::EditorState;
use core_terminal::{ScreenSize, window_size};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub quit_times: u8,
    pub message_ttl: Duration,
    pub render: RenderOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            quit_times: 3,
            message_ttl: Duration::from_secs(5),
            render: RenderOptions::default(),
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            quit_times: config.quit_times(),
            message_ttl: config.message_timeout(),
            render: RenderOptions {
                tab_stop: config.tab_stop(),
                ..RenderOptions::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    PromptingFilename,
    Terminated,
}

pub struct EditorSession<S, W, St, P> {
    state: EditorState,
    decoder: KeyDecoder<S>,
    out: W,
    storage: St,
    prompt: P,
    engine: RenderEngine,
    options: SessionOptions,
    geometry: fn() -> ScreenSize,
    size: ScreenSize,
    phase: Phase,
    shutdown: ShutdownSignal,
}

impl<S, W, St, P> EditorSession<S, W, St, P>
where
    S: ByteSource,
    W: Write,
    St: Storage,
    P: FilenamePrompt,
{
    pub fn new(
        mut state: EditorState,
        source: S,
        out: W,
        storage: St,
        prompt: P,
        options: SessionOptions,
    ) -> Self {
        state.quit_confirmations_remaining = options.quit_times;
        let engine = RenderEngine::new(options.render.clone());
        Self {
            state,
            decoder: KeyDecoder::new(source),
            out,
            storage,
            prompt,
            engine,
            options,
            geometry: window_size,
            size: ScreenSize::FALLBACK,
            phase: Phase::Running,
            shutdown: ShutdownSignal::default(),
        }
    }

    /// Replace the terminal size query.
    pub fn with_geometry(mut self, geometry: fn() -> ScreenSize) -> Self {
        self.geometry = geometry;
        self
    }

    /// Stop at the next loop iteration once `shutdown` is signaled.
    pub fn with_shutdown(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn engine(&self) -> &RenderEngine {
        &self.engine
    }

    pub fn post_message<M: Into<String>>(&mut self, message: M) {
        self.state.set_ephemeral(message, self.options.message_ttl);
    }

    /// Drive the loop until quit. Returns `Err` only for fatal failures (terminal input or
    /// output); the caller restores the terminal either way.
    pub fn run(&mut self) -> Result<()> {
        info!(target: "actions.session", quit_times = self.options.quit_times, "session_start");
        while self.phase != Phase::Terminated {
            if self.shutdown.is_signaled() {
                info!(target: "actions.session", dirty = self.state.dirty, "terminated_by_signal");
                self.phase = Phase::Terminated;
                break;
            }
            self.refresh()?;
            match self.decoder.poll_key() {
                Ok(Some(key)) => {
                    self.handle_key(key)?;
                }
                Ok(None) => {
                    self.state.tick_ephemeral();
                }
                Err(e) => {
                    error!(target: "actions.session", error = %e, "input_failed");
                    return Err(e.into());
                }
            }
        }
        let mut w = Writer::new();
        w.clear_screen()?;
        w.home()?;
        w.flush_to(&mut self.out)?;
        info!(target: "actions.session", dirty = self.state.dirty, "session_end");
        Ok(())
    }

    /// Re-query geometry, bring the cursor into view and paint one frame.
    pub fn refresh(&mut self) -> Result<()> {
        self.size = (self.geometry)();
        let rows = self.size.text_rows();
        if rows != self.state.last_text_height {
            debug!(
                target: "actions.session",
                cols = self.size.cols,
                rows = self.size.rows,
                "geometry"
            );
            self.state.last_text_height = rows;
        }
        self.state.row_offset = reconcile(self.state.cursor.line, self.state.row_offset, rows);
        self.engine
            .render(&self.state, self.size, Instant::now(), &mut self.out)
    }

    /// Process one key to completion.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Phase> {
        if self.phase == Phase::Terminated {
            return Ok(self.phase);
        }
        let Some(action) = translate(key) else {
            debug!(target: "actions.session", %key, "key_ignored");
            self.reset_quit_guard();
            return Ok(self.phase);
        };
        if action != Action::Quit {
            self.reset_quit_guard();
        }
        let ctx = DispatchContext {
            text_rows: self.size.text_rows(),
            message_ttl: self.options.message_ttl,
        };
        let result = dispatch(action, &mut self.state, &ctx);
        if result.save_requested {
            self.save()?;
        }
        if result.quit {
            info!(target: "actions.session", dirty = self.state.dirty, "quit");
            self.phase = Phase::Terminated;
        }
        self.state.clamp_cursor();
        Ok(self.phase)
    }

    fn reset_quit_guard(&mut self) {
        self.state.quit_confirmations_remaining = self.options.quit_times;
    }

    /// Write the document. A name typed at the prompt is kept only once a write to it
    /// succeeds, so a failed save asks again next time.
    fn save(&mut self) -> Result<()> {
        let (path, prompted) = match self.state.file_name.clone() {
            Some(path) => (path, false),
            None => {
                self.phase = Phase::PromptingFilename;
                let mut source = UntilShutdown {
                    source: self.decoder.source_mut(),
                    shutdown: &self.shutdown,
                };
                let answer = self.prompt.ask(&mut source, &mut self.out);
                self.phase = Phase::Running;
                if self.shutdown.is_signaled() {
                    info!(target: "actions.session", "save_interrupted");
                    return Ok(());
                }
                match answer? {
                    Some(name) => (PathBuf::from(name), true),
                    None => {
                        info!(target: "actions.session", "save_abandoned");
                        self.post_message("Save aborted");
                        return Ok(());
                    }
                }
            }
        };
        let bytes = self.state.document.serialize();
        match self.storage.save(&path, &bytes) {
            Ok(()) => {
                info!(
                    target: "io",
                    file = %path.display(),
                    size_bytes = bytes.len(),
                    "file_write_ok"
                );
                self.post_message(format!("{} bytes written to {}", bytes.len(), path.display()));
                self.state.file_name = Some(path);
                self.state.mark_clean();
            }
            Err(e) => {
                warn!(target: "io", error = %e, prompted, "file_write_error");
                self.post_message(format!("Can't save! {e}"));
            }
        }
        Ok(())
    }
}

/// Ends a prompt read as closed input once a termination signal is pending.
struct UntilShutdown<'a, S> {
    source: &'a mut S,
    shutdown: &'a ShutdownSignal,
}

impl<S: ByteSource> ByteSource for UntilShutdown<'_, S> {
    fn read_byte(&mut self) -> Result<Option<u8>, InputError> {
        match self.source.read_byte()? {
            None if self.shutdown.is_signaled() => Err(InputError::Disconnected),
            other => Ok(other),
        }
    }
}
