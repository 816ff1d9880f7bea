//! Filename prompt used when saving an unnamed document.

use anyhow::Result;
use core_input::{ByteSource, read_line};
use core_render::writer::Writer;
use core_terminal::TerminalBackend;
use std::io::Write;

pub const SAVE_AS_LABEL: &str = "Save as: ";

pub trait FilenamePrompt {
    /// Ask for a file name on `out`, reading the answer from `source`. `Ok(None)` when the
    /// user entered nothing.
    fn ask<S, W>(&mut self, source: &mut S, out: &mut W) -> Result<Option<String>>
    where
        S: ByteSource + ?Sized,
        W: Write + ?Sized;
}

/// Drops the terminal back to cooked mode for the duration of the prompt so the line is
/// echoed and editable, then re-enters raw mode.
pub struct SuspendingPrompt<B> {
    backend: B,
}

impl<B: TerminalBackend> SuspendingPrompt<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: TerminalBackend> FilenamePrompt for SuspendingPrompt<B> {
    fn ask<S, W>(&mut self, source: &mut S, out: &mut W) -> Result<Option<String>>
    where
        S: ByteSource + ?Sized,
        W: Write + ?Sized,
    {
        self.backend.suspend()?;
        let mut w = Writer::new();
        w.clear_screen()?;
        w.home()?;
        w.show_cursor()?;
        w.print(SAVE_AS_LABEL.as_bytes());
        let answer = w.flush_to(out).and_then(|()| Ok(read_line(source)?));
        self.backend.resume()?;
        let answer = answer?;
        tracing::debug!(target: "actions.session", answered = answer.is_some(), "filename_prompt");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_input::ScriptedBytes;

    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<&'static str>,
    }

    impl TerminalBackend for RecordingBackend {
        fn enter(&mut self) -> Result<()> {
            self.calls.push("enter");
            Ok(())
        }
        fn leave(&mut self) -> Result<()> {
            self.calls.push("leave");
            Ok(())
        }
        fn suspend(&mut self) -> Result<()> {
            self.calls.push("suspend");
            Ok(())
        }
        fn resume(&mut self) -> Result<()> {
            self.calls.push("resume");
            Ok(())
        }
        fn set_title(&mut self, _title: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn suspends_reads_and_resumes() {
        let mut prompt = SuspendingPrompt::new(RecordingBackend::default());
        let mut src = ScriptedBytes::from_bytes(b"notes.txt\n");
        let mut out = Vec::new();
        let answer = prompt.ask(&mut src, &mut out).unwrap();
        assert_eq!(answer.as_deref(), Some("notes.txt"));
        assert_eq!(prompt.backend_mut().calls, vec!["suspend", "resume"]);
        assert!(out.ends_with(SAVE_AS_LABEL.as_bytes()));
    }

    #[test]
    fn blank_answer_is_none_and_still_resumes() {
        let mut prompt = SuspendingPrompt::new(RecordingBackend::default());
        let mut src = ScriptedBytes::from_bytes(b"\n");
        let answer = prompt.ask(&mut src, &mut Vec::new()).unwrap();
        assert!(answer.is_none());
        assert_eq!(prompt.backend_mut().calls, vec!["suspend", "resume"]);
    }
}
