//! Frame writer.
//!
//! Every terminal command for one frame is queued into an in-memory buffer and handed to
//! the terminal in a single write, so a partially drawn frame is never visible.
//!
//! All positions are 0-based; crossterm converts them to the 1-based wire form.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        queue!(self.buf, Hide)?;
        Ok(())
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        queue!(self.buf, Show)?;
        Ok(())
    }

    pub fn move_to(&mut self, col: u16, row: u16) -> Result<()> {
        queue!(self.buf, MoveTo(col, row))?;
        Ok(())
    }

    pub fn home(&mut self) -> Result<()> {
        self.move_to(0, 0)
    }

    /// Erase from the cursor to the end of the line.
    pub fn clear_line(&mut self) -> Result<()> {
        queue!(self.buf, Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        queue!(self.buf, Clear(ClearType::All))?;
        Ok(())
    }

    pub fn reverse_video(&mut self) -> Result<()> {
        queue!(self.buf, SetAttribute(Attribute::Reverse))?;
        Ok(())
    }

    pub fn reset_style(&mut self) -> Result<()> {
        queue!(self.buf, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    pub fn print(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn newline(&mut self) {
        self.buf.extend_from_slice(b"\r\n");
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Hand the whole frame to `out` in one write.
    pub fn flush_to<W: Write + ?Sized>(self, out: &mut W) -> Result<()> {
        out.write_all(&self.buf)?;
        out.flush()?;
        Ok(())
    }
}
