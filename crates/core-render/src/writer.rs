//! Frame writer.
//!
//! Queues crossterm commands and raw line bytes into one in-memory buffer.
//! Nothing reaches the terminal from here; `finish` hands the buffer to the
//! caller, who writes it in a single call.
//!
//! Line content is written as raw bytes: lines are byte strings, not UTF-8,
//! and must not be re-encoded on the way out.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, SetAttribute},
    terminal::{Clear, ClearType},
};

#[derive(Debug, Default)]
pub struct FrameWriter {
    buf: Vec<u8>,
}

impl FrameWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
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

    /// Absolute move, zero-based `(x, y)`.
    pub fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.buf, MoveTo(x, y))?;
        Ok(())
    }

    /// Erase from the cursor to the end of the current line.
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(self.buf, Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    pub fn reverse(&mut self, on: bool) -> Result<()> {
        let attr = if on { Attribute::Reverse } else { Attribute::Reset };
        queue!(self.buf, SetAttribute(attr))?;
        Ok(())
    }

    pub fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn newline(&mut self) {
        self.buf.extend_from_slice(b"\r\n");
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
