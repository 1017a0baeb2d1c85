//! Terminal backend abstraction and crossterm implementation.
//!
//! Three collaborators of the editing core live here:
//! * `CrosstermBackend` / `TerminalGuard`: raw mode plus alternate screen,
//!   restored on drop;
//! * `StdinBytes`: a `ByteSource` fed by a stdin reader thread, giving reads
//!   a short timeout so a lone Escape can be told apart from a sequence;
//! * `StdoutSink`: writes a composed frame in one call.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

pub mod input;
pub mod output;

pub use input::{READ_TIMEOUT, StdinBytes};
pub use output::{FrameSink, StdoutSink};

/// What the redraw loop needs from the terminal between frames.
pub trait TerminalBackend {
    /// `(columns, rows)` of the terminal window.
    fn window_size(&self) -> Result<(u16, u16)>;
}

/// Crossterm-driven terminal. Raw mode is only held through a [`TerminalGuard`].
#[derive(Debug, Default)]
pub struct CrosstermBackend;

impl CrosstermBackend {
    pub fn new() -> Self {
        Self
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    /// Switch to raw mode on the alternate screen until the guard drops.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        enable_raw_mode()?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        tracing::debug!(target: "terminal", "raw_mode_entered");
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn window_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = crossterm::terminal::size()?;
        if cols == 0 || rows == 0 {
            anyhow::bail!("terminal reported an empty window ({cols}x{rows})");
        }
        Ok((cols, rows))
    }
}

/// Restores the cooked terminal on drop, including during unwinding.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl TerminalGuard<'_> {
    pub fn backend(&self) -> &CrosstermBackend {
        &*self.backend
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        let _ = execute!(stdout(), LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
        tracing::debug!(target: "terminal", "raw_mode_left");
    }
}
