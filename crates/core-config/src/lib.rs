//! Editor options and screen geometry context.
//!
//! There is no configuration file: the binary fills a [`Config`] from its
//! command line flags and calls [`Config::sanitize`] once before use. Values
//! outside the supported range are clamped (and logged under the `config`
//! target) rather than rejected.
//!
//! [`ConfigContext`] carries the terminal geometry for one refresh cycle and
//! derives how many rows remain for text once the status and message bars are
//! reserved.

use std::time::Duration;
use tracing::info;

/// Rows reserved below the text area: status bar + message bar.
pub const STATUS_ROWS: u16 = 2;
pub const MAX_TAB_STOP: usize = 16;
pub const DEFAULT_QUIT_TIMES: u32 = 3;
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub viewport_columns: u16,
    pub viewport_rows: u16,
    pub status_rows: u16,
}

impl ConfigContext {
    pub fn new(viewport_columns: u16, viewport_rows: u16, status_rows: u16) -> Self {
        Self {
            viewport_columns,
            viewport_rows,
            status_rows,
        }
    }

    /// Geometry for a full terminal window with the default status rows.
    pub fn for_window(columns: u16, rows: u16) -> Self {
        Self::new(columns, rows, STATUS_ROWS)
    }

    pub fn text_rows(&self) -> u16 {
        self.viewport_rows.saturating_sub(self.status_rows)
    }

    pub fn text_columns(&self) -> u16 {
        self.viewport_columns
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Distance between tab stops in the rendered form.
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses required to quit with unsaved changes.
    pub quit_times: u32,
    /// How long a status message stays visible.
    pub status_ttl: Duration,
    /// Show the line-number gutter at startup.
    pub line_numbers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: core_text::TAB_STOP,
            quit_times: DEFAULT_QUIT_TIMES,
            status_ttl: DEFAULT_STATUS_TTL,
            line_numbers: false,
        }
    }
}

impl Config {
    /// Clamp every option into its supported range. Returns true when any
    /// value changed.
    pub fn sanitize(&mut self) -> bool {
        let raw = self.tab_stop;
        let clamped = raw.clamp(1, MAX_TAB_STOP);
        if clamped != raw {
            info!(target: "config", raw, clamped, max = MAX_TAB_STOP, "tab_stop_clamped");
            self.tab_stop = clamped;
            return true;
        }
        false
    }
}
