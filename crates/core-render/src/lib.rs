//! Frame composition for the terminal screen.
//!
//! One refresh produces one byte buffer: hide the cursor, home it, paint
//! every text row, the inverted status bar and the message bar, then place
//! and show the cursor. The caller writes the whole buffer in a single call
//! so the terminal never shows a half-drawn frame.
//!
//! Screen layout, top to bottom:
//! - `viewport.rows` text rows: optional line-number gutter, then the
//!   rendered line sliced to the visible columns; `~` past the document;
//! - status bar (reverse video);
//! - message bar (ephemeral status, blank once it expires).
//!
//! Exposed Components:
//! - `render_engine`: `RenderEngine`, the per-refresh composer.
//! - `status`: status bar segments and width-aware formatting.
//! - `writer`: `FrameWriter`, thin wrapper queueing crossterm commands into
//!   an in-memory buffer.

pub mod render_engine;
pub mod status;
pub mod writer;

pub use render_engine::RenderEngine;
