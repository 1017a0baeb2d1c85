//! RenderEngine: composes a full frame from the editor model.
//!
//! The engine reads the model and never mutates it; the caller runs
//! `EditorModel::scroll` first so offsets, `rx` and the visible width are
//! current. Every frame is a full repaint; rows are erased to end of line
//! after drawing instead of clearing the whole screen, which avoids flicker.

use crate::status::{StatusContext, compose_status, format_status};
use crate::writer::FrameWriter;
use anyhow::Result;
use core_model::EditorModel;
use std::time::Instant;

pub struct RenderEngine {
    banner: String,
}

impl RenderEngine {
    /// `version` is shown in the welcome banner of an empty document.
    pub fn new(version: &str) -> Self {
        Self {
            banner: format!("ferrum editor -- version {version}"),
        }
    }

    /// Compose one frame. `now` decides whether the status message is still
    /// visible.
    pub fn render(&self, model: &EditorModel, now: Instant) -> Result<Vec<u8>> {
        let started = Instant::now();
        let view = model.view();
        let screen_cols = view.screen_cols();
        let mut w = FrameWriter::with_capacity((view.viewport.rows + 2) * (screen_cols + 8));
        w.hide_cursor()?;
        w.move_to(0, 0)?;
        self.draw_rows(&mut w, model)?;
        draw_status_bar(&mut w, model)?;
        draw_message_bar(&mut w, model, now)?;

        let gutter = model.gutter_width();
        let cy = view.cursor.row.saturating_sub(view.viewport.row_offset);
        let cx = gutter + view.rx.saturating_sub(view.viewport.col_offset);
        w.move_to(to_u16(cx), to_u16(cy))?;
        w.show_cursor()?;

        let frame = w.finish();
        tracing::trace!(
            target: "render",
            bytes = frame.len(),
            ns = started.elapsed().as_nanos() as u64,
            row = view.cursor.row,
            rx = view.rx,
            "frame"
        );
        Ok(frame)
    }

    fn draw_rows(&self, w: &mut FrameWriter, model: &EditorModel) -> Result<()> {
        let doc = &model.state().document;
        let view = model.view();
        let rows = view.viewport.rows;
        let cols = view.viewport.cols;
        let screen_cols = view.screen_cols();
        let gutter = model.gutter_width();
        for y in 0..rows {
            let file_row = y + view.viewport.row_offset;
            match doc.line(file_row) {
                Some(line) => {
                    if gutter > 0 {
                        let number = format!("{:>width$} ", file_row + 1, width = gutter - 1);
                        w.bytes(number.as_bytes());
                    }
                    let rendered = line.rendered();
                    let start = view.viewport.col_offset.min(rendered.len());
                    let end = (start + cols).min(rendered.len());
                    w.bytes(&rendered[start..end]);
                }
                None if doc.is_empty() && y == rows / 3 => self.draw_banner(w, screen_cols),
                None => w.bytes(b"~"),
            }
            w.clear_to_eol()?;
            w.newline();
        }
        Ok(())
    }

    fn draw_banner(&self, w: &mut FrameWriter, screen_cols: usize) {
        let text = &self.banner.as_bytes()[..self.banner.len().min(screen_cols)];
        let mut padding = (screen_cols - text.len()) / 2;
        if padding > 0 {
            w.bytes(b"~");
            padding -= 1;
        }
        w.bytes(&b" ".repeat(padding));
        w.bytes(text);
    }
}

fn draw_status_bar(w: &mut FrameWriter, model: &EditorModel) -> Result<()> {
    let state = model.state();
    let name = state.display_name();
    let ctx = StatusContext {
        name: &name,
        line_count: state.document.line_count(),
        dirty: state.dirty(),
        row: model.cursor().row,
    };
    let line = format_status(&compose_status(&ctx), model.view().screen_cols());
    w.reverse(true)?;
    w.bytes(line.as_bytes());
    w.reverse(false)?;
    w.newline();
    Ok(())
}

fn draw_message_bar(w: &mut FrameWriter, model: &EditorModel, now: Instant) -> Result<()> {
    w.clear_to_eol()?;
    if let Some(msg) = model.state().visible_status(now) {
        let cols = model.view().screen_cols();
        w.bytes(&msg.as_bytes()[..msg.len().min(cols)]);
    }
    Ok(())
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
