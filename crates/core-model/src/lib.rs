//! Editor model: session state plus the single view looking at it.
//!
//! Three coordinate spaces meet here:
//! * buffer position: `Cursor { row, col }`, `col` indexes raw line bytes;
//! * rendered column: `View::rx`, the tab-expanded column of the cursor,
//!   always re-derived from the buffer column and never edited directly;
//! * screen cell: rendered column minus `Viewport::col_offset` plus the
//!   gutter width, row minus `Viewport::row_offset`.
//!
//! Invariants after every `EditorModel::scroll` call:
//! * `cursor.row <= line_count` (`== line_count` is the virtual row past the
//!   last line) and `cursor.col <= line_len(cursor.row)`;
//! * `row_offset <= cursor.row < row_offset + rows`;
//! * `col_offset <= rx < col_offset + cols`.
//!
//! The gutter width is a pure function of line count and the toggle; drawing
//! reads it but never feeds back into cursor state.

use core_state::EditorState;

/// Buffer-space cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Visible window over buffer rows and rendered columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
    /// Visible text rows.
    pub rows: usize,
    /// Visible text columns (screen columns minus gutter).
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            rows,
            cols,
        }
    }

    /// Shift offsets so `(row, rx)` falls inside the window. Returns true if
    /// either offset changed. A zero-sized axis never scrolls.
    pub fn scroll_to_show(&mut self, row: usize, rx: usize) -> bool {
        let before = (self.row_offset, self.col_offset);
        if self.rows > 0 {
            if row < self.row_offset {
                self.row_offset = row;
            }
            if row >= self.row_offset + self.rows {
                self.row_offset = row + 1 - self.rows;
            }
        }
        if self.cols > 0 {
            if rx < self.col_offset {
                self.col_offset = rx;
            }
            if rx >= self.col_offset + self.cols {
                self.col_offset = rx + 1 - self.cols;
            }
        }
        before != (self.row_offset, self.col_offset)
    }
}

/// Width of the line-number gutter: digits of the largest line number plus
/// one separator column, or 0 when disabled.
pub fn gutter_width(line_count: usize, enabled: bool) -> usize {
    if !enabled {
        return 0;
    }
    let mut n = line_count.max(1);
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits + 1
}

#[derive(Debug, Clone)]
pub struct View {
    pub cursor: Cursor,
    /// Rendered column of the cursor, refreshed by `EditorModel::scroll`.
    pub rx: usize,
    pub viewport: Viewport,
    screen_cols: usize,
}

impl View {
    pub fn new(text_rows: usize, screen_cols: usize) -> Self {
        Self {
            cursor: Cursor::default(),
            rx: 0,
            viewport: Viewport::new(text_rows, screen_cols),
            screen_cols,
        }
    }

    pub fn screen_cols(&self) -> usize {
        self.screen_cols
    }
}

pub struct EditorModel {
    state: EditorState,
    view: View,
}

impl EditorModel {
    pub fn new(state: EditorState, text_rows: usize, screen_cols: usize) -> Self {
        Self {
            state,
            view: View::new(text_rows, screen_cols),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn view(&self) -> &View {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Disjoint mutable borrows of the state and the view.
    pub fn split_state_and_view(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, &mut self.view)
    }

    pub fn cursor(&self) -> Cursor {
        self.view.cursor
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.view.cursor = cursor;
        self.clamp_cursor();
    }

    /// New terminal geometry for the text area.
    pub fn resize(&mut self, text_rows: usize, screen_cols: usize) {
        self.view.viewport.rows = text_rows;
        self.view.screen_cols = screen_cols;
        self.view.viewport.cols = screen_cols.saturating_sub(self.gutter_width());
        tracing::debug!(target: "model", text_rows, screen_cols, "resize");
    }

    pub fn gutter_width(&self) -> usize {
        gutter_width(self.state.document.line_count(), self.state.line_numbers)
    }

    /// Pull the cursor back inside the document after rows or line lengths
    /// shrank.
    pub fn clamp_cursor(&mut self) {
        let doc = &self.state.document;
        let cursor = &mut self.view.cursor;
        cursor.row = cursor.row.min(doc.line_count());
        cursor.col = cursor.col.min(doc.line_len(cursor.row));
    }

    /// Recompute the rendered column and visible width, then scroll the
    /// viewport so the cursor is visible. Called once before every draw.
    pub fn scroll(&mut self) -> bool {
        self.clamp_cursor();
        let gutter = self.gutter_width();
        let (state, view) = self.split_state_and_view();
        view.viewport.cols = view.screen_cols.saturating_sub(gutter);
        view.rx = state.document.cx_to_rx(view.cursor.row, view.cursor.col);
        view.viewport.scroll_to_show(view.cursor.row, view.rx)
    }
}
