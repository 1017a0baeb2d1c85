//! Motion sub-dispatch (cursor movement).
//!
//! Pure, synchronous cursor movement over buffer coordinates. Row may rest on
//! `line_count` (the virtual row past the last line) but horizontal motion
//! never wraps onto it. After every step the column is clamped to the length
//! of the destination line.

use super::DispatchResult;
use crate::MotionKind;
use core_model::{Cursor, View};
use core_state::EditorState;
use core_text::Document;

pub(crate) fn handle_motion(
    kind: MotionKind,
    state: &EditorState,
    view: &mut View,
) -> DispatchResult {
    let doc = &state.document;
    let before = view.cursor;
    match kind {
        MotionKind::Left => move_left(doc, &mut view.cursor),
        MotionKind::Right => move_right(doc, &mut view.cursor),
        MotionKind::Up => move_up(doc, &mut view.cursor),
        MotionKind::Down => move_down(doc, &mut view.cursor),
        MotionKind::LineStart => view.cursor.col = 0,
        MotionKind::LineEnd => view.cursor.col = doc.line_len(view.cursor.row),
        MotionKind::PageUp => {
            view.cursor.row = view.viewport.row_offset;
            for _ in 0..view.viewport.rows {
                move_up(doc, &mut view.cursor);
            }
        }
        MotionKind::PageDown => {
            let bottom = (view.viewport.row_offset + view.viewport.rows).saturating_sub(1);
            view.cursor.row = bottom.min(doc.line_count());
            for _ in 0..view.viewport.rows {
                move_down(doc, &mut view.cursor);
            }
        }
    }
    clamp_col(doc, &mut view.cursor);
    tracing::trace!(
        target: "actions.dispatch",
        ?kind,
        row = before.row,
        col = before.col,
        to_row = view.cursor.row,
        to_col = view.cursor.col,
        "motion"
    );
    if before != view.cursor {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

fn clamp_col(doc: &Document, cursor: &mut Cursor) {
    cursor.row = cursor.row.min(doc.line_count());
    cursor.col = cursor.col.min(doc.line_len(cursor.row));
}

pub(crate) fn move_left(doc: &Document, cursor: &mut Cursor) {
    if cursor.col > 0 {
        cursor.col -= 1;
    } else if cursor.row > 0 {
        cursor.row -= 1;
        cursor.col = doc.line_len(cursor.row);
    }
}

pub(crate) fn move_right(doc: &Document, cursor: &mut Cursor) {
    if cursor.row >= doc.line_count() {
        return;
    }
    if cursor.col < doc.line_len(cursor.row) {
        cursor.col += 1;
    } else if cursor.row + 1 < doc.line_count() {
        cursor.row += 1;
        cursor.col = 0;
    }
}

fn move_up(doc: &Document, cursor: &mut Cursor) {
    if cursor.row > 0 {
        cursor.row -= 1;
    }
    clamp_col(doc, cursor);
}

fn move_down(doc: &Document, cursor: &mut Cursor) {
    if cursor.row < doc.line_count() {
        cursor.row += 1;
    }
    clamp_col(doc, cursor);
}
