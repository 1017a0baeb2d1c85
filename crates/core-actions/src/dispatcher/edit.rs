//! Text edit action handling (insert/newline/backspace/delete).
//!
//! Edits mutate the document through `core_text::Document` and then move the
//! cursor of the single view. A cursor resting on the virtual row past the
//! last line materializes a fresh empty line before typing into it; backspace
//! there has nothing to delete.

use super::DispatchResult;
use super::motion::move_right;
use crate::EditKind;
use core_model::{Cursor, View};
use core_state::EditorState;

pub(crate) fn handle_edit(
    kind: EditKind,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    let before = view.cursor;
    let changed = match kind {
        EditKind::InsertChar(ch) => {
            insert_char(state, &mut view.cursor, ch);
            true
        }
        EditKind::InsertNewline => {
            insert_newline(state, &mut view.cursor);
            true
        }
        EditKind::DeleteBackward => delete_backward(state, &mut view.cursor),
        EditKind::DeleteForward => {
            let mut probe = view.cursor;
            move_right(&state.document, &mut probe);
            if probe != view.cursor {
                view.cursor = probe;
                delete_backward(state, &mut view.cursor)
            } else {
                false
            }
        }
    };
    tracing::trace!(
        target: "actions.dispatch",
        ?kind,
        row = before.row,
        col = before.col,
        to_row = view.cursor.row,
        to_col = view.cursor.col,
        changed,
        "edit"
    );
    if changed {
        DispatchResult::edited()
    } else {
        DispatchResult::clean()
    }
}

fn insert_char(state: &mut EditorState, cursor: &mut Cursor, ch: u8) {
    let doc = &mut state.document;
    if cursor.row >= doc.line_count() {
        let at = doc.line_count();
        doc.insert_line(at, Vec::new());
        *cursor = Cursor::new(at, 0);
    }
    doc.insert_char(cursor.row, cursor.col, ch);
    cursor.col += 1;
}

fn insert_newline(state: &mut EditorState, cursor: &mut Cursor) {
    let doc = &mut state.document;
    if cursor.row >= doc.line_count() {
        let at = doc.line_count();
        doc.insert_line(at, Vec::new());
        *cursor = Cursor::new(at, 0);
        return;
    }
    doc.split_line(cursor.row, cursor.col);
    *cursor = Cursor::new(cursor.row + 1, 0);
}

/// Returns whether the document changed.
fn delete_backward(state: &mut EditorState, cursor: &mut Cursor) -> bool {
    let doc = &mut state.document;
    if cursor.row >= doc.line_count() || (cursor.row == 0 && cursor.col == 0) {
        return false;
    }
    if cursor.col > 0 {
        doc.delete_char(cursor.row, cursor.col - 1);
        cursor.col -= 1;
        return true;
    }
    let prev = cursor.row - 1;
    let prev_len = doc.line_len(prev);
    let tail = doc
        .line(cursor.row)
        .map(|l| l.as_bytes().to_vec())
        .unwrap_or_default();
    doc.append_to_line(prev, &tail);
    doc.delete_line(cursor.row);
    *cursor = Cursor::new(prev, prev_len);
    true
}
