//! Dispatcher applying `Action` to the editor model.
//!
//! Sub-modules:
//! * `motion` - cursor movement semantics
//! * `edit`   - text mutation (insert/newline/backspace/delete)
//!
//! Every handler finishes by clamping the cursor back into the document, so
//! callers never observe a column past the end of the cursor's line.
//! `Command`, `Quit` and `ToggleLineNumbers` are outside the dispatcher's
//! reach: commands need a key source for their prompts and quitting needs
//! the caller's confirmation gate.

use crate::Action;
use core_model::EditorModel;

mod edit;
mod motion;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Cursor or content changed; a redraw is needed.
    pub dirty: bool,
    /// Document content changed.
    pub text_changed: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            text_changed: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            text_changed: false,
        }
    }
    pub fn edited() -> Self {
        Self {
            dirty: true,
            text_changed: true,
        }
    }
}

/// Apply an action to the model.
pub fn dispatch(action: Action, model: &mut EditorModel) -> DispatchResult {
    let result = {
        let (state, view) = model.split_state_and_view();
        match action {
            Action::Motion(kind) => motion::handle_motion(kind, state, view),
            Action::Edit(kind) => edit::handle_edit(kind, state, view),
            Action::ToggleLineNumbers => {
                state.line_numbers = !state.line_numbers;
                tracing::debug!(
                    target: "actions.dispatch",
                    enabled = state.line_numbers,
                    "toggle_line_numbers"
                );
                DispatchResult::dirty()
            }
            Action::Command(_) | Action::Quit | Action::Ignore => DispatchResult::clean(),
        }
    };
    model.clamp_cursor();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditKind, MotionKind};
    use core_model::Cursor;
    use core_state::EditorState;
    use core_text::Document;

    fn model(lines: &[&str]) -> EditorModel {
        let doc = Document::from_lines(lines.iter().copied(), 2);
        EditorModel::new(EditorState::new(doc), 10, 80)
    }

    fn lines(model: &EditorModel) -> Vec<String> {
        model
            .state()
            .document
            .lines()
            .map(|l| String::from_utf8_lossy(l.as_bytes()).into_owned())
            .collect()
    }

    #[test]
    fn backspace_at_line_start_merges_with_previous() {
        let mut m = model(&["ab", "cd"]);
        m.set_cursor(Cursor::new(1, 0));
        let r = dispatch(Action::Edit(EditKind::DeleteBackward), &mut m);
        assert!(r.text_changed);
        assert_eq!(lines(&m), vec!["abcd"]);
        assert_eq!(m.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn newline_splits_line() {
        let mut m = model(&["abcd"]);
        m.set_cursor(Cursor::new(0, 2));
        dispatch(Action::Edit(EditKind::InsertNewline), &mut m);
        assert_eq!(lines(&m), vec!["ab", "cd"]);
        assert_eq!(m.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn backspace_at_document_start_is_noop() {
        let mut m = model(&["ab"]);
        let r = dispatch(Action::Edit(EditKind::DeleteBackward), &mut m);
        assert_eq!(r, DispatchResult::clean());
        assert_eq!(lines(&m), vec!["ab"]);
        assert!(!m.state().dirty());
    }

    #[test]
    fn delete_at_end_of_last_line_is_noop() {
        let mut m = model(&["ab", "cd"]);
        m.set_cursor(Cursor::new(1, 2));
        let r = dispatch(Action::Edit(EditKind::DeleteForward), &mut m);
        assert!(!r.text_changed);
        assert_eq!(lines(&m), vec!["ab", "cd"]);
        assert!(!m.state().dirty());
    }

    #[test]
    fn toggle_line_numbers_flips_flag() {
        let mut m = model(&["a"]);
        assert!(dispatch(Action::ToggleLineNumbers, &mut m).dirty);
        assert!(m.state().line_numbers);
        dispatch(Action::ToggleLineNumbers, &mut m);
        assert!(!m.state().line_numbers);
    }

    #[test]
    fn non_dispatch_actions_are_clean() {
        let mut m = model(&["a"]);
        assert_eq!(dispatch(Action::Quit, &mut m), DispatchResult::clean());
        assert_eq!(dispatch(Action::Ignore, &mut m), DispatchResult::clean());
        assert_eq!(
            dispatch(Action::Command(crate::CommandKind::Find), &mut m),
            DispatchResult::clean()
        );
    }

    #[test]
    fn motion_reports_dirty_only_when_moving() {
        let mut m = model(&["ab"]);
        assert_eq!(
            dispatch(Action::Motion(MotionKind::Left), &mut m),
            DispatchResult::clean()
        );
        assert_eq!(
            dispatch(Action::Motion(MotionKind::Right), &mut m),
            DispatchResult::dirty()
        );
    }
}
