//! Incremental search driven by the prompt.
//!
//! Matching is a case-sensitive substring test against each line's rendered
//! form. The scan starts one line past the previous match in the current
//! direction and wraps around, visiting each line at most once. A hit moves
//! the cursor to the match and pushes `row_offset` past the end so the next
//! scroll lands the matching line at the top of the screen.

use crate::prompt::{PromptError, PromptHost, PromptObserver, run_prompt};
use core_events::{Direction, Key};
use core_input::KeySource;
use core_model::{Cursor, EditorModel, Viewport};

pub const FIND_PROMPT: &str = "Search: %s (Use ESC/Arrows/Enter)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// Position of the next hit for `query`, or `None`. Does not move the cursor.
pub fn find_next(
    model: &EditorModel,
    query: &[u8],
    last_match: Option<usize>,
    direction: SearchDirection,
) -> Option<(usize, usize)> {
    let doc = &model.state().document;
    let count = doc.line_count();
    if query.is_empty() || count == 0 {
        return None;
    }
    let mut current = last_match.map(|row| row.min(count - 1));
    for _ in 0..count {
        let row = match (current, direction) {
            (None, _) => 0,
            (Some(r), SearchDirection::Forward) => (r + 1) % count,
            (Some(0), SearchDirection::Backward) => count - 1,
            (Some(r), SearchDirection::Backward) => r - 1,
        };
        current = Some(row);
        if let Some(rx) = doc.line(row).and_then(|l| l.find_rendered(query)) {
            return Some((row, doc.rx_to_cx(row, rx)));
        }
    }
    None
}

/// Search state carried across prompt keys.
#[derive(Debug, Clone)]
pub struct SearchSession {
    saved_cursor: Cursor,
    saved_viewport: Viewport,
    last_match: Option<usize>,
    direction: SearchDirection,
}

impl SearchSession {
    /// Remember where the cursor and viewport were when the search began.
    pub fn begin(model: &EditorModel) -> Self {
        Self {
            saved_cursor: model.cursor(),
            saved_viewport: model.view().viewport,
            last_match: None,
            direction: SearchDirection::Forward,
        }
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Put cursor and viewport back where the search began.
    pub fn restore(&self, model: &mut EditorModel) {
        let view = model.view_mut();
        view.cursor = self.saved_cursor;
        view.viewport.row_offset = self.saved_viewport.row_offset;
        view.viewport.col_offset = self.saved_viewport.col_offset;
        model.clamp_cursor();
    }

    /// Advance the search for `query`; moves the cursor on a hit.
    pub fn step(&mut self, model: &mut EditorModel, query: &str) -> bool {
        if self.last_match.is_none() {
            self.direction = SearchDirection::Forward;
        }
        let hit = find_next(model, query.as_bytes(), self.last_match, self.direction);
        let Some((row, col)) = hit else {
            tracing::trace!(target: "actions.search", len = query.len(), "no_match");
            return false;
        };
        self.last_match = Some(row);
        let line_count = model.state().document.line_count();
        let view = model.view_mut();
        view.cursor = Cursor::new(row, col);
        view.viewport.row_offset = line_count;
        tracing::trace!(target: "actions.search", row, col, "match");
        true
    }

    fn reset(&mut self) {
        self.last_match = None;
        self.direction = SearchDirection::Forward;
    }
}

impl PromptObserver for SearchSession {
    fn on_key(&mut self, model: &mut EditorModel, text: &str, key: Key) {
        match key {
            Key::Enter | Key::Escape => {
                self.reset();
                return;
            }
            Key::Arrow(Direction::Right | Direction::Down) => {
                self.direction = SearchDirection::Forward
            }
            Key::Arrow(Direction::Left | Direction::Up) => {
                self.direction = SearchDirection::Backward
            }
            _ => self.last_match = None,
        }
        self.step(model, text);
    }
}

/// Interactive find. Cancelling restores the starting cursor and viewport;
/// confirming leaves the cursor on the last match.
pub fn find<K, H>(model: &mut EditorModel, keys: &mut K, host: &mut H) -> Result<(), PromptError>
where
    K: KeySource + ?Sized,
    H: PromptHost + ?Sized,
{
    let mut session = SearchSession::begin(model);
    let query = run_prompt(model, FIND_PROMPT, keys, host, &mut session)?;
    if query.is_none() {
        session.restore(model);
        tracing::debug!(target: "actions.search", "search_cancelled");
    }
    Ok(())
}
