#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{
    Action, CommandOutcome, DispatchResult, PromptError, PromptHost, dispatch, run_command,
    translate_key,
};
use core_events::Key;
use core_input::{InputError, KeySource};
use core_model::EditorModel;
use core_state::EditorState;
use core_text::Document;
use std::collections::VecDeque;
use std::io;

/// Key source replaying a fixed script; `None` entries are read timeouts.
/// Running dry reports `InputError::Closed`.
#[derive(Debug, Default)]
pub struct ScriptedKeys(VecDeque<Option<Key>>);

impl ScriptedKeys {
    pub fn bytes(bytes: &[u8]) -> Self {
        Self(bytes.iter().map(|b| Some(Key::from_byte(*b))).collect())
    }

    pub fn keys(keys: &[Key]) -> Self {
        Self(keys.iter().copied().map(Some).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<Option<Key>, InputError> {
        self.0.pop_front().ok_or(InputError::Closed)
    }
}

/// Host that records how many redraws the prompt requested.
#[derive(Debug, Default)]
pub struct CountingHost {
    pub refreshes: usize,
}

impl PromptHost for CountingHost {
    fn refresh(&mut self, model: &mut EditorModel) -> io::Result<()> {
        model.scroll();
        self.refreshes += 1;
        Ok(())
    }
}

pub fn model(lines: &[&str]) -> EditorModel {
    model_sized(lines, 10, 80)
}

pub fn model_sized(lines: &[&str], rows: usize, cols: usize) -> EditorModel {
    let doc = Document::from_lines(lines.iter().copied(), 2);
    EditorModel::new(EditorState::new(doc), rows, cols)
}

pub fn lines(model: &EditorModel) -> Vec<String> {
    model
        .state()
        .document
        .lines()
        .map(|l| String::from_utf8_lossy(l.as_bytes()).into_owned())
        .collect()
}

pub fn status(model: &EditorModel) -> String {
    model
        .state()
        .ephemeral_status
        .as_ref()
        .map(|m| m.text.clone())
        .unwrap_or_default()
}

/// Translate and dispatch a key the way the main loop does for plain
/// editing keys.
pub fn press(model: &mut EditorModel, key: Key) -> DispatchResult {
    let result = dispatch(translate_key(key), model);
    model.scroll();
    result
}

pub fn type_bytes(model: &mut EditorModel, bytes: &[u8]) {
    for b in bytes {
        press(model, Key::from_byte(*b));
    }
}

/// Run the command bound to `key` with the scripted prompt input.
pub fn command(
    model: &mut EditorModel,
    key: Key,
    input: &mut ScriptedKeys,
) -> Result<CommandOutcome, PromptError> {
    let Action::Command(kind) = translate_key(key) else {
        panic!("{key:?} is not bound to a command");
    };
    let mut host = CountingHost::default();
    let outcome = run_command(kind, model, input, &mut host);
    model.scroll();
    outcome
}
