//! Default key bindings.

use crate::{Action, CommandKind, EditKind, MotionKind};
use core_events::{Direction, Key, ctrl};

const CTRL_Q: u8 = ctrl(b'q');
const CTRL_S: u8 = ctrl(b's');
const CTRL_F: u8 = ctrl(b'f');
const CTRL_G: u8 = ctrl(b'g');
const CTRL_L: u8 = ctrl(b'l');

/// Map a logical key onto the action it triggers while editing.
pub fn translate_key(key: Key) -> Action {
    match key {
        Key::Char(b) => Action::Edit(EditKind::InsertChar(b)),
        Key::Enter => Action::Edit(EditKind::InsertNewline),
        Key::Backspace => Action::Edit(EditKind::DeleteBackward),
        Key::Delete => Action::Edit(EditKind::DeleteForward),
        Key::Arrow(Direction::Left) => Action::Motion(MotionKind::Left),
        Key::Arrow(Direction::Right) => Action::Motion(MotionKind::Right),
        Key::Arrow(Direction::Up) => Action::Motion(MotionKind::Up),
        Key::Arrow(Direction::Down) => Action::Motion(MotionKind::Down),
        Key::Home => Action::Motion(MotionKind::LineStart),
        Key::End => Action::Motion(MotionKind::LineEnd),
        Key::PageUp => Action::Motion(MotionKind::PageUp),
        Key::PageDown => Action::Motion(MotionKind::PageDown),
        Key::Control(CTRL_Q) => Action::Quit,
        Key::Control(CTRL_S) => Action::Command(CommandKind::Save),
        Key::Control(CTRL_F) => Action::Command(CommandKind::Find),
        Key::Control(CTRL_G) => Action::Command(CommandKind::GotoLine),
        Key::Control(CTRL_L) => Action::ToggleLineNumbers,
        Key::Control(_) | Key::Escape => Action::Ignore,
    }
}
