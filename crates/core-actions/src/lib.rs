//! Editing controller: key bindings, cursor motion, text edits, the
//! single-line prompt, incremental search and file load/save.
//!
//! Flow: a decoded `Key` is translated into an [`Action`]. Motions and edits
//! go through [`dispatch`], which mutates the model synchronously. Actions
//! that need a prompt or the file system ([`CommandKind`]) go through
//! [`run_command`], which can drive its own nested key loop through a
//! [`KeySource`](core_input::KeySource) and redraw through a [`PromptHost`].
//! Quitting is left to the caller, which owns the unsaved-changes gate.

pub mod command;
pub mod dispatcher;
pub mod io_ops;
mod key_translator;
pub mod prompt;
pub mod search;

pub use command::{CommandOutcome, run_command};
pub use dispatcher::{DispatchResult, dispatch};
pub use io_ops::FileError;
pub use key_translator::translate_key;
pub use prompt::{
    NoopObserver, Prompt, PromptError, PromptHost, PromptObserver, PromptStep, run_prompt,
};
pub use search::{SearchDirection, SearchSession};

/// Cursor movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

/// Text mutations at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(u8),
    InsertNewline,
    /// Backspace: delete the byte before the cursor or merge with the line above.
    DeleteBackward,
    /// Delete key: the byte under the cursor or merge the next line in.
    DeleteForward,
}

/// Actions that prompt the user or touch the file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Save,
    Find,
    GotoLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Command(CommandKind),
    ToggleLineNumbers,
    Quit,
    /// Key with no binding (Escape, unbound control chords).
    Ignore,
}
