//! Prompt-driven commands: save (with save-as), find and go-to-line.
//!
//! Each command reports its result through the status message; the returned
//! [`CommandOutcome`] is for callers and tests that want to branch on it.
//! Only input or redraw failures surface as errors. File system failures are
//! reported and leave the document dirty.

use crate::CommandKind;
use crate::io_ops;
use crate::prompt::{NoopObserver, PromptError, PromptHost, run_prompt};
use crate::search;
use core_input::KeySource;
use core_model::{Cursor, EditorModel};
use std::path::PathBuf;

pub const SAVE_AS_PROMPT: &str = "Save as: %s (ESC to cancel)";
pub const GOTO_PROMPT: &str = "Go to line: %s (ESC to cancel)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Saved { bytes: usize },
    SaveFailed,
    /// Prompt dismissed with Escape.
    Cancelled,
    Searched,
    Moved { row: usize },
    InvalidInput,
}

pub fn run_command<K, H>(
    kind: CommandKind,
    model: &mut EditorModel,
    keys: &mut K,
    host: &mut H,
) -> Result<CommandOutcome, PromptError>
where
    K: KeySource + ?Sized,
    H: PromptHost + ?Sized,
{
    tracing::debug!(target: "actions.dispatch", ?kind, "command");
    match kind {
        CommandKind::Save => save(model, keys, host),
        CommandKind::Find => {
            search::find(model, keys, host)?;
            Ok(CommandOutcome::Searched)
        }
        CommandKind::GotoLine => goto_line(model, keys, host),
    }
}

fn save<K, H>(
    model: &mut EditorModel,
    keys: &mut K,
    host: &mut H,
) -> Result<CommandOutcome, PromptError>
where
    K: KeySource + ?Sized,
    H: PromptHost + ?Sized,
{
    if model.state().file_name.is_none() {
        match run_prompt(model, SAVE_AS_PROMPT, keys, host, &mut NoopObserver)? {
            Some(name) => model.state_mut().file_name = Some(PathBuf::from(name)),
            None => {
                model.state_mut().set_status("Save aborted");
                return Ok(CommandOutcome::Cancelled);
            }
        }
    }
    let state = model.state_mut();
    match io_ops::save(state) {
        Ok(bytes) => {
            state.set_status(format!("{bytes} bytes written to disk"));
            Ok(CommandOutcome::Saved { bytes })
        }
        Err(e) => {
            let reason = e
                .io_error()
                .map(ToString::to_string)
                .unwrap_or_else(|| e.to_string());
            state.set_status(format!("Can't save! I/O error: {reason}"));
            Ok(CommandOutcome::SaveFailed)
        }
    }
}

fn goto_line<K, H>(
    model: &mut EditorModel,
    keys: &mut K,
    host: &mut H,
) -> Result<CommandOutcome, PromptError>
where
    K: KeySource + ?Sized,
    H: PromptHost + ?Sized,
{
    let Some(input) = run_prompt(model, GOTO_PROMPT, keys, host, &mut NoopObserver)? else {
        return Ok(CommandOutcome::Cancelled);
    };
    let Ok(line) = input.trim().parse::<usize>() else {
        model.state_mut().set_status("Invalid line number");
        return Ok(CommandOutcome::InvalidInput);
    };
    let last = model.state().document.line_count().saturating_sub(1);
    let row = line.saturating_sub(1).min(last);
    model.set_cursor(Cursor::new(row, 0));
    Ok(CommandOutcome::Moved { row })
}
