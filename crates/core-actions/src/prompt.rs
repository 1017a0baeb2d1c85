//! Single-line prompt shown in the message bar.
//!
//! The prompt owns a nested key loop: it publishes its message (the template
//! with `%s` replaced by the typed text) as the status, asks the host to
//! redraw, then waits for the next key. Observers see every key after the
//! prompt has applied it, which is how incremental search follows typing.

use core_events::Key;
use core_input::{InputError, KeySource};
use core_model::EditorModel;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input failed: {0}")]
    Input(#[from] InputError),
    #[error("redraw failed: {0}")]
    Redraw(#[source] io::Error),
}

/// Redraw hook invoked before the prompt blocks on input.
pub trait PromptHost {
    fn refresh(&mut self, model: &mut EditorModel) -> io::Result<()>;
}

impl<H: PromptHost + ?Sized> PromptHost for &mut H {
    fn refresh(&mut self, model: &mut EditorModel) -> io::Result<()> {
        (**self).refresh(model)
    }
}

/// Per-key callback. `text` is the prompt text after `key` was applied.
pub trait PromptObserver {
    fn on_key(&mut self, model: &mut EditorModel, text: &str, key: Key);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PromptObserver for NoopObserver {
    fn on_key(&mut self, _model: &mut EditorModel, _text: &str, _key: Key) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStep {
    Pending,
    Submitted(String),
    Cancelled,
}

/// Prompt line editor.
#[derive(Debug, Clone)]
pub struct Prompt {
    template: String,
    text: String,
}

impl Prompt {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            text: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Template with the first `%s` replaced by the typed text.
    pub fn message(&self) -> String {
        self.template.replacen("%s", &self.text, 1)
    }

    pub fn handle_key(&mut self, key: Key) -> PromptStep {
        match key {
            Key::Backspace | Key::Delete => {
                self.text.pop();
                PromptStep::Pending
            }
            Key::Escape => PromptStep::Cancelled,
            Key::Enter if !self.text.is_empty() => PromptStep::Submitted(self.text.clone()),
            Key::Char(b) if key.is_printable_ascii() => {
                self.text.push(char::from(b));
                PromptStep::Pending
            }
            _ => PromptStep::Pending,
        }
    }
}

/// Run a prompt to completion. `Ok(None)` means the user cancelled.
pub fn run_prompt<K, H, O>(
    model: &mut EditorModel,
    template: &str,
    keys: &mut K,
    host: &mut H,
    observer: &mut O,
) -> Result<Option<String>, PromptError>
where
    K: KeySource + ?Sized,
    H: PromptHost + ?Sized,
    O: PromptObserver + ?Sized,
{
    let mut prompt = Prompt::new(template);
    tracing::debug!(target: "actions.prompt", template, "prompt_open");
    loop {
        model.state_mut().set_status(prompt.message());
        host.refresh(model).map_err(PromptError::Redraw)?;
        let key = loop {
            if let Some(key) = keys.next_key()? {
                break key;
            }
        };
        match prompt.handle_key(key) {
            PromptStep::Pending => observer.on_key(model, prompt.text(), key),
            PromptStep::Cancelled => {
                model.state_mut().set_status("");
                observer.on_key(model, prompt.text(), key);
                tracing::debug!(target: "actions.prompt", "prompt_cancelled");
                return Ok(None);
            }
            PromptStep::Submitted(text) => {
                model.state_mut().set_status("");
                observer.on_key(model, &text, key);
                tracing::debug!(target: "actions.prompt", len = text.len(), "prompt_submitted");
                return Ok(Some(text));
            }
        }
    }
}
