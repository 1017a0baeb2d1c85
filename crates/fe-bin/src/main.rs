//! Ferrum entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::io_ops::load_file;
use core_actions::{Action, PromptError, PromptHost, dispatch, run_command, translate_key};
use core_config::{Config, ConfigContext};
use core_input::{Decoder, InputError, KeySource};
use core_model::EditorModel;
use core_render::RenderEngine;
use core_state::EditorState;
use core_terminal::{
    CrosstermBackend, FrameSink, READ_TIMEOUT, StdinBytes, StdoutSink, TerminalBackend,
};
use core_text::Document;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Instant;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const HELP_MESSAGE: &str =
    "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find | Ctrl-G = goto | Ctrl-L = numbers";
const LOG_FILE: &str = "ferrum.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "ferrum", version, about = "Ferrum text editor")]
struct Args {
    /// File to open. Without one the editor starts on an empty, unnamed document.
    path: Option<PathBuf>,
    /// Columns between tab stops (clamped to 1..=16).
    #[arg(long = "tab-stop", default_value_t = core_text::TAB_STOP)]
    tab_stop: usize,
    /// Show the line-number gutter at startup (toggle with Ctrl-L).
    #[arg(long = "line-numbers")]
    line_numbers: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config {
            tab_stop: self.tab_stop,
            line_numbers: self.line_numbers,
            ..Config::default()
        };
        config.sanitize();
        config
    }
}

/// Unsaved-changes confirmation for Ctrl-Q.
#[derive(Debug)]
struct QuitGate {
    times: u32,
    remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuitDecision {
    Quit,
    /// Refused; this many further presses are still required.
    Confirm(u32),
}

impl QuitGate {
    fn new(times: u32) -> Self {
        Self {
            times,
            remaining: times,
        }
    }

    fn press(&mut self, dirty: bool) -> QuitDecision {
        if dirty && self.remaining > 0 {
            let n = self.remaining;
            self.remaining -= 1;
            QuitDecision::Confirm(n)
        } else {
            QuitDecision::Quit
        }
    }

    /// Any key other than Ctrl-Q starts the count over.
    fn reset(&mut self) {
        self.remaining = self.times;
    }
}

fn quit_warning(n: u32) -> String {
    format!("WARNING!!! File has unsaved changes. Press Ctrl-Q {n} more times to quit.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    Quit,
    InputClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Quit => "quit",
            ShutdownReason::InputClosed => "input_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(text rows, columns)` left for the document in a window of `size`.
fn text_area(size: (u16, u16)) -> (usize, usize) {
    let ctx = ConfigContext::for_window(size.0, size.1);
    (ctx.text_rows() as usize, ctx.text_columns() as usize)
}

/// Redraws the screen: re-reads the window size, scrolls and writes one frame.
struct Screen<'a, B: TerminalBackend, S: FrameSink> {
    backend: &'a B,
    engine: RenderEngine,
    sink: S,
    size: (u16, u16),
}

impl<'a, B: TerminalBackend, S: FrameSink> Screen<'a, B, S> {
    fn new(backend: &'a B, sink: S, size: (u16, u16)) -> Self {
        Self {
            backend,
            engine: RenderEngine::new(env!("CARGO_PKG_VERSION")),
            sink,
            size,
        }
    }

    fn sync_size(&mut self, model: &mut EditorModel) {
        match self.backend.window_size() {
            Ok(size) if size != self.size => {
                self.size = size;
                let (rows, cols) = text_area(size);
                model.resize(rows, cols);
            }
            Ok(_) => {}
            Err(e) => warn!(target: "runtime", error = %e, "window_size_failed"),
        }
    }
}

impl<B: TerminalBackend, S: FrameSink> PromptHost for Screen<'_, B, S> {
    fn refresh(&mut self, model: &mut EditorModel) -> io::Result<()> {
        self.sync_size(model);
        model.scroll();
        let frame = self
            .engine
            .render(model, Instant::now())
            .map_err(io::Error::other)?;
        self.sink.write_frame(&frame)
    }
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    /// Load the document before the terminal is touched so a failure is
    /// reported on a normal screen.
    fn load_state(args: &Args, config: &Config) -> Result<EditorState> {
        let document = match &args.path {
            Some(path) => load_file(path, config.tab_stop)
                .with_context(|| format!("failed to open {}", path.display()))?,
            None => Document::new(config.tab_stop),
        };
        let mut state = EditorState::with_config(document, config);
        state.file_name = args.path.clone();
        Ok(state)
    }
}

fn run_editor<B, S, K>(
    model: &mut EditorModel,
    screen: &mut Screen<'_, B, S>,
    keys: &mut K,
    config: &Config,
) -> Result<ShutdownReason>
where
    B: TerminalBackend,
    S: FrameSink,
    K: KeySource,
{
    let mut gate = QuitGate::new(config.quit_times);
    let mut redraw = true;
    loop {
        if redraw {
            screen.refresh(model)?;
        }
        let key = match keys.next_key() {
            Ok(Some(key)) => key,
            Ok(None) => {
                redraw = model.state_mut().tick_ephemeral();
                continue;
            }
            Err(InputError::Closed) => return Ok(ShutdownReason::InputClosed),
            Err(e) => return Err(e.into()),
        };
        redraw = true;
        match translate_key(key) {
            Action::Quit => match gate.press(model.state().dirty()) {
                QuitDecision::Quit => return Ok(ShutdownReason::Quit),
                QuitDecision::Confirm(n) => {
                    model.state_mut().set_status(quit_warning(n));
                    continue;
                }
            },
            Action::Command(kind) => {
                let outcome = match run_command(kind, model, keys, screen) {
                    Ok(outcome) => outcome,
                    Err(PromptError::Input(InputError::Closed)) => {
                        return Ok(ShutdownReason::InputClosed);
                    }
                    Err(e) => return Err(e.into()),
                };
                tracing::debug!(target: "runtime", ?kind, ?outcome, "command_done");
            }
            action => {
                dispatch(action, model);
            }
        }
        gate.reset();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let config = args.config();
    let mut state = AppStartup::load_state(&args, &config)?;
    state.set_status(HELP_MESSAGE);
    info!(
        target: "runtime.startup",
        path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        lines = state.document.line_count(),
        tab_stop = config.tab_stop,
        "bootstrap_complete"
    );

    let mut backend = CrosstermBackend::new();
    let size = backend.window_size()?;
    backend.set_title(&format!("ferrum - {}", state.display_name()))?;
    let guard = backend.enter_guard()?;
    let mut keys = Decoder::new(StdinBytes::spawn(READ_TIMEOUT)?);

    let (rows, cols) = text_area(size);
    let mut model = EditorModel::new(state, rows, cols);
    let mut screen = Screen::new(guard.backend(), StdoutSink, size);
    let reason = run_editor(&mut model, &mut screen, &mut keys, &config);
    drop(screen);
    drop(guard);

    match &reason {
        Ok(r) => info!(target: "runtime", reason = %r, "shutdown"),
        Err(e) => tracing::error!(target: "runtime", error = %e, "shutdown_error"),
    }
    reason.map(|_| ())
}
