//! Kiln entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{EditorError, PromptIo, dispatch, help_message, io_ops};
use core_config::{Settings, load_from};
use core_events::Key;
use core_input::{
    ChannelSource, CrosstermReader, DEFAULT_ESCAPE_TIMEOUT, InputEvent, KeyReader, RawReader,
};
use core_state::{EditorState, StateOptions, View};
use core_terminal::{CrosstermBackend, TerminalBackend};
use core_text::Buffer;
use std::io::{Stdout, stdin, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "kiln.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "kiln", version, about = "Kiln editor")]
struct Args {
    /// Optional file to open at startup. If omitted an empty buffer is used.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `kiln.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Decode escape sequences from raw stdin bytes instead of crossterm events.
    #[arg(long = "raw-input")]
    pub raw_input: bool,
}

/// Terminal side of the editor: frame output plus the active key reader.
struct Session {
    out: Stdout,
    reader: Box<dyn KeyReader>,
}

impl PromptIo for Session {
    fn refresh(&mut self, state: &mut EditorState) -> Result<()> {
        core_render::refresh(&mut self.out, state)
    }

    fn read_key(&mut self, state: &mut EditorState) -> Result<Option<Key>> {
        loop {
            match self.reader.read_event()? {
                InputEvent::Key(key) => return Ok(Some(key)),
                InputEvent::Resize { cols, rows } => {
                    info!(target: "runtime", cols, rows, "resize");
                    state.view.resize(cols, rows);
                    self.refresh(state)?;
                }
                InputEvent::Closed => return Ok(None),
            }
        }
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
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

fn load_buffer(path: Option<&Path>, settings: &Settings) -> Result<Buffer, EditorError> {
    match path {
        Some(p) => io_ops::open_file(p, settings.tab_stop),
        None => Ok(Buffer::new(settings.tab_stop)),
    }
}

fn make_reader(raw_input: bool, settings: &Settings) -> Result<Box<dyn KeyReader>> {
    if raw_input {
        let source = ChannelSource::spawn(stdin(), DEFAULT_ESCAPE_TIMEOUT)?;
        Ok(Box::new(RawReader::new(source, settings.bindings)))
    } else {
        Ok(Box::new(CrosstermReader::new(settings.bindings)))
    }
}

fn run(state: &mut EditorState, session: &mut Session) -> Result<()> {
    loop {
        session.refresh(state)?;
        let Some(key) = session.read_key(state)? else {
            info!(target: "runtime", "input_closed");
            return Ok(());
        };
        if dispatch(key, state, session)?.quit {
            info!(target: "runtime", "quit");
            return Ok(());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let settings = load_from(args.config.clone())?.resolve();
    // Loaded before entering raw mode.
    let buffer = load_buffer(args.path.as_deref(), &settings)?;

    let mut backend = CrosstermBackend::new();
    let guard = backend.enter_guard().map_err(EditorError::Terminal)?;
    let (cols, rows) = guard.backend().size().map_err(EditorError::Terminal)?;

    let mut state = EditorState::new(
        buffer,
        View::for_terminal(cols, rows),
        StateOptions {
            quit_times: settings.quit_times,
            message_ttl: settings.message_ttl,
            bindings: settings.bindings,
        },
    );
    if let Some(path) = args.path {
        state.set_file_name(path);
    }
    state.set_status(help_message(&settings.bindings));
    info!(
        target: "runtime.startup",
        lines = state.buffer.line_count(),
        cols,
        rows,
        raw_input = args.raw_input,
        "bootstrap_complete"
    );

    let mut session = Session {
        out: stdout(),
        reader: make_reader(args.raw_input, &settings)?,
    };
    let result = run(&mut state, &mut session);
    drop(guard);
    if let Err(e) = &result {
        error!(target: "runtime", error = %e, "fatal");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_accept_path_and_flags() {
        let args =
            Args::try_parse_from(["kiln", "main.c", "--config", "k.toml", "--raw-input"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("main.c")));
        assert_eq!(args.config, Some(PathBuf::from("k.toml")));
        assert!(args.raw_input);
    }

    #[test]
    fn args_default_to_empty_buffer() {
        let args = Args::try_parse_from(["kiln"]).unwrap();
        assert!(args.path.is_none());
        assert!(args.config.is_none());
        assert!(!args.raw_input);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let settings = core_config::Config::default().resolve();
        let dir = std::env::temp_dir().join("kiln-missing-dir-for-test");
        let err = load_buffer(Some(&dir.join("nope.c")), &settings).unwrap_err();
        assert!(matches!(err, EditorError::Open { .. }));
    }

    #[test]
    fn no_path_gives_empty_buffer() {
        let settings = core_config::Config::default().resolve();
        let buffer = load_buffer(None, &settings).unwrap();
        assert_eq!(buffer.line_count(), 0);
        assert_eq!(buffer.tab_stop(), 4);
    }
}
