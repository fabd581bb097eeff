//! Configuration loading and parsing.
//!
//! Reads `kiln.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [editor]
//! tab_stop = 4
//! quit_times = 3
//! [status]
//! message_ttl_secs = 5
//! [keys]
//! quit = "e"
//! save = "w"
//! find = "f"
//! ```
//!
//! Every field is optional. Out-of-range numbers are clamped by
//! [`Config::resolve`]; unusable key letters fall back to the defaults.
//! Unknown fields are ignored. A missing or unparsable file yields defaults.

use anyhow::Result;
use core_events::{Command, KeyBindings};
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const FILE_NAME: &str = "kiln.toml";
pub const MAX_TAB_STOP: usize = 16;

#[derive(Debug, Deserialize, Clone)]
pub struct EditorSection {
    #[serde(default = "EditorSection::default_tab_stop")]
    pub tab_stop: usize,
    #[serde(default = "EditorSection::default_quit_times")]
    pub quit_times: u32,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
            quit_times: Self::default_quit_times(),
        }
    }
}

impl EditorSection {
    const fn default_tab_stop() -> usize {
        4
    }
    const fn default_quit_times() -> u32 {
        3
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatusSection {
    #[serde(default = "StatusSection::default_ttl")]
    pub message_ttl_secs: u64,
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            message_ttl_secs: Self::default_ttl(),
        }
    }
}

impl StatusSection {
    const fn default_ttl() -> u64 {
        5
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct KeysSection {
    pub quit: Option<char>,
    pub save: Option<char>,
    pub find: Option<char>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorSection,
    #[serde(default)]
    pub status: StatusSection,
    #[serde(default)]
    pub keys: KeysSection,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile, // parsed (or default) data
}

/// Validated values ready for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub tab_stop: usize,
    pub quit_times: u32,
    pub message_ttl: Duration,
    pub bindings: KeyBindings,
}

/// Local working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("kiln").join(FILE_NAME);
    }
    PathBuf::from(FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config { file })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamp numbers into range and validate key letters.
    pub fn resolve(&self) -> Settings {
        let editor = &self.file.editor;
        let tab_stop = editor.tab_stop.clamp(1, MAX_TAB_STOP);
        if tab_stop != editor.tab_stop {
            info!(target: "config", raw = editor.tab_stop, clamped = tab_stop, "tab_stop_clamped");
        }
        let quit_times = editor.quit_times.max(1);
        if quit_times != editor.quit_times {
            info!(
                target: "config",
                raw = editor.quit_times,
                clamped = quit_times,
                "quit_times_clamped"
            );
        }

        let defaults = KeyBindings::default();
        let keys = &self.file.keys;
        let letter = |c: Option<char>, cmd| c.unwrap_or(defaults.letter(cmd));
        let bindings = KeyBindings::new(
            letter(keys.quit, Command::Quit),
            letter(keys.save, Command::Save),
            letter(keys.find, Command::Find),
        )
        .unwrap_or_else(|| {
            warn!(target: "config", "key_bindings_invalid_using_defaults");
            defaults
        });

        Settings {
            tab_stop,
            quit_times,
            message_ttl: Duration::from_secs(self.file.status.message_ttl_secs),
            bindings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{Key, ctrl};
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn load_str(content: &str) -> Config {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), content).unwrap();
        load_from(Some(tmp.path().to_path_buf())).unwrap()
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        let s = cfg.resolve();
        assert_eq!(s.tab_stop, 4);
        assert_eq!(s.quit_times, 3);
        assert_eq!(s.message_ttl, Duration::from_secs(5));
        assert_eq!(s.bindings, KeyBindings::default());
    }

    #[test]
    fn parses_all_sections() {
        let cfg = load_str(concat!(
            "[editor]\ntab_stop = 8\nquit_times = 2\n",
            "[status]\nmessage_ttl_secs = 9\n",
            "[keys]\nquit = \"q\"\nsave = \"s\"\nfind = \"g\"\n",
        ));
        let s = cfg.resolve();
        assert_eq!(s.tab_stop, 8);
        assert_eq!(s.quit_times, 2);
        assert_eq!(s.message_ttl, Duration::from_secs(9));
        assert_eq!(s.bindings.letter(Command::Quit), 'Q');
        assert_eq!(s.bindings.resolve_byte(ctrl(b'g')), Key::Find);
    }

    #[test]
    fn partial_keys_keep_other_defaults() {
        let s = load_str("[keys]\nfind = \"g\"\n").resolve();
        assert_eq!(s.bindings.letter(Command::Quit), 'E');
        assert_eq!(s.bindings.letter(Command::Find), 'G');
    }

    #[test]
    fn invalid_keys_fall_back_to_defaults() {
        let s = load_str("[keys]\nquit = \"w\"\n").resolve();
        assert_eq!(s.bindings, KeyBindings::default());
        let s = load_str("[keys]\nsave = \"m\"\n").resolve();
        assert_eq!(s.bindings, KeyBindings::default());
    }

    #[test]
    fn parse_error_yields_defaults() {
        let s = load_str("[editor\ntab_stop = 8\nquit_times = ").resolve();
        assert_eq!((s.tab_stop, s.quit_times), (4, 3));
    }

    #[test]
    fn clamps_out_of_range_numbers() {
        let s = load_str("[editor]\ntab_stop = 0\nquit_times = 0\n").resolve();
        assert_eq!((s.tab_stop, s.quit_times), (1, 1));
        let s = load_str("[editor]\ntab_stop = 99\n").resolve();
        assert_eq!(s.tab_stop, MAX_TAB_STOP);
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let cfg = load_str("[editor]\ntab_stop = 40\n");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let settings = with_default(subscriber, || cfg.resolve());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("INFO config:"));
        assert!(log_output.contains("tab_stop_clamped"));
        assert_eq!(settings.tab_stop, MAX_TAB_STOP);
    }
}
