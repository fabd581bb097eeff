//! Editor state: the single owned aggregate every operation works on.
//!
//! Holds the buffer, cursor, viewport offsets, current file name, the
//! transient status message and the quit confirmation guard. There is no
//! global state; the main loop owns one `EditorState` and lends it out.
//!
//! Cursor coordinates:
//! * `cy` is a line index in `[0, line_count]`; `cy == line_count` is the
//!   append position below the last line.
//! * `cx` is a logical (byte) column in `[0, line_len(cy)]`.
//! * `rx` is the rendered column of `cx`, refreshed by the scroll step before
//!   every frame.

mod quit;

pub use quit::{DEFAULT_QUIT_TIMES, QuitDecision, QuitGuard};

use core_events::KeyBindings;
use core_text::Buffer;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Rows reserved below the text area: status bar and message bar.
pub const CHROME_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub cx: usize,
    pub cy: usize,
    pub rx: usize,
}

/// Visible text area and its scroll offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct View {
    pub row_off: usize,
    pub col_off: usize,
    /// Text rows (terminal height minus [`CHROME_ROWS`]).
    pub rows: usize,
    pub cols: usize,
}

impl View {
    /// View for a terminal of `term_rows` x `term_cols`.
    pub fn for_terminal(term_cols: u16, term_rows: u16) -> Self {
        Self {
            row_off: 0,
            col_off: 0,
            rows: usize::from(term_rows.saturating_sub(CHROME_ROWS)),
            cols: usize::from(term_cols),
        }
    }

    pub fn resize(&mut self, term_cols: u16, term_rows: u16) {
        let next = Self::for_terminal(term_cols, term_rows);
        self.rows = next.rows;
        self.cols = next.cols;
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: Instant,
}

/// Tunables handed in from configuration.
#[derive(Debug, Clone, Copy)]
pub struct StateOptions {
    pub quit_times: u32,
    pub message_ttl: Duration,
    pub bindings: KeyBindings,
}

impl Default for StateOptions {
    fn default() -> Self {
        Self {
            quit_times: DEFAULT_QUIT_TIMES,
            message_ttl: DEFAULT_MESSAGE_TTL,
            bindings: KeyBindings::default(),
        }
    }
}

pub struct EditorState {
    pub buffer: Buffer,
    pub cursor: Cursor,
    pub view: View,
    pub file_name: Option<PathBuf>,
    pub quit_guard: QuitGuard,
    pub bindings: KeyBindings,
    status: Option<StatusMessage>,
    message_ttl: Duration,
}

impl EditorState {
    pub fn new(buffer: Buffer, view: View, options: StateOptions) -> Self {
        Self {
            buffer,
            cursor: Cursor::default(),
            view,
            file_name: None,
            quit_guard: QuitGuard::new(options.quit_times),
            bindings: options.bindings,
            status: None,
            message_ttl: options.message_ttl,
        }
    }

    /// Attach a path and select the syntax profile matching its name.
    pub fn set_file_name(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let name = path.to_string_lossy().into_owned();
        self.buffer.select_syntax(Some(&name));
        self.file_name = Some(path);
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Replace the status message; it expires after the configured TTL.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.set_status_at(text, Instant::now());
    }

    pub fn set_status_at(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if text.is_empty() {
            self.status = None;
            return;
        }
        self.status = Some(StatusMessage {
            text,
            expires_at: now + self.message_ttl,
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// The status message if it has not expired yet.
    pub fn status_text(&self) -> Option<&str> {
        self.status_text_at(Instant::now())
    }

    pub fn status_text_at(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|m| now < m.expires_at)
            .map(|m| m.text.as_str())
    }

    /// Logical length of the cursor line (zero on the append position).
    pub fn current_line_len(&self) -> usize {
        self.buffer.line_len(self.cursor.cy)
    }

    /// Pull `cy` into `[0, line_count]` and `cx` into the line length.
    pub fn clamp_cursor(&mut self) {
        self.cursor.cy = self.cursor.cy.min(self.buffer.line_count());
        self.cursor.cx = self.cursor.cx.min(self.current_line_len());
    }

    /// Rendered column of the cursor, zero on the append position.
    pub fn cursor_rx(&self) -> usize {
        self.buffer.cx_to_rx(self.cursor.cy, self.cursor.cx)
    }
}
