//! Keyboard input: two interchangeable readers producing logical [`Key`]s.
//!
//! * [`CrosstermReader`] leans on crossterm's event parser (default).
//! * [`RawReader`] decodes escape sequences itself from a byte stream (see
//!   [`decoder`]).
//!
//! Both are blocking; the editing loop waits for the next event between
//! frames. The raw path reads stdin on a helper thread; see [`ChannelSource`]
//! for the escape lookahead timeout.

pub mod decoder;

pub use decoder::{ByteSource, ChannelSource, DEFAULT_ESCAPE_TIMEOUT, decode_key};

use anyhow::Result;
use core_events::{Key, KeyBindings, ctrl};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use tracing::trace;

/// One unit of input delivered to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize { cols: u16, rows: u16 },
    /// The input stream ended; no further events will arrive.
    Closed,
}

/// Blocking source of [`InputEvent`]s.
pub trait KeyReader {
    fn read_event(&mut self) -> Result<InputEvent>;
}

/// Reader backed by `crossterm::event::read`.
pub struct CrosstermReader {
    bindings: KeyBindings,
    pending: VecDeque<Key>,
}

impl CrosstermReader {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pending: VecDeque::new(),
        }
    }
}

impl KeyReader for CrosstermReader {
    fn read_event(&mut self) -> Result<InputEvent> {
        loop {
            if let Some(key) = self.pending.pop_front() {
                return Ok(InputEvent::Key(key));
            }
            match event::read()? {
                CEvent::Key(k) => self.pending.extend(map_key_event(&k, &self.bindings)),
                CEvent::Resize(cols, rows) => return Ok(InputEvent::Resize { cols, rows }),
                other => trace!(target: "input", ?other, "event_ignored"),
            }
        }
    }
}

/// Reader decoding raw bytes with [`decode_key`].
pub struct RawReader<S> {
    source: S,
    bindings: KeyBindings,
}

impl<S: ByteSource> RawReader<S> {
    pub fn new(source: S, bindings: KeyBindings) -> Self {
        Self { source, bindings }
    }
}

impl<S: ByteSource> KeyReader for RawReader<S> {
    fn read_event(&mut self) -> Result<InputEvent> {
        Ok(decode_key(&mut self.source, &self.bindings).map_or(InputEvent::Closed, InputEvent::Key))
    }
}

/// Translate one crossterm key event into logical keys. A non-ASCII
/// character becomes one `Key::Byte` per UTF-8 byte; releases are dropped.
pub fn map_key_event(ev: &KeyEvent, bindings: &KeyBindings) -> Vec<Key> {
    if ev.kind == KeyEventKind::Release {
        return Vec::new();
    }
    let key = match ev.code {
        KeyCode::Char(c) if c.is_ascii() => {
            let b = c as u8;
            if ev.modifiers.contains(KeyModifiers::CONTROL) {
                bindings.resolve_byte(ctrl(b))
            } else {
                bindings.resolve_byte(b)
            }
        }
        KeyCode::Char(c) => {
            let mut utf8 = [0u8; 4];
            return c
                .encode_utf8(&mut utf8)
                .bytes()
                .map(Key::Byte)
                .collect();
        }
        KeyCode::Tab => Key::Byte(b'\t'),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        other => {
            trace!(target: "input", ?other, "key_unmapped");
            return Vec::new();
        }
    };
    vec![key]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, mods: KeyModifiers) -> Vec<Key> {
        map_key_event(&KeyEvent::new(code, mods), &KeyBindings::default())
    }

    #[test]
    fn ctrl_letters_map_through_bindings() {
        assert_eq!(press(KeyCode::Char('e'), KeyModifiers::CONTROL), vec![Key::Quit]);
        assert_eq!(press(KeyCode::Char('w'), KeyModifiers::CONTROL), vec![Key::Save]);
        assert_eq!(press(KeyCode::Char('f'), KeyModifiers::CONTROL), vec![Key::Find]);
        assert_eq!(press(KeyCode::Char('h'), KeyModifiers::CONTROL), vec![Key::Backspace]);
    }

    #[test]
    fn plain_and_special_keys() {
        assert_eq!(press(KeyCode::Char('e'), KeyModifiers::NONE), vec![Key::Byte(b'e')]);
        assert_eq!(press(KeyCode::Tab, KeyModifiers::NONE), vec![Key::Byte(b'\t')]);
        assert_eq!(press(KeyCode::PageDown, KeyModifiers::NONE), vec![Key::PageDown]);
        assert!(press(KeyCode::F(5), KeyModifiers::NONE).is_empty());
    }

    #[test]
    fn non_ascii_expands_to_utf8_bytes() {
        assert_eq!(
            press(KeyCode::Char('é'), KeyModifiers::NONE),
            vec![Key::Byte(0xC3), Key::Byte(0xA9)]
        );
    }

    #[test]
    fn releases_are_dropped() {
        let mut ev = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        assert!(map_key_event(&ev, &KeyBindings::default()).is_empty());
    }

    #[test]
    fn raw_reader_reports_closed_stream() {
        let src: VecDeque<u8> = b"a\x1b[A".iter().copied().collect();
        let mut r = RawReader::new(src, KeyBindings::default());
        assert_eq!(r.read_event().unwrap(), InputEvent::Key(Key::Byte(b'a')));
        assert_eq!(r.read_event().unwrap(), InputEvent::Key(Key::ArrowUp));
        assert_eq!(r.read_event().unwrap(), InputEvent::Closed);
    }
}
