//! Logical key events shared by the input decoders and the command layer.
//!
//! Both input paths (raw byte decoding and crossterm events) resolve to the
//! same [`Key`] values, so everything downstream is independent of how the
//! terminal was read.

use std::fmt;
use tracing::warn;

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any byte without a dedicated meaning, printable or not.
    Byte(u8),
    Enter,
    Escape,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Quit,
    Save,
    Find,
}

impl Key {
    /// Bytes a prompt accepts into its input buffer.
    pub fn printable(self) -> Option<u8> {
        match self {
            Key::Byte(b) if b < 128 && !b.is_ascii_control() => Some(b),
            _ => None,
        }
    }
}

pub const ESC: u8 = 0x1b;
pub const DEL: u8 = 127;

/// Terminal convention for Ctrl+`b`: keep the low five bits.
pub const fn ctrl(b: u8) -> u8 {
    b & 0x1f
}

/// Editor commands that can be bound to a Ctrl+letter chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Save,
    Find,
}

/// Ctrl+letter bindings for the logical commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    quit: u8,
    save: u8,
    find: u8,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: b'e',
            save: b'w',
            find: b'f',
        }
    }
}

/// Letters whose Ctrl chord collides with Tab, Newline, Enter or Backspace.
const RESERVED: &[u8] = b"hijm";

impl KeyBindings {
    /// Build bindings from three distinct ASCII letters. Returns `None` when a
    /// letter is invalid, reserved or repeated.
    pub fn new(quit: char, save: char, find: char) -> Option<Self> {
        let pick = |c: char| {
            let b = u8::try_from(c.to_ascii_lowercase()).ok()?;
            (b.is_ascii_lowercase() && !RESERVED.contains(&b)).then_some(b)
        };
        let (quit, save, find) = (pick(quit)?, pick(save)?, pick(find)?);
        if quit == save || quit == find || save == find {
            warn!(target: "input", "duplicate_key_binding");
            return None;
        }
        Some(Self { quit, save, find })
    }

    pub fn letter(&self, cmd: Command) -> char {
        let b = match cmd {
            Command::Quit => self.quit,
            Command::Save => self.save,
            Command::Find => self.find,
        };
        b.to_ascii_uppercase() as char
    }

    /// Human readable chord, e.g. `Ctrl-E`.
    pub fn chord(&self, cmd: Command) -> Chord {
        Chord(self.letter(cmd))
    }

    /// Resolve a single byte that is not part of an escape sequence.
    pub fn resolve_byte(&self, b: u8) -> Key {
        match b {
            _ if b == ctrl(self.quit) => Key::Quit,
            _ if b == ctrl(self.save) => Key::Save,
            _ if b == ctrl(self.find) => Key::Find,
            b'\r' => Key::Enter,
            ESC => Key::Escape,
            DEL => Key::Backspace,
            _ if b == ctrl(b'h') => Key::Backspace,
            _ => Key::Byte(b),
        }
    }
}

/// Display wrapper for a Ctrl chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord(char);

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ctrl-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_transform() {
        assert_eq!(ctrl(b'q'), 17);
        assert_eq!(ctrl(b'Q'), 17);
        assert_eq!(ctrl(b'h'), 8);
    }

    #[test]
    fn default_bindings_resolve() {
        let k = KeyBindings::default();
        assert_eq!(k.resolve_byte(ctrl(b'e')), Key::Quit);
        assert_eq!(k.resolve_byte(ctrl(b'w')), Key::Save);
        assert_eq!(k.resolve_byte(ctrl(b'f')), Key::Find);
        assert_eq!(k.resolve_byte(127), Key::Backspace);
        assert_eq!(k.resolve_byte(8), Key::Backspace);
        assert_eq!(k.resolve_byte(b'\r'), Key::Enter);
        assert_eq!(k.resolve_byte(b'a'), Key::Byte(b'a'));
        assert_eq!(k.resolve_byte(ctrl(b'l')), Key::Byte(12));
    }

    #[test]
    fn custom_bindings_validate() {
        let k = KeyBindings::new('Q', 's', 'g').expect("valid letters");
        assert_eq!(k.resolve_byte(ctrl(b'q')), Key::Quit);
        assert_eq!(k.resolve_byte(ctrl(b'e')), Key::Byte(5));
        assert_eq!(k.chord(Command::Quit).to_string(), "Ctrl-Q");
        assert!(KeyBindings::new('h', 's', 'f').is_none());
        assert!(KeyBindings::new('q', 'q', 'f').is_none());
        assert!(KeyBindings::new('1', 's', 'f').is_none());
        assert!(KeyBindings::new('é', 's', 'f').is_none());
    }

    #[test]
    fn printable_filter() {
        assert_eq!(Key::Byte(b'x').printable(), Some(b'x'));
        assert_eq!(Key::Byte(b'\t').printable(), None);
        assert_eq!(Key::Byte(200).printable(), None);
        assert_eq!(Key::Enter.printable(), None);
    }
}
