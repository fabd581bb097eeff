//! Raw byte stream → [`Key`] decoding.
//!
//! Recognized escape sequences:
//!
//! | bytes after ESC | key |
//! |---|---|
//! | `[1~` `[7~` `[H` `OH` | Home |
//! | `[4~` `[8~` `[F` `OF` | End |
//! | `[3~` | Delete |
//! | `[5~` / `[6~` | Page-Up / Page-Down |
//! | `[A` `[B` `[C` `[D` | Up / Down / Right / Left |
//!
//! A lookahead byte that never arrives, or any sequence not listed, resolves
//! to a bare [`Key::Escape`]. Decoding failures are never surfaced as errors.

use core_events::{ESC, Key, KeyBindings};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use std::collections::VecDeque;
use std::io::{ErrorKind, Read};
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

/// How long to wait for the rest of an escape sequence before treating the
/// ESC as a key of its own.
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(100);

/// Source of single bytes. `None` means no byte is available (end of stream
/// or read timeout).
pub trait ByteSource {
    fn next_byte(&mut self) -> Option<u8>;

    /// Byte continuing an escape sequence. Sources fed by a live terminal
    /// give up after a short wait; the default waits like [`next_byte`].
    ///
    /// [`next_byte`]: ByteSource::next_byte
    fn lookahead_byte(&mut self) -> Option<u8> {
        self.next_byte()
    }
}

impl ByteSource for VecDeque<u8> {
    fn next_byte(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

/// Bytes delivered over a channel, usually by [`ChannelSource::spawn`].
/// The first byte of a key blocks; escape lookahead waits at most
/// `lookahead` and then reports nothing.
pub struct ChannelSource {
    rx: Receiver<u8>,
    lookahead: Duration,
}

impl ChannelSource {
    pub fn new(rx: Receiver<u8>, lookahead: Duration) -> Self {
        Self { rx, lookahead }
    }

    /// Read `reader` on a background thread and forward every byte. The
    /// channel disconnects on EOF or a read error.
    pub fn spawn<R>(reader: R, lookahead: Duration) -> std::io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = unbounded();
        thread::Builder::new()
            .name("kiln-input".into())
            .spawn(move || pump(reader, tx))?;
        Ok(Self::new(rx, lookahead))
    }
}

impl ByteSource for ChannelSource {
    fn next_byte(&mut self) -> Option<u8> {
        self.rx.recv().ok()
    }

    fn lookahead_byte(&mut self) -> Option<u8> {
        match self.rx.recv_timeout(self.lookahead) {
            Ok(b) => Some(b),
            Err(RecvTimeoutError::Timeout) => {
                trace!(target: "input", "escape_lookahead_timeout");
                None
            }
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

fn pump<R: Read>(mut reader: R, tx: Sender<u8>) {
    let mut buf = [0u8; 64];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                for b in &buf[..n] {
                    // Receiver gone: the editor has shut down.
                    if tx.send(*b).is_err() {
                        return;
                    }
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!(target: "input", ?e, "byte_read_failed");
                break;
            }
        }
    }
    trace!(target: "input", "input_pump_finished");
}

/// Decode the next key. Returns `None` only when the very first read yields
/// nothing.
pub fn decode_key<S: ByteSource + ?Sized>(src: &mut S, bindings: &KeyBindings) -> Option<Key> {
    let b = src.next_byte()?;
    if b != ESC {
        return Some(bindings.resolve_byte(b));
    }
    Some(decode_escape(src))
}

fn decode_escape<S: ByteSource + ?Sized>(src: &mut S) -> Key {
    let Some(first) = src.lookahead_byte() else {
        return Key::Escape;
    };
    let Some(second) = src.lookahead_byte() else {
        return Key::Escape;
    };
    let key = match (first, second) {
        (b'[', digit @ b'0'..=b'9') => match src.lookahead_byte() {
            Some(b'~') => match digit {
                b'1' | b'7' => Some(Key::Home),
                b'3' => Some(Key::Delete),
                b'4' | b'8' => Some(Key::End),
                b'5' => Some(Key::PageUp),
                b'6' => Some(Key::PageDown),
                _ => None,
            },
            _ => None,
        },
        (b'[', b'A') => Some(Key::ArrowUp),
        (b'[', b'B') => Some(Key::ArrowDown),
        (b'[', b'C') => Some(Key::ArrowRight),
        (b'[', b'D') => Some(Key::ArrowLeft),
        (b'[', b'H') | (b'O', b'H') => Some(Key::Home),
        (b'[', b'F') | (b'O', b'F') => Some(Key::End),
        _ => None,
    };
    key.unwrap_or_else(|| {
        trace!(target: "input", first, second, "unrecognized_escape_sequence");
        Key::Escape
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Option<Key> {
        let mut src: VecDeque<u8> = bytes.iter().copied().collect();
        decode_key(&mut src, &KeyBindings::default())
    }

    #[test]
    fn empty_stream_yields_nothing() {
        assert_eq!(decode(b""), None);
    }

    #[test]
    fn plain_bytes_pass_through() {
        assert_eq!(decode(b"a"), Some(Key::Byte(b'a')));
        assert_eq!(decode(b"\t"), Some(Key::Byte(b'\t')));
    }

    #[test]
    fn spawned_source_reads_until_eof() {
        let mut src = ChannelSource::spawn(&b"xy"[..], DEFAULT_ESCAPE_TIMEOUT).unwrap();
        assert_eq!(src.next_byte(), Some(b'x'));
        assert_eq!(src.next_byte(), Some(b'y'));
        assert_eq!(src.next_byte(), None);
    }

    #[test]
    fn lone_escape_times_out_without_eating_later_keys() {
        let (tx, rx) = unbounded();
        let mut src = ChannelSource::new(rx, Duration::from_millis(20));
        let bindings = KeyBindings::default();
        tx.send(ESC).unwrap();
        assert_eq!(decode_key(&mut src, &bindings), Some(Key::Escape));
        tx.send(b'a').unwrap();
        tx.send(b'b').unwrap();
        assert_eq!(decode_key(&mut src, &bindings), Some(Key::Byte(b'a')));
        assert_eq!(decode_key(&mut src, &bindings), Some(Key::Byte(b'b')));
    }

    #[test]
    fn buffered_sequence_decodes_through_channel() {
        let (tx, rx) = unbounded();
        let mut src = ChannelSource::new(rx, Duration::from_millis(20));
        for b in b"\x1b[5~\x1b[" {
            tx.send(*b).unwrap();
        }
        let bindings = KeyBindings::default();
        assert_eq!(decode_key(&mut src, &bindings), Some(Key::PageUp));
        // Truncated sequence: the lookahead gives up after `[`.
        assert_eq!(decode_key(&mut src, &bindings), Some(Key::Escape));
    }
}
