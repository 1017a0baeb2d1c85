use crate::{ByteSource, InputError, KeySource, ReadStatus};
use core_events::{Direction, Key};
use tracing::{trace, warn};

const ESC: u8 = 0x1b;

/// Byte-stream to [`Key`] state machine.
pub struct Decoder<S> {
    source: S,
}

impl<S: ByteSource> Decoder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Follow-up byte of an escape sequence. Timeouts and read failures both
    /// end the sequence; the caller falls back to a bare Escape.
    fn sequence_byte(&mut self) -> Option<u8> {
        match self.source.read_byte() {
            Ok(ReadStatus::Byte(b)) => Some(b),
            Ok(ReadStatus::Timeout) => None,
            Err(err) => {
                warn!(target: "input", %err, "escape_sequence_read_failed");
                None
            }
        }
    }

    fn decode_escape(&mut self) -> Key {
        let Some(first) = self.sequence_byte() else {
            return Key::Escape;
        };
        let Some(second) = self.sequence_byte() else {
            return Key::Escape;
        };
        let key = match (first, second) {
            (b'[', digit @ b'0'..=b'9') => match self.sequence_byte() {
                Some(b'~') => tilde_key(digit),
                _ => None,
            },
            (b'[', b'A') => Some(Key::Arrow(Direction::Up)),
            (b'[', b'B') => Some(Key::Arrow(Direction::Down)),
            (b'[', b'C') => Some(Key::Arrow(Direction::Right)),
            (b'[', b'D') => Some(Key::Arrow(Direction::Left)),
            (b'[' | b'O', b'H') => Some(Key::Home),
            (b'[' | b'O', b'F') => Some(Key::End),
            _ => None,
        };
        key.unwrap_or_else(|| {
            trace!(target: "input", first, second, "unrecognized_escape_sequence");
            Key::Escape
        })
    }
}

fn tilde_key(digit: u8) -> Option<Key> {
    match digit {
        b'1' | b'7' => Some(Key::Home),
        b'3' => Some(Key::Delete),
        b'4' | b'8' => Some(Key::End),
        b'5' => Some(Key::PageUp),
        b'6' => Some(Key::PageDown),
        _ => None,
    }
}

impl<S: ByteSource> KeySource for Decoder<S> {
    fn next_key(&mut self) -> Result<Option<Key>, InputError> {
        let byte = match self.source.read_byte()? {
            ReadStatus::Byte(b) => b,
            ReadStatus::Timeout => return Ok(None),
        };
        let key = if byte == ESC {
            self.decode_escape()
        } else {
            Key::from_byte(byte)
        };
        trace!(target: "input", ?key, "key_decoded");
        Ok(Some(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted source: `None` entries stand for a timed out read.
    struct Script(VecDeque<Option<u8>>);

    impl Script {
        fn bytes(bytes: &[u8]) -> Self {
            Self(bytes.iter().copied().map(Some).collect())
        }
        fn with_gaps(items: &[Option<u8>]) -> Self {
            Self(items.iter().copied().collect())
        }
    }

    impl ByteSource for Script {
        fn read_byte(&mut self) -> Result<ReadStatus, InputError> {
            Ok(match self.0.pop_front().flatten() {
                Some(b) => ReadStatus::Byte(b),
                None => ReadStatus::Timeout,
            })
        }
    }

    struct Broken;

    impl ByteSource for Broken {
        fn read_byte(&mut self) -> Result<ReadStatus, InputError> {
            Err(InputError::Read(std::io::Error::other("gone")))
        }
    }

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let mut decoder = Decoder::new(Script::bytes(bytes));
        let mut out = Vec::new();
        while let Some(key) = decoder.next_key().unwrap() {
            out.push(key);
        }
        out
    }

    #[test]
    fn plain_bytes_pass_through() {
        assert_eq!(
            decode_all(b"a\t\r\x7f"),
            vec![Key::Char(b'a'), Key::Char(b'\t'), Key::Enter, Key::Backspace]
        );
    }

    #[test]
    fn control_bytes_keep_their_value() {
        assert_eq!(decode_all(&[0x11]), vec![Key::ctrl(b'q')]);
    }

    #[test]
    fn csi_arrows() {
        assert_eq!(
            decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                Key::Arrow(Direction::Up),
                Key::Arrow(Direction::Down),
                Key::Arrow(Direction::Right),
                Key::Arrow(Direction::Left),
            ]
        );
    }

    #[test]
    fn home_and_end_variants() {
        assert_eq!(
            decode_all(b"\x1b[H\x1bOH\x1b[1~\x1b[7~"),
            vec![Key::Home; 4]
        );
        assert_eq!(
            decode_all(b"\x1b[F\x1bOF\x1b[4~\x1b[8~"),
            vec![Key::End; 4]
        );
    }

    #[test]
    fn tilde_sequences() {
        assert_eq!(
            decode_all(b"\x1b[3~\x1b[5~\x1b[6~"),
            vec![Key::Delete, Key::PageUp, Key::PageDown]
        );
    }

    #[test]
    fn lone_escape_when_sequence_times_out() {
        let mut decoder = Decoder::new(Script::with_gaps(&[Some(0x1b), None, Some(b'x')]));
        assert_eq!(decoder.next_key().unwrap(), Some(Key::Escape));
        assert_eq!(decoder.next_key().unwrap(), Some(Key::Char(b'x')));
    }

    #[test]
    fn escape_with_one_follow_byte_then_timeout() {
        let mut decoder = Decoder::new(Script::with_gaps(&[Some(0x1b), Some(b'['), None]));
        assert_eq!(decoder.next_key().unwrap(), Some(Key::Escape));
        assert_eq!(decoder.next_key().unwrap(), None);
    }

    #[test]
    fn tilde_sequence_missing_terminator() {
        assert_eq!(decode_all(b"\x1b[5x"), vec![Key::Escape]);
        let bytes = [Some(0x1b), Some(b'['), Some(b'3'), None];
        let mut decoder = Decoder::new(Script::with_gaps(&bytes));
        assert_eq!(decoder.next_key().unwrap(), Some(Key::Escape));
    }

    #[test]
    fn unknown_sequences_resolve_to_escape() {
        assert_eq!(decode_all(b"\x1b[Z"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1bOP"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1b[2~"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1bxy"), vec![Key::Escape]);
    }

    #[test]
    fn timeout_on_first_byte_yields_none() {
        let mut decoder = Decoder::new(Script::with_gaps(&[None, Some(b'q')]));
        assert_eq!(decoder.next_key().unwrap(), None);
        assert_eq!(decoder.next_key().unwrap(), Some(Key::Char(b'q')));
    }

    #[test]
    fn read_error_on_first_byte_propagates() {
        let mut decoder = Decoder::new(Broken);
        assert!(matches!(decoder.next_key(), Err(InputError::Read(_))));
    }
}
