//! Logical key events shared by the decoder, the controllers and the binary.
//!
//! A `Key` is terminal independent: the input decoder folds raw bytes and
//! escape sequences into one of these variants, and every consumer matches on
//! them exhaustively instead of comparing integer codes.

/// Arrow key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Decoded, terminal-independent key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any byte that is not a control code (including bytes >= 0x80 and tab).
    Char(u8),
    /// Raw control byte (0x00..=0x1F) without a dedicated variant.
    Control(u8),
    Arrow(Direction),
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Backspace,
    Escape,
    Enter,
}

/// Byte produced by pressing Ctrl together with `letter`.
#[inline]
pub const fn ctrl(letter: u8) -> u8 {
    letter & 0x1f
}

impl Key {
    /// Ctrl chord for an ASCII letter, e.g. `Key::ctrl(b'q')`.
    pub const fn ctrl(letter: u8) -> Self {
        Key::Control(ctrl(letter))
    }

    /// Classify a single raw byte that is not part of an escape sequence.
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0x1b => Key::Escape,
            b'\r' => Key::Enter,
            0x7f | 0x08 => Key::Backspace,
            b'\t' => Key::Char(b'\t'),
            0x00..=0x1f => Key::Control(byte),
            _ => Key::Char(byte),
        }
    }

    /// Printable 7-bit ASCII (what single-line prompts accept).
    pub const fn is_printable_ascii(&self) -> bool {
        matches!(self, Key::Char(b) if *b >= 0x20 && *b < 0x7f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_masks_letter() {
        assert_eq!(ctrl(b'q'), 0x11);
        assert_eq!(Key::ctrl(b's'), Key::Control(0x13));
    }

    #[test]
    fn from_byte_classifies() {
        assert_eq!(Key::from_byte(b'a'), Key::Char(b'a'));
        assert_eq!(Key::from_byte(b'\r'), Key::Enter);
        assert_eq!(Key::from_byte(127), Key::Backspace);
        assert_eq!(Key::from_byte(ctrl(b'h')), Key::Backspace);
        assert_eq!(Key::from_byte(b'\t'), Key::Char(b'\t'));
        assert_eq!(Key::from_byte(ctrl(b'f')), Key::ctrl(b'f'));
        assert_eq!(Key::from_byte(0xc3), Key::Char(0xc3));
        assert_eq!(Key::from_byte(0x1b), Key::Escape);
    }

    #[test]
    fn printable_ascii_excludes_tab_and_high_bytes() {
        assert!(Key::Char(b'x').is_printable_ascii());
        assert!(Key::Char(b' ').is_printable_ascii());
        assert!(!Key::Char(b'\t').is_printable_ascii());
        assert!(!Key::Char(0xe9).is_printable_ascii());
        assert!(!Key::Enter.is_printable_ascii());
    }
}
