//! Byte cursor over one line and the character classes of the BNF grammar.

use text_size::{TextRange, TextSize};

use crate::error::{ErrorKind, Expected, PositionedError};

/// ASCII letter.
#[must_use]
pub fn is_letter(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

/// ASCII decimal digit.
#[must_use]
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// `-`, allowed inside rule names.
#[must_use]
pub fn is_hyphen(byte: u8) -> bool {
    byte == b'-'
}

/// Single or double quote.
#[must_use]
pub fn is_quote(byte: u8) -> bool {
    matches!(byte, b'"' | b'\'')
}

/// `<` or `>`.
#[must_use]
pub fn is_angle_bracket(byte: u8) -> bool {
    matches!(byte, b'<' | b'>')
}

/// `|`
#[must_use]
pub fn is_vertical_bar(byte: u8) -> bool {
    byte == b'|'
}

/// Only the space byte counts as whitespace in BNF lines.
#[must_use]
pub fn is_whitespace(byte: u8) -> bool {
    byte == b' '
}

/// Line terminator bytes.
#[must_use]
pub fn is_eol(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}

/// Characters allowed after the first letter of a rule name.
#[must_use]
pub fn is_rule_char(byte: u8) -> bool {
    is_letter(byte) || is_digit(byte) || is_hyphen(byte)
}

/// Converts a byte index into a [`TextSize`], saturating for absurdly long lines.
#[must_use]
pub fn text_size(pos: usize) -> TextSize {
    TextSize::try_from(pos).unwrap_or(TextSize::from(u32::MAX))
}

/// A position in a single line buffer.
///
/// Cloning a cursor is the checkpoint mechanism: productions that need to
/// backtrack save [`Cursor::pos`] and later call [`Cursor::reset`].
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// The whole line.
    #[must_use]
    pub fn buf(&self) -> &'a [u8] {
        self.buf
    }

    /// Current byte index.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Current offset as a [`TextSize`].
    #[must_use]
    pub fn offset(&self) -> TextSize {
        text_size(self.pos)
    }

    /// Restores a position saved with [`Cursor::pos`].
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.buf.len());
    }

    /// `true` once every byte has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// The byte under the cursor.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// `true` if the unconsumed input starts with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.buf
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(prefix))
    }

    /// Moves one byte forward; a no-op at the end of the line.
    pub fn bump(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    /// Moves `n` bytes forward, stopping at the end of the line.
    pub fn bump_n(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.buf.len());
    }

    /// Consumes bytes while `pred` holds and returns how many were consumed.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Consumes `ws := (' ')*`.
    pub fn skip_whitespace(&mut self) -> usize {
        self.eat_while(is_whitespace)
    }

    /// Consumes one byte of the given class or reports why it could not.
    pub fn expect_class(
        &mut self,
        pred: impl Fn(u8) -> bool,
        expected: Expected,
    ) -> Result<u8, PositionedError> {
        match self.peek() {
            Some(byte) if pred(byte) => {
                self.pos += 1;
                Ok(byte)
            }
            Some(byte) => Err(self.error(ErrorKind::UnexpectedByte(byte), expected)),
            None => Err(self.error(ErrorKind::UnexpectedEndOfInput, expected)),
        }
    }

    /// Consumes exactly `byte`.
    pub fn expect_byte(&mut self, byte: u8, expected: Expected) -> Result<u8, PositionedError> {
        self.expect_class(|b| b == byte, expected)
    }

    /// An error at the current position.
    #[must_use]
    pub fn error(&self, kind: ErrorKind, expected: Expected) -> PositionedError {
        PositionedError::new(kind, self.offset(), expected)
    }

    /// The range from `start` to the current position.
    #[must_use]
    pub fn range_from(&self, start: usize) -> TextRange {
        TextRange::new(text_size(start), self.offset())
    }

    /// The bytes from `start` to the current position.
    #[must_use]
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        self.buf.get(start..self.pos).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_classes() {
        assert!(is_letter(b'a') && is_letter(b'Z'));
        assert!(!is_letter(b'1') && !is_letter(b'-'));
        assert!(is_rule_char(b'9') && is_rule_char(b'-'));
        assert!(!is_rule_char(b'_'));
        assert!(is_quote(b'"') && is_quote(b'\''));
        assert!(is_angle_bracket(b'<') && is_angle_bracket(b'>'));
        assert!(is_whitespace(b' ') && !is_whitespace(b'\t'));
        assert!(is_eol(b'\n') && is_eol(b'\r'));
        assert!(is_vertical_bar(b'|'));
    }

    #[test]
    fn test_expect_reports_offending_offset() {
        let mut cursor = Cursor::new(b"ab");
        assert_eq!(cursor.expect_byte(b'a', Expected::Atom), Ok(b'a'));
        let err = cursor.expect_byte(b'x', Expected::Atom).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedByte(b'b'));
        assert_eq!(err.offset, TextSize::from(1));

        cursor.bump();
        let err = cursor.expect_byte(b'x', Expected::Atom).unwrap_err();
        assert!(err.is_end_of_input());
        assert_eq!(err.offset, TextSize::from(2));
    }

    #[test]
    fn test_reset_and_bump_stay_in_bounds() {
        let mut cursor = Cursor::new(b"abc");
        cursor.bump_n(10);
        assert!(cursor.at_end());
        cursor.bump();
        assert_eq!(cursor.pos(), 3);
        cursor.reset(1);
        assert_eq!(cursor.peek(), Some(b'b'));
        cursor.reset(99);
        assert_eq!(cursor.pos(), 3);
        assert!(cursor.starts_with(b""));
    }
}
