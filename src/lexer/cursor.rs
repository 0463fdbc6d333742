//! Byte cursor over the source with line/column tracking.
//!
//! Pushback is expressed as marks: `mark()` snapshots offset, line and column, and
//! `reset()` puts all three back. Restoring a mark taken before a newline therefore
//! restores the old line and column exactly.

use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    offset: usize,
    line: u32,
    column: u32,
}

pub struct Cursor<'a> {
    source: &'a [u8],
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Cursor {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Position of the next unread byte.
    pub fn position(&self) -> Position {
        Position::new(self.offset as u32, self.line, self.column)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.peek_nth(0)
    }

    pub fn peek_nth(&self, n: usize) -> Option<u8> {
        self.source.get(self.offset + n).copied()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.offset += 1;

        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(byte)
    }

    /// Consumes `byte` if it is next.
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes bytes while `predicate` holds and returns how many were taken.
    pub fn bump_while<F: Fn(u8) -> bool>(&mut self, predicate: F) -> usize {
        let mut taken = 0;
        while let Some(byte) = self.peek() {
            if !predicate(byte) {
                break;
            }
            self.bump();
            taken += 1;
        }
        taken
    }

    pub fn starts_with(&self, pattern: &[u8]) -> bool {
        self.source[self.offset.min(self.source.len())..].starts_with(pattern)
    }

    pub fn mark(&self) -> Mark {
        Mark {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    pub fn reset(&mut self, mark: Mark) {
        debug_assert!(mark.offset <= self.offset, "cursor can only be pushed back");
        self.offset = mark.offset;
        self.line = mark.line;
        self.column = mark.column;
    }

    /// Bytes consumed since `start`.
    pub fn slice_from(&self, start: Position) -> &'a [u8] {
        &self.source[start.offset as usize..self.offset]
    }

    pub fn text_from(&self, start: Position) -> String {
        String::from_utf8_lossy(self.slice_from(start)).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_tracks_lines_and_columns() {
        let mut cursor = Cursor::new(b"ab\ncd");
        assert_eq!(cursor.position(), Position::new(0, 1, 1));

        assert_eq!(cursor.bump(), Some(b'a'));
        assert_eq!(cursor.bump(), Some(b'b'));
        assert_eq!(cursor.position(), Position::new(2, 1, 3));

        assert_eq!(cursor.bump(), Some(b'\n'));
        assert_eq!(cursor.position(), Position::new(3, 2, 1));

        cursor.bump_while(|b| b.is_ascii_alphabetic());
        assert!(cursor.is_eof());
        assert_eq!(cursor.bump(), None);
        assert_eq!(cursor.position(), Position::new(5, 2, 3));
    }

    #[test]
    fn test_reset_across_newline_restores_column() {
        let mut cursor = Cursor::new(b"xyz\n\nq");
        cursor.bump_while(|b| b != b'\n');
        let mark = cursor.mark();
        let before = cursor.position();

        cursor.bump();
        cursor.bump();
        cursor.bump();
        assert_eq!(cursor.position().line, 3);

        cursor.reset(mark);
        assert_eq!(cursor.position(), before);
        assert_eq!(cursor.peek(), Some(b'\n'));
    }

    #[test]
    fn test_peek_and_eat() {
        let mut cursor = Cursor::new(b"/=");
        assert_eq!(cursor.peek_nth(1), Some(b'='));
        assert_eq!(cursor.peek_nth(2), None);
        assert!(!cursor.eat(b'='));
        assert!(cursor.eat(b'/'));
        assert!(cursor.starts_with(b"="));
        assert!(cursor.eat(b'='));
        assert!(cursor.starts_with(b""));
        assert!(!cursor.starts_with(b"="));
    }

    #[test]
    fn test_text_from() {
        let mut cursor = Cursor::new(b"let x");
        let start = cursor.position();
        cursor.bump_while(|b| b.is_ascii_alphabetic());
        assert_eq!(cursor.text_from(start), "let");
        assert_eq!(cursor.slice_from(start), b"let");
    }
}
