#![allow(clippy::module_inception)]

use std::{fs, io::Write, path::Path};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::LexicalError,
};

pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod report;

extern crate regex;

/// A location in the source: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }

    pub fn start() -> Self {
        Position::new(0, 1, 1)
    }

    pub fn null() -> Self {
        Position::new(0, 0, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.offset as usize..self.end.offset as usize
    }

    pub fn len(&self) -> usize {
        (self.end.offset - self.start.offset) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

/// Reads a whole source file as bytes. This is the only fatal failure of a run.
pub fn read_source(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|e| {
        Error::new(
            ErrorImpl::SourceUnreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
            Position::null(),
        )
    })
}

/// Returns the 1-based line number, the text of that line and the byte offset of
/// `offset` within it.
pub fn get_line_at_position(source: &[u8], offset: usize) -> Option<(usize, String, usize)> {
    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive(|b| *b == b'\n') {
        let end = start + line.len();

        if (start..end).contains(&offset) {
            let text = String::from_utf8_lossy(line).into_owned();
            return Some((line_number, text, offset - start));
        }

        start = end;
        line_number += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let source = b"Hello, world!\nsecond\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 30).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);

        assert!(super::get_line_at_position(source, 500).is_none());
    }

    #[test]
    fn test_span_range() {
        let span = super::Span::new(super::Position::new(3, 1, 4), super::Position::new(7, 1, 8));
        assert_eq!(span.range(), 3..7);
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
    }
}

/// Writes one lexical error with the offending source line and a caret under its
/// first byte.
pub fn display_error<W: Write>(
    out: &mut W,
    error: &LexicalError,
    source: &[u8],
    file: &str,
) -> std::io::Result<()> {
    /*
        error: unrecognised character
        -> final.simp
           |
        20 | let a = #
           | --------^
    */

    let position = error.span.start;
    let Some((line, line_text, line_pos)) =
        get_line_at_position(source, position.offset as usize)
    else {
        return writeln!(out, "Error: {} at end of input", error.kind);
    };

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    writeln!(out, "Error: {} (`{}`)", error.kind, error.display_value())?;
    writeln!(out, "-> {}", file)?;
    writeln!(out, "{:>padding$}", "|")?;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    writeln!(out, "{} | {}", line_str, line_text_removed.trim_end())?;

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    writeln!(out, "{:>padding$} {:->arrows$}", "|", "^")
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
