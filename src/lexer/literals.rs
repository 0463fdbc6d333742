//! Delimited literals: strings, text blocks, secure literals, characters and the
//! bracketed array/collection aggregates.
//!
//! Valid literals carry their inner content as the lexeme. A literal that cannot be
//! completed becomes a lexical error holding everything consumed from its opening
//! delimiter on.

use crate::{
    errors::errors::{Error, LexErrorKind},
    Position,
};

use super::{lexer::Lexer, tokens::TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Array,
    Collection,
}

impl Aggregate {
    fn delimiters(&self) -> (u8, u8) {
        match self {
            Aggregate::Array => (b'[', b']'),
            Aggregate::Collection => (b'{', b'}'),
        }
    }

    fn token_kind(&self) -> TokenKind {
        match self {
            Aggregate::Array => TokenKind::ArrayLiteral,
            Aggregate::Collection => TokenKind::CollectionLiteral,
        }
    }

    fn unterminated(&self) -> LexErrorKind {
        match self {
            Aggregate::Array => LexErrorKind::UnterminatedArray,
            Aggregate::Collection => LexErrorKind::UnterminatedCollection,
        }
    }
}

fn at_line_end(lexer: &Lexer) -> bool {
    match lexer.cursor.peek() {
        None | Some(b'\n') => true,
        Some(b'\r') => lexer.cursor.peek_nth(1) == Some(b'\n'),
        _ => false,
    }
}

/// `"..."` on a single line, or a `"""` text block.
pub fn scan_string(lexer: &mut Lexer, start: Position) -> Result<(), Error> {
    lexer.cursor.bump();

    if lexer.cursor.starts_with(b"\"\"") {
        lexer.cursor.bump();
        lexer.cursor.bump();
        return scan_text_block(lexer, start);
    }

    let content_start = lexer.cursor.position();
    loop {
        if at_line_end(lexer) {
            return lexer.push_error(LexErrorKind::UnterminatedString, start);
        }

        match lexer.cursor.peek() {
            Some(b'\\') => {
                lexer.cursor.bump();
                if at_line_end(lexer) {
                    return lexer.push_error(LexErrorKind::UnterminatedString, start);
                }
                lexer.cursor.bump();
            }
            Some(b'"') => {
                let value = lexer.cursor.text_from(content_start);
                lexer.cursor.bump();
                return lexer.push(TokenKind::StringLiteral, value, start);
            }
            _ => {
                lexer.cursor.bump();
            }
        }
    }
}

/// Body of a `"""` block; the opening delimiter is already consumed. In a run of
/// more than three quotes only the last three close the block.
fn scan_text_block(lexer: &mut Lexer, start: Position) -> Result<(), Error> {
    let content_start = lexer.cursor.position();

    loop {
        match lexer.cursor.peek() {
            None => return lexer.push_error(LexErrorKind::UnterminatedTextBlock, start),
            Some(b'\\') => {
                lexer.cursor.bump();
                lexer.cursor.bump();
            }
            Some(b'"') => {
                let mut run = 0;
                while lexer.cursor.peek_nth(run) == Some(b'"') {
                    run += 1;
                }

                if run < 3 {
                    for _ in 0..run {
                        lexer.cursor.bump();
                    }
                    continue;
                }

                for _ in 0..run - 3 {
                    lexer.cursor.bump();
                }
                let value = lexer.cursor.text_from(content_start);
                for _ in 0..3 {
                    lexer.cursor.bump();
                }
                return lexer.push(TokenKind::TextBlock, value, start);
            }
            Some(_) => {
                lexer.cursor.bump();
            }
        }
    }
}

/// `` `...` `` on a single line with no blanks inside.
pub fn scan_secure(lexer: &mut Lexer, start: Position) -> Result<(), Error> {
    lexer.cursor.bump();
    let content_start = lexer.cursor.position();
    let mut has_whitespace = false;

    loop {
        if at_line_end(lexer) {
            return lexer.push_error(LexErrorKind::UnterminatedSecure, start);
        }

        match lexer.cursor.peek() {
            Some(b'`') => {
                let value = lexer.cursor.text_from(content_start);
                lexer.cursor.bump();

                if has_whitespace {
                    return lexer.push_error(LexErrorKind::SecureContainsWhitespace, start);
                }
                return lexer.push(TokenKind::SecureLiteral, value, start);
            }
            Some(b' ' | b'\t' | b'\r') => {
                has_whitespace = true;
                lexer.cursor.bump();
            }
            _ => {
                lexer.cursor.bump();
            }
        }
    }
}

/// `'c'` or `'\c'`, where `c` may itself be a quote (`'''`). Any other shape is malformed: the error runs through the next
/// quote on the line, or covers the opening quote plus one character when there is
/// none.
pub fn scan_char(lexer: &mut Lexer, start: Position) -> Result<(), Error> {
    lexer.cursor.bump();

    let is_body = |b: Option<u8>| matches!(b, Some(c) if c != b'\n' && c != b'\r');
    let first = lexer.cursor.peek();
    let second = lexer.cursor.peek_nth(1);

    let width = match first {
        Some(b'\\') if is_body(second) && lexer.cursor.peek_nth(2) == Some(b'\'') => Some(2),
        Some(b'\\') => None,
        _ if is_body(first) && second == Some(b'\'') => Some(1),
        _ => None,
    };

    if let Some(width) = width {
        let content_start = lexer.cursor.position();
        for _ in 0..width {
            lexer.cursor.bump();
        }
        let value = lexer.cursor.text_from(content_start);
        lexer.cursor.bump();
        return lexer.push(TokenKind::CharLiteral, value, start);
    }

    let consumed = match distance_to_quote(lexer) {
        Some(distance) => distance + 1,
        None if first == Some(b'\\') && is_body(second) => 2,
        None if is_body(first) => 1,
        None => 0,
    };
    for _ in 0..consumed {
        lexer.cursor.bump();
    }
    lexer.push_error(LexErrorKind::MalformedChar, start)
}

/// Lookahead-only search for the next `'` before the end of the line.
fn distance_to_quote(lexer: &Lexer) -> Option<usize> {
    let mut distance = 0;
    loop {
        match lexer.cursor.peek_nth(distance) {
            None | Some(b'\n') => return None,
            Some(b'\r') if lexer.cursor.peek_nth(distance + 1) == Some(b'\n') => return None,
            Some(b'\'') => return Some(distance),
            Some(_) => distance += 1,
        }
    }
}

/// `[...]` or `{...}`, possibly nested and spanning lines. Only the literal's own
/// bracket pair affects the depth.
pub fn scan_aggregate(
    lexer: &mut Lexer,
    start: Position,
    aggregate: Aggregate,
) -> Result<(), Error> {
    let (open, close) = aggregate.delimiters();
    lexer.cursor.bump();

    let content_start = lexer.cursor.position();
    let mut depth = 1usize;

    loop {
        match lexer.cursor.peek() {
            None => return lexer.push_error(aggregate.unterminated(), start),
            Some(b) if b == open => depth += 1,
            Some(b) if b == close => {
                depth -= 1;
                if depth == 0 {
                    let value = lexer.cursor.text_from(content_start);
                    lexer.cursor.bump();
                    return lexer.push(aggregate.token_kind(), value, start);
                }
            }
            Some(_) => {}
        }
        lexer.cursor.bump();
    }
}
