//! Numeric and temporal literals.
//!
//! A leading digit run decides the shape from what follows it: `-digit` tries a date
//! (and then a timestamp), `:digit` after two digits tries a time, and a single `.`
//! makes a float whether or not digits follow it. A shape that does not pan out is pushed back so the digits stand alone as
//! an integer and the separator is scanned again as an ordinary token.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    errors::errors::{Error, LexErrorKind},
    Position,
};

use super::{lexer::Lexer, tokens::TokenKind};

lazy_static! {
    static ref DATE_PATTERN: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap();
    static ref DATE_LIKE_PATTERN: Regex =
        Regex::new(r"^(\d{4}-\d{1,2}-\d{1,2}|\d{1,2}-\d{1,2}-\d{4})$").unwrap();
    static ref TIME_PATTERN: Regex =
        Regex::new(r"^([01]\d|2[0-3]):[0-5]\d(:[0-5]\d)?$").unwrap();
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

pub fn scan_number(lexer: &mut Lexer, start: Position) -> Result<(), Error> {
    let digits = lexer.cursor.bump_while(is_digit);
    let follows_digit = lexer.cursor.peek_nth(1).is_some_and(is_digit);

    match lexer.cursor.peek() {
        Some(b'-') if follows_digit => {
            if scan_date(lexer, start)? {
                return Ok(());
            }
        }
        Some(b':') if follows_digit && digits == 2 => {
            if scan_time(lexer, start)? {
                return Ok(());
            }
        }
        Some(b'.') => {
            lexer.cursor.bump();
            lexer.cursor.bump_while(is_digit);
            let value = lexer.cursor.text_from(start);
            return lexer.push(TokenKind::FloatLiteral, value, start);
        }
        _ => {}
    }

    let value = lexer.cursor.text_from(start);
    lexer.push(TokenKind::IntLiteral, value, start)
}

/// Cursor sits on the `-` after the leading digits.
fn scan_date(lexer: &mut Lexer, start: Position) -> Result<bool, Error> {
    let mark = lexer.cursor.mark();
    lexer.cursor.bump_while(|b| is_digit(b) || b == b'-');
    let value = lexer.cursor.text_from(start);

    if is_valid_date(&value) {
        if !scan_timestamp(lexer, start)? {
            lexer.push(TokenKind::DateLiteral, value, start)?;
        }
        return Ok(true);
    }

    if DATE_LIKE_PATTERN.is_match(&value) {
        lexer.push_error(LexErrorKind::InvalidDate, start)?;
        return Ok(true);
    }

    trace!(run = %value, "not a date, pushing back");
    lexer.cursor.reset(mark);
    Ok(false)
}

/// Cursor sits right after a valid date. Takes a single space plus a time.
fn scan_timestamp(lexer: &mut Lexer, start: Position) -> Result<bool, Error> {
    if lexer.cursor.peek() != Some(b' ') || !lexer.cursor.peek_nth(1).is_some_and(is_digit) {
        return Ok(false);
    }

    let mark = lexer.cursor.mark();
    lexer.cursor.bump();
    let time_start = lexer.cursor.position();
    lexer.cursor.bump_while(|b| is_digit(b) || b == b':');

    if TIME_PATTERN.is_match(&lexer.cursor.text_from(time_start)) {
        let value = lexer.cursor.text_from(start);
        lexer.push(TokenKind::TimestampLiteral, value, start)?;
        return Ok(true);
    }

    trace!(line = start.line, column = start.column, "date suffix is not a time, pushing back");
    lexer.cursor.reset(mark);
    Ok(false)
}

/// Cursor sits on the `:` after two leading digits.
fn scan_time(lexer: &mut Lexer, start: Position) -> Result<bool, Error> {
    let mark = lexer.cursor.mark();
    lexer.cursor.bump_while(|b| is_digit(b) || b == b':');
    let value = lexer.cursor.text_from(start);

    if TIME_PATTERN.is_match(&value) {
        lexer.push(TokenKind::TimeLiteral, value, start)?;
        return Ok(true);
    }

    lexer.cursor.reset(mark);
    Ok(false)
}

/// `YYYY-MM-DD` naming a real calendar day.
pub fn is_valid_date(text: &str) -> bool {
    let Some(captures) = DATE_PATTERN.captures(text) else {
        return false;
    };

    let field = |i: usize| captures[i].parse::<u32>().unwrap_or(0);
    let (year, month, day) = (field(1), field(2), field(3));

    (1..=12).contains(&month) && (1..=days_in_month(year, month)).contains(&day)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        _ => 31,
    }
}

pub fn is_valid_time(text: &str) -> bool {
    TIME_PATTERN.is_match(text)
}
