//! Lexical analysis for SIMPLE source.
//!
//! This module contains the single-pass scanner that turns source bytes into
//! classified tokens. It handles:
//!
//! - Position tracking with lossless pushback (`cursor`)
//! - Keyword / reserved / noise word classification by automaton (`classifier`)
//! - Literals: strings, text blocks, secure and char literals, aggregates
//! - Numeric and temporal literals (int, float, date, time, timestamp)
//! - Operators with unary/binary disambiguation, comments and whitespace
//! - Error-tolerant recording of lexical errors

pub mod classifier;
pub mod cursor;
pub mod lexer;
pub mod literals;
pub mod numbers;
pub mod tokens;
