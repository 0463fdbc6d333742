//! Error types for the lexer.
//!
//! - `Error` / `ErrorImpl`: fatal conditions (unreadable source, unwritable report,
//!   bad configuration, exceeded capacity limits)
//! - `LexErrorKind`: the reason attached to each recorded lexical error
//! - `ErrorTip`: optional suggestion shown next to a fatal error

pub mod errors;

#[cfg(test)]
mod tests;
