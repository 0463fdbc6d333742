use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A condition that aborts a whole run. Lexical problems never end up here; they are
/// recorded as `LexicalError` tokens instead.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::SourceUnreadable { .. } => "SourceUnreadable",
            ErrorImpl::ReportUnwritable { .. } => "ReportUnwritable",
            ErrorImpl::InvalidConfig { .. } => "InvalidConfig",
            ErrorImpl::TokenLimitExceeded { .. } => "TokenLimitExceeded",
            ErrorImpl::ErrorLimitExceeded { .. } => "ErrorLimitExceeded",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::SourceUnreadable { path, .. } => ErrorTip::Suggestion(format!(
                "Check that `{}` exists and is readable",
                path
            )),
            ErrorImpl::ReportUnwritable { path, .. } => ErrorTip::Suggestion(format!(
                "Check that the directory for `{}` exists and is writable",
                path
            )),
            ErrorImpl::InvalidConfig { .. } => ErrorTip::None,
            ErrorImpl::TokenLimitExceeded { limit } => ErrorTip::Suggestion(format!(
                "Raise `lexer.max_tokens` above {} or remove it",
                limit
            )),
            ErrorImpl::ErrorLimitExceeded { limit } => ErrorTip::Suggestion(format!(
                "Raise `lexer.max_errors` above {} or remove it",
                limit
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position == Position::null() {
            write!(f, "{}", self.internal_error)
        } else {
            write!(
                f,
                "{} at line {}, col {}",
                self.internal_error, self.position.line, self.position.column
            )
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("cannot read source {path:?}: {reason}")]
    SourceUnreadable { path: String, reason: String },
    #[error("cannot write report {path:?}: {reason}")]
    ReportUnwritable { path: String, reason: String },
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error("token limit of {limit} exceeded")]
    TokenLimitExceeded { limit: usize },
    #[error("lexical error limit of {limit} exceeded")]
    ErrorLimitExceeded { limit: usize },
}

/// Why a lexeme was recorded as a lexical error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated text block")]
    UnterminatedTextBlock,
    #[error("unterminated secure literal")]
    UnterminatedSecure,
    #[error("secure literal contains whitespace")]
    SecureContainsWhitespace,
    #[error("malformed character literal")]
    MalformedChar,
    #[error("unterminated array literal")]
    UnterminatedArray,
    #[error("unterminated collection literal")]
    UnterminatedCollection,
    #[error("invalid date")]
    InvalidDate,
    #[error("unrecognised character")]
    UnrecognisedCharacter,
}

impl LexErrorKind {
    pub fn is_unterminated(&self) -> bool {
        matches!(
            self,
            LexErrorKind::UnterminatedBlockComment
                | LexErrorKind::UnterminatedString
                | LexErrorKind::UnterminatedTextBlock
                | LexErrorKind::UnterminatedSecure
                | LexErrorKind::UnterminatedArray
                | LexErrorKind::UnterminatedCollection
        )
    }
}
