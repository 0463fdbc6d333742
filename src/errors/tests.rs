//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, LexErrorKind};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::TokenLimitExceeded { limit: 10 },
        Position::new(42, 3, 7),
    );

    assert_eq!(error.get_error_name(), "TokenLimitExceeded");
    assert_eq!(error.get_impl(), &ErrorImpl::TokenLimitExceeded { limit: 10 });
    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 7);
}

#[test]
fn test_error_display_with_position() {
    let error = Error::new(
        ErrorImpl::ErrorLimitExceeded { limit: 2 },
        Position::new(9, 2, 4),
    );

    assert_eq!(
        error.to_string(),
        "lexical error limit of 2 exceeded at line 2, col 4"
    );
}

#[test]
fn test_error_display_without_position() {
    let error = Error::new(
        ErrorImpl::SourceUnreadable {
            path: "missing.simp".to_string(),
            reason: "No such file or directory".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "SourceUnreadable");
    assert_eq!(
        error.to_string(),
        "cannot read source \"missing.simp\": No such file or directory"
    );
}

#[test]
fn test_invalid_config_error() {
    let error = Error::new(
        ErrorImpl::InvalidConfig {
            reason: "expected a table".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "InvalidConfig");
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_report_unwritable_error() {
    let error = Error::new(
        ErrorImpl::ReportUnwritable {
            path: "/nope/SymbolTable.txt".to_string(),
            reason: "denied".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "ReportUnwritable");
    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("/nope/SymbolTable.txt")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_limit_tips_name_config_keys() {
    let tokens = Error::new(ErrorImpl::TokenLimitExceeded { limit: 5 }, Position::start());
    let errors = Error::new(ErrorImpl::ErrorLimitExceeded { limit: 5 }, Position::start());

    assert!(tokens.get_tip().to_string().contains("lexer.max_tokens"));
    assert!(errors.get_tip().to_string().contains("lexer.max_errors"));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_lex_error_kind_messages() {
    assert_eq!(
        LexErrorKind::UnterminatedBlockComment.to_string(),
        "unterminated block comment"
    );
    assert_eq!(
        LexErrorKind::SecureContainsWhitespace.to_string(),
        "secure literal contains whitespace"
    );
    assert_eq!(LexErrorKind::InvalidDate.to_string(), "invalid date");
}

#[test]
fn test_lex_error_kind_unterminated() {
    assert!(LexErrorKind::UnterminatedBlockComment.is_unterminated());
    assert!(LexErrorKind::UnterminatedCollection.is_unterminated());
    assert!(!LexErrorKind::MalformedChar.is_unterminated());
    assert!(!LexErrorKind::UnrecognisedCharacter.is_unterminated());
}
