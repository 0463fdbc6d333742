//! Symbol table report.
//!
//! Renders a finished scan as a fixed-layout table (line, column, token, lexeme),
//! an optional token-kind frequency summary, and the list of lexical errors.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{
    config::ReportConfig,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::LexOutput,
        tokens::{escape_lexeme, Token, TokenKind},
    },
    Position,
};

const RULE: &str = "-------------------------------------------------------";

/// What the token column shows: the lexeme for keywords, operators and delimiters,
/// the kind name for everything else.
pub fn token_label(token: &Token) -> String {
    if token.kind.prints_lexeme() {
        escape_lexeme(&token.value)
    } else {
        token.kind.name().to_string()
    }
}

/// Occurrence count of every kind present, in declaration order.
pub fn kind_counts(output: &LexOutput) -> Vec<(TokenKind, usize)> {
    TokenKind::ALL
        .iter()
        .map(|kind| (*kind, output.count(*kind)))
        .filter(|(_, count)| *count > 0)
        .collect()
}

pub fn write_report<W: Write>(
    out: &mut W,
    source_name: &str,
    output: &LexOutput,
    options: &ReportConfig,
) -> io::Result<()> {
    writeln!(out, "=== SIMPLE LEXICAL ANALYZER OUTPUT ===")?;
    writeln!(out, "Source: {}", source_name)?;
    writeln!(out)?;

    writeln!(out, "------------- SYMBOL TABLE -------------")?;
    writeln!(out, "{:>6} | {:>6} | {:<15} | {}", "Line", "Col", "Token", "Lexeme")?;
    writeln!(out, "{}", RULE)?;

    for token in &output.tokens {
        writeln!(
            out,
            "{:>6} | {:>6} | {:<15} | {}",
            token.line(),
            token.column(),
            token_label(token),
            escape_lexeme(&token.value)
        )?;
    }

    if options.summary {
        writeln!(out)?;
        writeln!(out, "------------- TOKEN SUMMARY -------------")?;
        for (kind, count) in kind_counts(output) {
            writeln!(out, "{:<18} | {:>6}", kind.name(), count)?;
        }
        writeln!(out, "{:<18} | {:>6}", "TOTAL", output.tokens.len())?;
    }

    writeln!(out)?;
    writeln!(out, "Errors ({}):", output.errors.len())?;
    if output.errors.is_empty() {
        writeln!(out, "  (none)")?;
    } else {
        for error in &output.errors {
            writeln!(
                out,
                "  - Invalid token '{}' at line {}, col {} ({})",
                error.display_value(),
                error.line(),
                error.column(),
                error.kind
            )?;
        }
    }

    Ok(())
}

pub fn write_report_to_path(
    path: &Path,
    source_name: &str,
    output: &LexOutput,
    options: &ReportConfig,
) -> Result<(), Error> {
    let unwritable = |e: io::Error| {
        Error::new(
            ErrorImpl::ReportUnwritable {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
            Position::null(),
        )
    };

    let file = File::create(path).map_err(unwritable)?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, source_name, output, options).map_err(unwritable)?;
    writer.flush().map_err(unwritable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LexerConfig, lexer::lexer::tokenize};
    use pretty_assertions::assert_eq;

    fn render(source: &str, summary: bool) -> String {
        let output = tokenize(source, &LexerConfig::default()).unwrap();
        let options = ReportConfig {
            summary,
            ..ReportConfig::default()
        };

        let mut buffer = Vec::new();
        write_report(&mut buffer, "test.simp", &output, &options).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_rows_use_lexeme_for_keywords_and_operators() {
        let report = render("let x = 1\n", false);

        assert!(report.contains("     1 |      1 | let             | let\n"));
        assert!(report.contains("     1 |      4 | WHITESPACE      |  \n"));
        assert!(report.contains("     1 |      5 | IDENTIFIER      | x\n"));
        assert!(report.contains("     1 |      7 | =               | =\n"));
        assert!(report.contains("     1 |      9 | INT_LITERAL     | 1\n"));
        assert!(report.contains("     1 |     10 | NEWLINE         | \\n\n"));
    }

    #[test]
    fn test_full_report_layout() {
        let report = render("x@", true);

        let expected = "\
=== SIMPLE LEXICAL ANALYZER OUTPUT ===
Source: test.simp

------------- SYMBOL TABLE -------------
  Line |    Col | Token           | Lexeme
-------------------------------------------------------
     1 |      1 | IDENTIFIER      | x
     1 |      2 | LEXICAL_ERROR   | @

------------- TOKEN SUMMARY -------------
IDENTIFIER         |      1
LEXICAL_ERROR      |      1
TOTAL              |      2

Errors (1):
  - Invalid token '@' at line 1, col 2 (unrecognised character)
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_no_errors() {
        let report = render("show 1", false);
        assert!(report.ends_with("Errors (0):\n  (none)\n"));
        assert!(!report.contains("TOKEN SUMMARY"));
    }

    #[test]
    fn test_multiline_lexemes_stay_on_one_row() {
        let report = render("/* a\nb */", false);
        assert!(report.contains("| COMMENT         | /* a\\nb */\n"));
    }

    #[test]
    fn test_kind_counts_skip_absent_kinds() {
        let output = tokenize("a b c", &LexerConfig::default()).unwrap();
        assert_eq!(
            kind_counts(&output),
            vec![(TokenKind::Whitespace, 2), (TokenKind::Identifier, 3)]
        );
    }

    #[test]
    fn test_write_report_to_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("SymbolTable.txt");
        let output = tokenize("let y", &LexerConfig::default()).unwrap();

        write_report_to_path(&path, "y.simp", &output, &ReportConfig::default()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("=== SIMPLE LEXICAL ANALYZER OUTPUT ===\nSource: y.simp\n"));
    }

    #[test]
    fn test_write_report_to_missing_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("SymbolTable.txt");
        let output = LexOutput::default();

        let err = write_report_to_path(&path, "y.simp", &output, &ReportConfig::default())
            .unwrap_err();
        assert_eq!(err.get_error_name(), "ReportUnwritable");
    }
}
