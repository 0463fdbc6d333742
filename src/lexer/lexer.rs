use tracing::{debug, trace};

use crate::{
    config::LexerConfig,
    errors::errors::{Error, ErrorImpl, LexErrorKind},
    Position, Span, MK_TOKEN,
};

use super::{
    classifier::{classify, WordClass},
    cursor::Cursor,
    literals::{self, Aggregate},
    numbers,
    tokens::{LexicalError, Token, TokenKind, BOOLEAN_LOOKUP, DATATYPE_LOOKUP},
};

/// Everything one scan produces. Both sequences are complete once `tokenize` returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexicalError>,
}

impl LexOutput {
    /// Tokens other than whitespace, newlines and comments.
    pub fn meaningful(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.kind.is_trivia())
    }

    pub fn count(&self, kind: TokenKind) -> usize {
        self.tokens.iter().filter(|t| t.kind == kind).count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// The most recent token that was not trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousToken {
    pub kind: TokenKind,
    pub value: String,
}

/// Scan state for a single source: cursor, accumulated output and the previous
/// meaningful token.
pub struct Lexer<'a> {
    pub(super) cursor: Cursor<'a>,
    tokens: Vec<Token>,
    errors: Vec<LexicalError>,
    previous: Option<PreviousToken>,
    config: LexerConfig,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8], config: LexerConfig) -> Lexer<'a> {
        Lexer {
            cursor: Cursor::new(source),
            tokens: vec![],
            errors: vec![],
            previous: None,
            config,
        }
    }

    pub fn previous(&self) -> Option<&PreviousToken> {
        self.previous.as_ref()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// `+`/`-` is a prefix operator at the start of input or after an operator,
    /// separator or opening delimiter.
    pub fn allows_unary(&self) -> bool {
        self.previous.as_ref().map_or(true, |p| p.kind.allows_unary())
    }

    pub fn allows_index(&self) -> bool {
        self.previous.as_ref().is_some_and(|p| p.kind.allows_index())
    }

    /// Records a token spanning from `start` to the cursor.
    pub fn push(&mut self, kind: TokenKind, value: String, start: Position) -> Result<(), Error> {
        if let Some(limit) = self.config.max_tokens {
            if self.tokens.len() >= limit {
                return Err(Error::new(ErrorImpl::TokenLimitExceeded { limit }, start));
            }
        }

        let span = Span::new(start, self.cursor.position());
        trace!(kind = %kind, value = %value, line = start.line, column = start.column, "token");

        if !kind.is_trivia() {
            self.previous = Some(PreviousToken {
                kind,
                value: value.clone(),
            });
        }

        self.tokens.push(MK_TOKEN!(kind, value, span));
        Ok(())
    }

    /// Records everything consumed since `start` as a lexical error.
    pub fn push_error(&mut self, reason: LexErrorKind, start: Position) -> Result<(), Error> {
        if let Some(limit) = self.config.max_errors {
            if self.errors.len() >= limit {
                return Err(Error::new(ErrorImpl::ErrorLimitExceeded { limit }, start));
            }
        }

        let value = self.cursor.text_from(start);
        let token_index = self.tokens.len();
        self.push(TokenKind::LexicalError, value.clone(), start)?;

        debug!(reason = %reason, line = start.line, column = start.column, "lexical error");
        self.errors.push(LexicalError {
            kind: reason,
            value,
            span: Span::new(start, self.cursor.position()),
            token_index,
        });
        Ok(())
    }

    /// Scans one token. Returns `false` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<bool, Error> {
        let start = self.cursor.position();
        let Some(c) = self.cursor.peek() else {
            return Ok(false);
        };

        match c {
            b'\n' => self.scan_newline(start)?,
            b'\r' if self.cursor.peek_nth(1) == Some(b'\n') => self.scan_newline(start)?,
            b' ' | b'\t' | b'\r' => self.scan_whitespace(start)?,
            b'/' => self.scan_slash(start)?,
            b'"' => literals::scan_string(self, start)?,
            b'`' => literals::scan_secure(self, start)?,
            b'\'' => literals::scan_char(self, start)?,
            b'0'..=b'9' => numbers::scan_number(self, start)?,
            b'[' if self.allows_index() => self.scan_operator(start)?,
            b'[' => literals::scan_aggregate(self, start, Aggregate::Array)?,
            b'{' => literals::scan_aggregate(self, start, Aggregate::Collection)?,
            c if is_word_start(c) => self.scan_word(start)?,
            _ => self.scan_operator(start)?,
        }

        Ok(true)
    }

    pub fn finish(self) -> LexOutput {
        LexOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_newline(&mut self, start: Position) -> Result<(), Error> {
        self.cursor.eat(b'\r');
        self.cursor.bump();
        let value = self.cursor.text_from(start);
        self.push(TokenKind::Newline, value, start)
    }

    fn scan_whitespace(&mut self, start: Position) -> Result<(), Error> {
        while let Some(b) = self.cursor.peek() {
            let is_blank = match b {
                b' ' | b'\t' => true,
                b'\r' => self.cursor.peek_nth(1) != Some(b'\n'),
                _ => false,
            };
            if !is_blank {
                break;
            }
            self.cursor.bump();
        }

        let value = self.cursor.text_from(start);
        self.push(TokenKind::Whitespace, value, start)
    }

    /// `//` line comment, `/* */` block comment, `/=` or `/`.
    fn scan_slash(&mut self, start: Position) -> Result<(), Error> {
        self.cursor.bump();

        match self.cursor.peek() {
            Some(b'/') => {
                while let Some(b) = self.cursor.peek() {
                    if b == b'\n' || (b == b'\r' && self.cursor.peek_nth(1) == Some(b'\n')) {
                        break;
                    }
                    self.cursor.bump();
                }
                let value = self.cursor.text_from(start);
                self.push(TokenKind::Comment, value, start)
            }
            Some(b'*') => {
                self.cursor.bump();
                loop {
                    match self.cursor.bump() {
                        None => {
                            return self.push_error(LexErrorKind::UnterminatedBlockComment, start)
                        }
                        Some(b'*') if self.cursor.peek() == Some(b'/') => {
                            self.cursor.bump();
                            let value = self.cursor.text_from(start);
                            return self.push(TokenKind::Comment, value, start);
                        }
                        Some(_) => {}
                    }
                }
            }
            Some(b'=') => {
                self.cursor.bump();
                self.push(TokenKind::AssignOp, String::from("/="), start)
            }
            _ => self.push(TokenKind::ArithOp, String::from("/"), start),
        }
    }

    fn scan_word(&mut self, start: Position) -> Result<(), Error> {
        self.cursor.bump_while(is_word_continue);
        let value = self.cursor.text_from(start);

        if value.eq_ignore_ascii_case("to") && self.merge_to_do(start)? {
            return Ok(());
        }

        self.push(classify_word(&value), value, start)
    }

    /// Tries to fuse `to`, a run of blanks and `do` into one lexeme. Only the letters
    /// after the blanks are compared, so `to do1` merges and leaves `1` behind. On
    /// failure the cursor is put back right after `to`.
    fn merge_to_do(&mut self, start: Position) -> Result<bool, Error> {
        let mark = self.cursor.mark();

        if self.cursor.bump_while(|b| b == b' ' || b == b'\t') > 0 {
            let word_start = self.cursor.position();
            self.cursor.bump_while(|b| b.is_ascii_alphabetic());

            if self.cursor.text_from(word_start).eq_ignore_ascii_case("do") {
                let value = String::from("to do");
                return self.push(classify_word(&value), value, start).map(|_| true);
            }
        }

        trace!(line = start.line, column = start.column, "`to` not followed by `do`, pushing back");
        self.cursor.reset(mark);
        Ok(false)
    }

    /// Operators and delimiters by longest match over one byte of lookahead.
    fn scan_operator(&mut self, start: Position) -> Result<(), Error> {
        let Some(c) = self.cursor.peek() else {
            return Ok(());
        };
        let next = self.cursor.peek_nth(1);

        let (kind, width) = match (c, next) {
            (b'+', Some(b'+')) | (b'-', Some(b'-')) => (TokenKind::UnaryOp, 2),
            (b'^', _) => (TokenKind::ExpOp, 1),
            (b'<' | b'>' | b'=' | b'!', Some(b'=')) => (TokenKind::RelOp, 2),
            (b'+' | b'-' | b'*' | b'%' | b'~', Some(b'=')) => (TokenKind::AssignOp, 2),
            (b'=', _) => (TokenKind::AssignOp, 1),
            (b'<' | b'>', _) => (TokenKind::RelOp, 1),
            (b'&', Some(b'&')) | (b'|', Some(b'|')) => (TokenKind::LogicalOp, 2),
            (b'!', _) => (TokenKind::LogicalOp, 1),
            (b'*' | b'%' | b'~', _) => (TokenKind::ArithOp, 1),
            (b'+' | b'-', _) if self.allows_unary() => (TokenKind::UnaryOp, 1),
            (b'+' | b'-', _) => (TokenKind::ArithOp, 1),
            (b':', _) => (TokenKind::Colon, 1),
            (b',', _) => (TokenKind::Comma, 1),
            (b'(', _) => (TokenKind::LParen, 1),
            (b')', _) => (TokenKind::RParen, 1),
            (b'[', _) => (TokenKind::LBracket, 1),
            (b']', _) => (TokenKind::RBracket, 1),
            _ => {
                self.cursor.bump();
                return self.push_error(LexErrorKind::UnrecognisedCharacter, start);
            }
        };

        for _ in 0..width {
            self.cursor.bump();
        }

        let value = self.cursor.text_from(start);
        self.push(kind, value, start)
    }
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_word_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Token kind for a word: boolean literal, then datatype name, then the keyword
/// automaton. Case-insensitive throughout.
pub fn classify_word(word: &str) -> TokenKind {
    let folded = word.to_ascii_lowercase();

    if BOOLEAN_LOOKUP.contains(folded.as_str()) {
        return TokenKind::BoolLiteral;
    }

    if DATATYPE_LOOKUP.contains(folded.as_str()) {
        return TokenKind::Datatype;
    }

    match classify(&folded) {
        WordClass::Keyword => TokenKind::Keyword,
        WordClass::Reserved => TokenKind::Reserved,
        WordClass::Noise => TokenKind::Noise,
        WordClass::Identifier => TokenKind::Identifier,
    }
}

/// Scans a whole source into tokens and lexical errors.
///
/// Lexical problems never fail the call; only an exceeded capacity limit from
/// `config` does.
pub fn tokenize<S: AsRef<[u8]>>(source: S, config: &LexerConfig) -> Result<LexOutput, Error> {
    let source = source.as_ref();
    debug!(bytes = source.len(), "scan started");

    let mut lex = Lexer::new(source, config.clone());
    while lex.next_token()? {}

    let output = lex.finish();
    debug!(
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "scan finished"
    );
    Ok(output)
}
