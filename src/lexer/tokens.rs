use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::{errors::errors::LexErrorKind, Span};

lazy_static! {
    /// Words naming a declarable type. These win over the classifier's answer.
    pub static ref DATATYPE_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("int");
        set.insert("float");
        set.insert("char");
        set.insert("string");
        set.insert("text");
        set.insert("secure");
        set.insert("bool");
        set.insert("time");
        set.insert("date");
        set.insert("timestamp");
        set.insert("array");
        set.insert("collection");
        set
    };

    pub static ref BOOLEAN_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("true");
        set.insert("false");
        set
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Newline,
    Whitespace,
    Comment,

    StringLiteral,
    TextBlock,
    SecureLiteral,
    CharLiteral,
    FloatLiteral,
    IntLiteral,
    BoolLiteral,
    TimeLiteral,
    DateLiteral,
    TimestampLiteral,
    ArrayLiteral,
    CollectionLiteral,

    Datatype,
    Keyword,
    Reserved,
    Noise,
    Identifier,

    UnaryOp,   // ++ -- and prefix + -
    ExpOp,     // ^
    AssignOp,  // = += -= *= /= %= ~=
    RelOp,     // < > <= >= == !=
    LogicalOp, // && || !
    ArithOp,   // + - * / % ~

    Colon,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,

    LexicalError,
    Unknown,
}

impl TokenKind {
    pub const ALL: [TokenKind; 34] = [
        TokenKind::Newline,
        TokenKind::Whitespace,
        TokenKind::Comment,
        TokenKind::StringLiteral,
        TokenKind::TextBlock,
        TokenKind::SecureLiteral,
        TokenKind::CharLiteral,
        TokenKind::FloatLiteral,
        TokenKind::IntLiteral,
        TokenKind::BoolLiteral,
        TokenKind::TimeLiteral,
        TokenKind::DateLiteral,
        TokenKind::TimestampLiteral,
        TokenKind::ArrayLiteral,
        TokenKind::CollectionLiteral,
        TokenKind::Datatype,
        TokenKind::Keyword,
        TokenKind::Reserved,
        TokenKind::Noise,
        TokenKind::Identifier,
        TokenKind::UnaryOp,
        TokenKind::ExpOp,
        TokenKind::AssignOp,
        TokenKind::RelOp,
        TokenKind::LogicalOp,
        TokenKind::ArithOp,
        TokenKind::Colon,
        TokenKind::Comma,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::LexicalError,
        TokenKind::Unknown,
    ];

    /// Name used in the symbol table and summary.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Newline => "NEWLINE",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Comment => "COMMENT",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::TextBlock => "TEXT_BLOCK",
            TokenKind::SecureLiteral => "SECURE_LITERAL",
            TokenKind::CharLiteral => "CHAR_LITERAL",
            TokenKind::FloatLiteral => "FLOAT_LITERAL",
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::BoolLiteral => "BOOL_LITERAL",
            TokenKind::TimeLiteral => "TIME_LITERAL",
            TokenKind::DateLiteral => "DATE_LITERAL",
            TokenKind::TimestampLiteral => "TIMESTAMP_LITERAL",
            TokenKind::ArrayLiteral => "ARRAY_LITERAL",
            TokenKind::CollectionLiteral => "COLLECTION_LITERAL",
            TokenKind::Datatype => "DATATYPE",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Reserved => "RESERVED",
            TokenKind::Noise => "NOISE",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::UnaryOp => "UNARY_OP",
            TokenKind::ExpOp => "EXP_OP",
            TokenKind::AssignOp => "ASSIGN_OP",
            TokenKind::RelOp => "REL_OP",
            TokenKind::LogicalOp => "LOGICAL_OP",
            TokenKind::ArithOp => "ARITH_OP",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LexicalError => "LEXICAL_ERROR",
            TokenKind::Unknown => "UNKNOWN",
        }
    }

    /// Whitespace, newlines and comments never count as context for the next token.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Newline | TokenKind::Comment
        )
    }

    /// Kinds the symbol table shows by their lexeme rather than by name.
    pub fn prints_lexeme(&self) -> bool {
        matches!(
            self,
            TokenKind::Keyword
                | TokenKind::Reserved
                | TokenKind::Noise
                | TokenKind::UnaryOp
                | TokenKind::ExpOp
                | TokenKind::AssignOp
                | TokenKind::RelOp
                | TokenKind::LogicalOp
                | TokenKind::ArithOp
                | TokenKind::Colon
                | TokenKind::Comma
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBracket
                | TokenKind::RBracket
        )
    }

    /// Previous-token kinds after which `+`/`-` is a prefix operator.
    pub fn allows_unary(&self) -> bool {
        matches!(
            self,
            TokenKind::AssignOp
                | TokenKind::ArithOp
                | TokenKind::RelOp
                | TokenKind::LogicalOp
                | TokenKind::UnaryOp
                | TokenKind::Colon
                | TokenKind::Comma
                | TokenKind::LParen
                | TokenKind::LBracket
        )
    }

    /// Previous-token kinds after which `[` indexes rather than opening an array.
    pub fn allows_index(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::ArrayLiteral
                | TokenKind::StringLiteral
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} at {}:{}",
            self.kind,
            self.value,
            self.span.start.line,
            self.span.start.column
        )
    }
}

impl Token {
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

/// A lexical error as listed in the report's error summary. `token_index` points at
/// the `TokenKind::LexicalError` token recorded for the same lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    pub kind: LexErrorKind,
    pub value: String,
    pub span: Span,
    pub token_index: usize,
}

impl LexicalError {
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    /// The lexeme with control characters escaped, for single-line display.
    pub fn display_value(&self) -> String {
        escape_lexeme(&self.value)
    }
}

/// Escapes newlines, carriage returns and tabs so a lexeme fits on one line.
pub fn escape_lexeme(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}
