//! Token definitions for MiniLang.

/// The kind of a lexical token.
///
/// Multi-character operators (`==`, `!=`, `>=`, `<=`) are recognized ahead
/// of their single-character prefixes. Keywords win over identifiers.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Single-character operators and punctuation
    /// "+"
    Plus,
    /// "-"
    Minus,
    /// "*"
    Star,
    /// "/"
    Slash,
    /// "^"
    Caret,
    /// "="
    Assign,
    /// "("
    LParen,
    /// ")"
    RParen,
    /// "{"
    LBrace,
    /// "}"
    RBrace,
    /// ">"
    Greater,
    /// "<"
    Less,
    /// ";" - statement terminator
    Semicolon,

    // Multi-character operators
    /// "=="
    EqEq,
    /// "!="
    NotEq,
    /// ">="
    GreaterEq,
    /// "<="
    LessEq,

    // Keywords
    /// "and"
    And,
    /// "or"
    Or,
    /// "int"
    IntDcl,
    /// "float"
    FloatDcl,
    /// "string"
    StringDcl,
    /// "bool"
    BoolDcl,
    /// "true"
    True,
    /// "false"
    False,
    /// "print"
    Print,
    /// "if"
    If,
    /// "elif"
    Elif,
    /// "else"
    Else,
    /// "while"
    While,
    /// "for"
    For,

    // Value-bearing tokens
    /// Integer literal, e.g. `42`
    IntNum(i64),
    /// Float literal, e.g. `3.14` (no exponent form, no leading dot)
    FloatNum(f64),
    /// String literal with its surrounding quotes preserved
    Str(String),
    /// Identifier
    Name(String),
}

impl TokenKind {
    /// True for the four type keywords that open a declaration.
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::IntDcl | TokenKind::FloatDcl | TokenKind::StringDcl | TokenKind::BoolDcl
        )
    }
}

/// A lexical token: kind, raw source text, and 1-based line number.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}
