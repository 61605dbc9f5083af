//! minic-par - Parser and scope construction for MiniLang.
//!
//! Consumes the token stream produced by `minic-lex` and builds a typed AST
//! plus the tree of lexical scopes. Parsing is fail-fast: the first
//! violation aborts with a structured error and no partial AST escapes.
//!
//! A program is a sequence of semicolon-terminated simple statements and
//! brace-delimited control statements. Expression parsing is a Pratt parser
//! over the precedence table in [`expr`]; scope construction runs as a
//! second walk once the tree is complete (see [`scope`]).

pub mod ast;
mod edge_cases;
mod expr;
pub mod scope;
mod stmt;

pub use ast::{AstKind, AstNode, BinOp, PrimType, Value};
pub use scope::{build_scopes, Scope, ScopeId, ScopeTree, VarInfo};

use minic_lex::{Token, TokenKind};
use minic_util::{CompileError, LineIndex, Result};

/// A parsed program: the root block and its scope tree.
#[derive(Debug)]
pub struct Program {
    pub root: AstNode,
    pub scopes: ScopeTree,
}

/// Token-stream parser.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    lines: &'a LineIndex,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, lines: &'a LineIndex) -> Self {
        Self {
            tokens,
            pos: 0,
            lines,
        }
    }

    /// Parses a whole program and builds its scope tree.
    pub fn parse(mut self) -> Result<Program> {
        let first_line = match self.tokens.first() {
            Some(token) => token.line,
            None => return Err(self.eof_error()),
        };

        let children = self.parse_statement_list(false)?;
        let mut root = AstNode::new(
            AstKind::Block {
                children,
                scope: None,
            },
            first_line,
        );

        let scopes = scope::build_scopes(&mut root, self.lines)?;
        Ok(Program { root, scopes })
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    pub(crate) fn advance(&mut self) -> Result<Token> {
        let token = self.tokens.get(self.pos).cloned().ok_or_else(|| self.eof_error())?;
        self.pos += 1;
        Ok(token)
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Consumes the current token when it matches `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected())
        }
    }

    /// Consumes an identifier, returning its name and line.
    pub(crate) fn expect_name(&mut self) -> Result<(String, u32)> {
        match self.peek_kind() {
            Some(TokenKind::Name(_)) => {
                let token = self.advance()?;
                match token.kind {
                    TokenKind::Name(name) => Ok((name, token.line)),
                    _ => Err(self.unexpected()),
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    pub(crate) fn error(&self, message: String, line: u32) -> CompileError {
        CompileError::parse(message, line, self.lines.line(line))
    }

    /// Error for the token under the cursor (or end of file).
    pub(crate) fn unexpected(&self) -> CompileError {
        match self.peek() {
            Some(token) => self.error(
                format!("unexpected symbol \"{}\"", token.lexeme),
                token.line,
            ),
            None => self.eof_error(),
        }
    }

    pub(crate) fn eof_error(&self) -> CompileError {
        CompileError::parse("unexpected end of file reached", 0, None)
    }
}
