//! minic-lex - Lexical analysis for MiniLang.
//!
//! Transforms source text into a stream of [`Token`]s. The lexer is
//! pull-style: [`Lexer::next_token`] yields `Some(Token)` until end of
//! input. Illegal characters do not stop the scan; they are counted and
//! skipped so the caller can report them after tokenizing (the parser
//! refuses a stream that carries lexical errors).

pub mod cursor;
mod edge_cases;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
