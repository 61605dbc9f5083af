//! Structured compile errors.
//!
//! Every phase reports failure through [`CompileError`]: a kind tag, a human
//! message, the 1-based source line that anchored the construct, and the text
//! of that line when it is available. The first error anywhere aborts the
//! pipeline; later phases never run on partial output.

use thiserror::Error;

/// Which phase produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Illegal character in the source text.
    Lex,
    /// Syntax error, scope violation, or malformed control-flow header.
    Parse,
    /// Type error, uninitialized use, or division by a constant zero.
    Semantic,
    /// Reserved: TAC generation is total over a validated AST.
    Codegen,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "lexical"),
            ErrorKind::Parse => write!(f, "parse"),
            ErrorKind::Semantic => write!(f, "semantic"),
            ErrorKind::Codegen => write!(f, "codegen"),
        }
    }
}

/// A pipeline-aborting compile error.
///
/// # Example
///
/// ```
/// use minic_util::{CompileError, ErrorKind};
///
/// let err = CompileError::semantic("division by zero", 3, Some("int x = 1 / 0;"));
/// assert_eq!(err.kind, ErrorKind::Semantic);
/// assert!(err.render().contains("1 / 0"));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{kind} error: {message}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    /// Line the error is anchored to; 0 when no single line applies
    /// (e.g. unexpected end of file).
    pub line: u32,
    /// The source line text, when the caller could recover it.
    pub snippet: Option<String>,
}

impl CompileError {
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        line: u32,
        snippet: Option<&str>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            snippet: snippet.map(str::to_owned),
        }
    }

    pub fn lex(message: impl Into<String>, line: u32, snippet: Option<&str>) -> Self {
        Self::new(ErrorKind::Lex, message, line, snippet)
    }

    pub fn parse(message: impl Into<String>, line: u32, snippet: Option<&str>) -> Self {
        Self::new(ErrorKind::Parse, message, line, snippet)
    }

    pub fn semantic(message: impl Into<String>, line: u32, snippet: Option<&str>) -> Self {
        Self::new(ErrorKind::Semantic, message, line, snippet)
    }

    /// Full rendering: the `Display` line plus an indented `line) source`
    /// snippet when one was attached.
    pub fn render(&self) -> String {
        match &self.snippet {
            Some(text) => format!("{}:\n\t{})\t{}", self, self.line, text.trim_end()),
            None => self.to_string(),
        }
    }
}

/// Result alias used throughout the compiler.
pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_kind() {
        let err = CompileError::parse("unexpected symbol \";\"", 2, None);
        assert_eq!(err.to_string(), "parse error: unexpected symbol \";\"");
    }

    #[test]
    fn test_render_without_snippet() {
        let err = CompileError::lex("illegal character '?'", 1, None);
        assert_eq!(err.render(), "lexical error: illegal character '?'");
    }

    #[test]
    fn test_render_with_snippet() {
        let err = CompileError::semantic("division by zero", 4, Some("int x = 1 / 0;"));
        assert_eq!(
            err.render(),
            "semantic error: division by zero:\n\t4)\tint x = 1 / 0;"
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", ErrorKind::Lex), "lexical");
        assert_eq!(format!("{}", ErrorKind::Parse), "parse");
        assert_eq!(format!("{}", ErrorKind::Semantic), "semantic");
        assert_eq!(format!("{}", ErrorKind::Codegen), "codegen");
    }
}
