//! Operator lexing.
//!
//! Two-character operators (`==`, `!=`, `>=`, `<=`) are matched before
//! their single-character prefixes. A lone `!` is not an operator in
//! MiniLang and is reported as an illegal character.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes `=` or `==`.
    pub(crate) fn lex_equals(&mut self) -> Option<TokenKind> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Some(TokenKind::EqEq)
        } else {
            Some(TokenKind::Assign)
        }
    }

    /// Lexes `!=`. A bare `!` is an error.
    pub(crate) fn lex_bang(&mut self) -> Option<TokenKind> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Some(TokenKind::NotEq)
        } else {
            self.record_error('!');
            None
        }
    }

    /// Lexes `<` or `<=`.
    pub(crate) fn lex_less(&mut self) -> Option<TokenKind> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Some(TokenKind::LessEq)
        } else {
            Some(TokenKind::Less)
        }
    }

    /// Lexes `>` or `>=`.
    pub(crate) fn lex_greater(&mut self) -> Option<TokenKind> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Some(TokenKind::GreaterEq)
        } else {
            Some(TokenKind::Greater)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::Lexer;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_assign_vs_eqeq() {
        assert_eq!(kinds("= =="), vec![TokenKind::Assign, TokenKind::EqEq]);
        // Three equals lex as "==" then "=".
        assert_eq!(kinds("==="), vec![TokenKind::EqEq, TokenKind::Assign]);
    }

    #[test]
    fn test_not_equal() {
        assert_eq!(kinds("a != b"), vec![
            TokenKind::Name("a".into()),
            TokenKind::NotEq,
            TokenKind::Name("b".into()),
        ]);
    }

    #[test]
    fn test_bare_bang_is_error() {
        let mut lexer = Lexer::new("a ! b");
        let tokens = lexer.tokenize();
        assert_eq!(tokens.len(), 2);
        assert_eq!(lexer.error_count(), 1);
        assert_eq!(lexer.error_char(), Some('!'));
    }

    #[test]
    fn test_relational() {
        assert_eq!(kinds("< <= > >="), vec![
            TokenKind::Less,
            TokenKind::LessEq,
            TokenKind::Greater,
            TokenKind::GreaterEq,
        ]);
    }
}
