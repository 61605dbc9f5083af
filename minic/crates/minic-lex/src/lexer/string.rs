//! String literal lexing.
//!
//! A string is `"` followed by any characters other than `"` or a newline,
//! with `\"` as the only escape, closed by `"`. The token keeps the
//! surrounding quotes; the parser strips them exactly once.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a string literal. Returns `None` (after recording an error at
    /// the opening quote) when the literal runs into a newline or the end of
    /// input before closing.
    pub(crate) fn lex_string(&mut self) -> Option<TokenKind> {
        let open_line = self.cursor.line();
        self.cursor.advance(); // opening '"'

        loop {
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    let lexeme = self.cursor.slice_from(self.token_start);
                    return Some(TokenKind::Str(lexeme.to_owned()));
                }
                '\\' if self.cursor.peek_char(1) == '"' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                '\n' | '\0' => {
                    // Unterminated: the opening quote is the illegal character.
                    self.record_error_at('"', open_line);
                    return None;
                }
                _ => self.cursor.advance(),
            }
        }
    }
}
