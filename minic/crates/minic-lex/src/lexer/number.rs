//! Number literal lexing.
//!
//! MiniLang numbers are decimal only: `\d+` for integers and `\d+\.\d+` for
//! floats. There is no exponent form and no leading or trailing dot.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an integer or float literal.
    ///
    /// A `.` only turns the literal into a float when a digit follows, so
    /// `1.x` lexes as `1` `.`-error `x` rather than a malformed float.
    pub(crate) fn lex_number(&mut self) -> TokenKind {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let is_float =
            self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit();

        if is_float {
            self.cursor.advance(); // '.'
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }

            let text = self.cursor.slice_from(self.token_start);
            match text.parse::<f64>() {
                Ok(value) => TokenKind::FloatNum(value),
                Err(_) => {
                    self.record_error(text.chars().next().unwrap_or('0'));
                    TokenKind::FloatNum(0.0)
                }
            }
        } else {
            let text = self.cursor.slice_from(self.token_start);
            match text.parse::<i64>() {
                Ok(value) => TokenKind::IntNum(value),
                Err(_) => {
                    // Out-of-range literal; recorded like an illegal character.
                    self.record_error(text.chars().next().unwrap_or('0'));
                    TokenKind::IntNum(0)
                }
            }
        }
    }
}
