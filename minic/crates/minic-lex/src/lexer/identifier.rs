//! Identifier and keyword lexing.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::token::TokenKind;
use crate::Lexer;

/// Reserved words. Keywords win over identifiers.
fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        let mut map = FxHashMap::default();
        map.insert("int", TokenKind::IntDcl);
        map.insert("float", TokenKind::FloatDcl);
        map.insert("string", TokenKind::StringDcl);
        map.insert("bool", TokenKind::BoolDcl);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("print", TokenKind::Print);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("if", TokenKind::If);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map
    })
}

impl<'a> Lexer<'a> {
    /// Lexes `[A-Za-z_][A-Za-z_0-9]*`, resolving reserved words.
    pub(crate) fn lex_identifier(&mut self) -> TokenKind {
        loop {
            let c = self.cursor.current_char();
            if c.is_ascii_alphanumeric() || c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let text = self.cursor.slice_from(self.token_start);
        match keywords().get(text) {
            Some(kind) => kind.clone(),
            None => TokenKind::Name(text.to_owned()),
        }
    }
}
