//! Whole-stream lexer tests, including property tests for the identifier
//! and number paths.

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use crate::Lexer;

    #[test]
    fn test_full_program() {
        let source = "bool a = true;\n\
                      int i = 0;\n\
                      while (a) {\n\
                          print(a);\n\
                          if (i == 10) { a = false; }\n\
                          i = i + 1;\n\
                      }\n";
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();
        assert_eq!(lexer.error_count(), 0);
        assert_eq!(tokens.first().map(|t| t.kind.clone()), Some(TokenKind::BoolDcl));
        assert_eq!(tokens.last().map(|t| t.kind.clone()), Some(TokenKind::RBrace));
        // while (a) { sits on line 3
        let while_tok = tokens.iter().find(|t| t.kind == TokenKind::While).unwrap();
        assert_eq!(while_tok.line, 3);
    }

    #[test]
    fn test_adjacent_tokens_without_spaces() {
        let tokens = Lexer::new("for(int i=0;i<9;i=i+1){}").tokenize();
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::For,
                TokenKind::LParen,
                TokenKind::IntDcl,
                TokenKind::Name("i".into()),
                TokenKind::Assign,
                TokenKind::IntNum(0),
                TokenKind::Semicolon,
                TokenKind::Name("i".into()),
                TokenKind::Less,
                TokenKind::IntNum(9),
                TokenKind::Semicolon,
                TokenKind::Name("i".into()),
                TokenKind::Assign,
                TokenKind::Name("i".into()),
                TokenKind::Plus,
                TokenKind::IntNum(1),
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn test_float_and_int_mix() {
        let tokens = Lexer::new("1 + 2.0 / 3").tokenize();
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::IntNum(1),
                TokenKind::Plus,
                TokenKind::FloatNum(2.0),
                TokenKind::Slash,
                TokenKind::IntNum(3),
            ]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn identifier_roundtrips(name in "[a-zA-Z_][a-zA-Z_0-9]{0,12}") {
                let mut lexer = Lexer::new(&name);
                let tokens = lexer.tokenize();
                prop_assert_eq!(lexer.error_count(), 0);
                prop_assert_eq!(tokens.len(), 1);
                match &tokens[0].kind {
                    TokenKind::Name(n) => prop_assert_eq!(n, &name),
                    // Reserved words lex as keywords, never as errors.
                    other => prop_assert!(!matches!(other, TokenKind::IntNum(_))),
                }
            }

            #[test]
            fn integers_roundtrip(value in 0i64..1_000_000_000) {
                let text = value.to_string();
                let tokens = Lexer::new(&text).tokenize();
                prop_assert_eq!(tokens.len(), 1);
                prop_assert_eq!(&tokens[0].kind, &TokenKind::IntNum(value));
            }

            #[test]
            fn lexer_never_panics(source in "[ -~\n\t]{0,64}") {
                let mut lexer = Lexer::new(&source);
                let _ = lexer.tokenize();
            }
        }
    }
}
