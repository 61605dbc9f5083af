//! Expression parsing (Pratt / top-down operator precedence).
//!
//! Precedence, lowest to highest:
//!
//! | Level | Operators            | Associativity |
//! |-------|----------------------|---------------|
//! | 1     | `and`, `or`          | left          |
//! | 2     | `==`, `!=`           | left          |
//! | 3     | `<`, `>`, `<=`, `>=` | non-assoc     |
//! | 4     | `+`, `-`             | left          |
//! | 5     | `*`, `/`             | left          |
//! | 6     | `^`                  | left          |
//! | 7     | unary `-`            | right         |
//!
//! Non-associativity of the relational level means `a < b < c` is a parse
//! error; parenthesize to compare a comparison result (which the semantic
//! pass then rejects on type grounds anyway).

use minic_lex::TokenKind;
use minic_util::Result;

use crate::ast::{AstKind, AstNode, BinOp, PrimType, Value};
use crate::Parser;

/// Binding power levels. Left-associative operators use `right = left + 1`.
mod bp {
    pub const MIN: u8 = 0;
    pub const LOGICAL: u8 = 2;
    pub const EQUALITY: u8 = 4;
    pub const COMPARISON: u8 = 6;
    pub const ADDITIVE: u8 = 8;
    pub const MULTIPLICATIVE: u8 = 10;
    pub const POWER: u8 = 12;
    pub const PREFIX: u8 = 14;
}

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<AstNode> {
        self.parse_expr_bp(bp::MIN)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<AstNode> {
        let mut lhs = self.parse_prefix()?;
        let mut after_comparison = false;

        loop {
            let Some((op, lbp, rbp)) = self.peek_infix() else {
                break;
            };
            if lbp < min_bp {
                break;
            }

            if lbp == bp::COMPARISON {
                if after_comparison {
                    let line = self.peek().map(|t| t.line).unwrap_or(0);
                    return Err(self.error(
                        "comparison operators cannot be chained".to_owned(),
                        line,
                    ));
                }
                after_comparison = true;
            } else {
                after_comparison = false;
            }

            let op_token = self.advance()?;
            let rhs = self.parse_expr_bp(rbp)?;
            lhs = AstNode::new(
                AstKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                op_token.line,
            );
        }

        Ok(lhs)
    }

    /// `(operator, left bp, right bp)` for the token under the cursor.
    fn peek_infix(&self) -> Option<(BinOp, u8, u8)> {
        let op = match self.peek_kind()? {
            TokenKind::And => BinOp::And,
            TokenKind::Or => BinOp::Or,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            TokenKind::Less => BinOp::Lt,
            TokenKind::Greater => BinOp::Gt,
            TokenKind::LessEq => BinOp::Le,
            TokenKind::GreaterEq => BinOp::Ge,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Caret => BinOp::Pow,
            _ => return None,
        };
        let lbp = if op.is_logical() {
            bp::LOGICAL
        } else if matches!(op, BinOp::Eq | BinOp::Ne) {
            bp::EQUALITY
        } else if op.is_comparison() {
            bp::COMPARISON
        } else if matches!(op, BinOp::Add | BinOp::Sub) {
            bp::ADDITIVE
        } else if matches!(op, BinOp::Mul | BinOp::Div) {
            bp::MULTIPLICATIVE
        } else {
            bp::POWER
        };
        Some((op, lbp, lbp + 1))
    }

    /// Literals, names, parenthesized expressions, unary minus.
    fn parse_prefix(&mut self) -> Result<AstNode> {
        match self.peek_kind() {
            Some(TokenKind::Minus) => {
                let minus = self.advance()?;
                let expr = self.parse_expr_bp(bp::PREFIX)?;
                Ok(AstNode::new(
                    AstKind::Neg {
                        expr: Box::new(expr),
                    },
                    minus.line,
                ))
            }
            Some(TokenKind::IntNum(_)) => {
                let token = self.advance()?;
                let TokenKind::IntNum(value) = token.kind else {
                    return Err(self.unexpected());
                };
                Ok(AstNode::literal(
                    AstKind::IntLit(value),
                    token.line,
                    PrimType::Int,
                    Value::Int(value),
                ))
            }
            Some(TokenKind::FloatNum(_)) => {
                let token = self.advance()?;
                let TokenKind::FloatNum(value) = token.kind else {
                    return Err(self.unexpected());
                };
                Ok(AstNode::literal(
                    AstKind::FloatLit(value),
                    token.line,
                    PrimType::Float,
                    Value::Float(value),
                ))
            }
            Some(TokenKind::Str(_)) => {
                let token = self.advance()?;
                let TokenKind::Str(raw) = token.kind else {
                    return Err(self.unexpected());
                };
                // Strip the surrounding quotes exactly once, then resolve the
                // only escape the lexer admits.
                let text = raw[1..raw.len() - 1].replace("\\\"", "\"");
                Ok(AstNode::literal(
                    AstKind::StringLit(text.clone()),
                    token.line,
                    PrimType::String,
                    Value::Str(text),
                ))
            }
            Some(TokenKind::True) => {
                let token = self.advance()?;
                Ok(AstNode::literal(
                    AstKind::BoolLit(true),
                    token.line,
                    PrimType::Bool,
                    Value::Bool(true),
                ))
            }
            Some(TokenKind::False) => {
                let token = self.advance()?;
                Ok(AstNode::literal(
                    AstKind::BoolLit(false),
                    token.line,
                    PrimType::Bool,
                    Value::Bool(false),
                ))
            }
            Some(TokenKind::Name(_)) => {
                let (name, line) = self.expect_name()?;
                Ok(AstNode::new(AstKind::VarRef { name }, line))
            }
            Some(TokenKind::LParen) => {
                self.advance()?;
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }
}
