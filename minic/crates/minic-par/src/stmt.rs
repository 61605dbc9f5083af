//! Statement and control-flow parsing.

use minic_lex::TokenKind;
use minic_util::Result;

use crate::ast::{AstKind, AstNode, PrimType};
use crate::Parser;

impl Parser<'_> {
    /// Parses statements until end of input (`inside_braces == false`) or
    /// the closing brace of a block. Every program and block body must hold
    /// at least one statement.
    pub(crate) fn parse_statement_list(&mut self, inside_braces: bool) -> Result<Vec<AstNode>> {
        let mut children = Vec::new();
        loop {
            match self.peek_kind() {
                None => break,
                Some(TokenKind::RBrace) if inside_braces => break,
                Some(_) => children.push(self.parse_expression_line()?),
            }
        }
        if children.is_empty() {
            return Err(self.unexpected());
        }
        Ok(children)
    }

    /// One `statement ';'` line or one brace-delimited control statement.
    fn parse_expression_line(&mut self) -> Result<AstNode> {
        match self.peek_kind() {
            Some(TokenKind::If) => self.parse_if_statement(),
            Some(TokenKind::While) => self.parse_while_statement(),
            Some(TokenKind::For) => self.parse_for_statement(),
            _ => {
                let statement = self.parse_statement()?;
                self.expect(&TokenKind::Semicolon)?;
                Ok(statement)
            }
        }
    }

    /// A simple statement without its terminator: declaration,
    /// reassignment, or print.
    fn parse_statement(&mut self) -> Result<AstNode> {
        match self.peek_kind() {
            Some(kind) if kind.is_type_keyword() => self.parse_declaration(),
            Some(TokenKind::Name(_)) => {
                let (name, line) = self.expect_name()?;
                let value = self.parse_assignment()?;
                Ok(AstNode::new(
                    AstKind::Reassign {
                        name,
                        value: Box::new(value),
                    },
                    line,
                ))
            }
            Some(TokenKind::Print) => {
                let print_token = self.advance()?;
                self.expect(&TokenKind::LParen)?;
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(AstNode::new(
                    AstKind::Print {
                        expr: Box::new(expr),
                    },
                    print_token.line,
                ))
            }
            _ => Err(self.unexpected()),
        }
    }

    /// `<type> NAME` with an optional `= expr` initializer.
    fn parse_declaration(&mut self) -> Result<AstNode> {
        let type_token = self.advance()?;
        let (name, line) = self.expect_name()?;

        let init = if self.check(&TokenKind::Assign) {
            Some(Box::new(self.parse_assignment()?))
        } else {
            None
        };

        let (kind, ty) = match type_token.kind {
            TokenKind::IntDcl => (AstKind::IntDcl { name, init }, PrimType::Int),
            TokenKind::FloatDcl => (AstKind::FloatDcl { name, init }, PrimType::Float),
            TokenKind::StringDcl => (AstKind::StringDcl { name, init }, PrimType::String),
            TokenKind::BoolDcl => (AstKind::BoolDcl { name, init }, PrimType::Bool),
            _ => return Err(self.unexpected()),
        };

        let mut node = AstNode::new(kind, line);
        node.ty = Some(ty);
        Ok(node)
    }

    /// `= expr`, wrapped in an `Assign` node.
    fn parse_assignment(&mut self) -> Result<AstNode> {
        let assign_token = self.expect(&TokenKind::Assign)?;
        let expr = self.parse_expr()?;
        Ok(AstNode::new(
            AstKind::Assign {
                expr: Box::new(expr),
            },
            assign_token.line,
        ))
    }

    /// `{ program }`.
    fn parse_braced_block(&mut self) -> Result<AstNode> {
        let open = self.expect(&TokenKind::LBrace)?;
        let children = self.parse_statement_list(true)?;
        self.expect(&TokenKind::RBrace)?;
        Ok(AstNode::new(
            AstKind::Block {
                children,
                scope: None,
            },
            open.line,
        ))
    }

    /// `( cond )` for an if/elif/while header, with the grammar-level
    /// condition check applied.
    fn parse_condition(&mut self) -> Result<AstNode> {
        self.expect(&TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.check_condition(&cond)?;
        self.expect(&TokenKind::RParen)?;
        Ok(cond)
    }

    /// Conditions must be a bool literal, a variable reference, a
    /// comparison, or a logical operation. Types are checked later.
    fn check_condition(&self, cond: &AstNode) -> Result<()> {
        if cond.kind.is_condition() {
            Ok(())
        } else {
            Err(self.error("invalid bool condition encountered".to_owned(), cond.line))
        }
    }

    fn parse_if_statement(&mut self) -> Result<AstNode> {
        let if_token = self.expect(&TokenKind::If)?;
        let cond = self.parse_condition()?;
        let body = self.parse_braced_block()?;
        let if_branch = AstNode::new(
            AstKind::If {
                cond: Box::new(cond),
                body: Box::new(body),
            },
            if_token.line,
        );

        let mut elif_branches = Vec::new();
        while self.check(&TokenKind::Elif) {
            let elif_token = self.advance()?;
            let cond = self.parse_condition()?;
            let body = self.parse_braced_block()?;
            elif_branches.push(AstNode::new(
                AstKind::Elif {
                    cond: Box::new(cond),
                    body: Box::new(body),
                },
                elif_token.line,
            ));
        }

        let else_branch = if self.check(&TokenKind::Else) {
            let else_token = self.advance()?;
            let body = self.parse_braced_block()?;
            Some(Box::new(AstNode::new(
                AstKind::Else {
                    body: Box::new(body),
                },
                else_token.line,
            )))
        } else {
            None
        };

        Ok(AstNode::new(
            AstKind::IfStatement {
                if_branch: Box::new(if_branch),
                elif_branches,
                else_branch,
            },
            if_token.line,
        ))
    }

    fn parse_while_statement(&mut self) -> Result<AstNode> {
        let while_token = self.expect(&TokenKind::While)?;
        let cond = self.parse_condition()?;
        let body = self.parse_braced_block()?;
        Ok(AstNode::new(
            AstKind::WhileStatement {
                cond: Box::new(cond),
                body: Box::new(body),
            },
            while_token.line,
        ))
    }

    /// `for ( statement ; cond ; statement ) { program }`. The init slot
    /// must be a declaration and the update slot a reassignment.
    fn parse_for_statement(&mut self) -> Result<AstNode> {
        let for_token = self.expect(&TokenKind::For)?;
        self.expect(&TokenKind::LParen)?;

        let init = self.parse_statement()?;
        if init.kind.as_declaration().is_none() {
            return Err(self.error(
                "invalid for loop variable initialization".to_owned(),
                init.line,
            ));
        }
        self.expect(&TokenKind::Semicolon)?;

        let cond = self.parse_expr()?;
        self.check_condition(&cond)?;
        self.expect(&TokenKind::Semicolon)?;

        let update = self.parse_statement()?;
        if !matches!(update.kind, AstKind::Reassign { .. }) {
            return Err(self.error("invalid for loop update statement".to_owned(), update.line));
        }
        self.expect(&TokenKind::RParen)?;

        let body = self.parse_braced_block()?;
        Ok(AstNode::new(
            AstKind::ForStatement {
                init: Box::new(init),
                cond: Box::new(cond),
                update: Box::new(update),
                body: Box::new(body),
            },
            for_token.line,
        ))
    }
}
