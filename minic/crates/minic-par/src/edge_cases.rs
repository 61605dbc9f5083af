//! Parser edge cases that span statement and scope handling.

#[cfg(test)]
mod tests {
    use minic_lex::Lexer;
    use minic_util::LineIndex;

    use crate::ast::AstKind;
    use crate::{Parser, Program};

    fn try_parse(source: &str) -> minic_util::Result<Program> {
        let lines = LineIndex::new(source);
        let tokens = Lexer::new(source).tokenize();
        Parser::new(tokens, &lines).parse()
    }

    #[test]
    fn test_error_carries_source_snippet() {
        let err = try_parse("int a = 1;\nint a = 2;").unwrap_err();
        assert_eq!(err.snippet.as_deref(), Some("int a = 2;"));
        assert!(err.render().contains("\t2)\tint a = 2;"));
    }

    #[test]
    fn test_nested_blocks_nest_scopes() {
        let program = try_parse(
            "bool go = true;\n\
             if (go) {\n\
                 int inner = 1;\n\
                 while (go) { print(inner); go = false; }\n\
             }\n",
        )
        .unwrap();
        // Root, if body, while body.
        assert_eq!(program.scopes.len(), 3);
    }

    #[test]
    fn test_sibling_branches_can_reuse_names() {
        let result = try_parse(
            "bool go = true;\n\
             if (go) { int x = 1; print(x); } else { int x = 2; print(x); }\n",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_deep_elif_chain() {
        let program = try_parse(
            "int v = 3;\n\
             if (v == 0) { print(0); }\n\
             elif (v == 1) { print(1); }\n\
             elif (v == 2) { print(2); }\n\
             elif (v == 3) { print(3); }\n\
             else { print(9); }\n",
        )
        .unwrap();
        let AstKind::Block { children, .. } = &program.root.kind else {
            panic!("root should be a block");
        };
        let AstKind::IfStatement { elif_branches, else_branch, .. } = &children[1].kind else {
            panic!("expected if statement");
        };
        assert_eq!(elif_branches.len(), 3);
        assert!(else_branch.is_some());
    }

    #[test]
    fn test_block_statement_needs_no_semicolon() {
        assert!(try_parse("bool a = true;\nwhile (a) { a = false; }\nint b = 1;").is_ok());
    }

    #[test]
    fn test_statement_spanning_lines_keeps_anchor() {
        let program = try_parse("int a =\n    1 +\n    2;").unwrap();
        let AstKind::Block { children, .. } = &program.root.kind else {
            panic!("root should be a block");
        };
        // Declarations are anchored to the declared name.
        assert_eq!(children[0].line, 1);
    }

    #[test]
    fn test_ast_dump_is_indented() {
        let program = try_parse("int a = 1 + 2;").unwrap();
        let dump = program.root.dump();
        assert!(dump.starts_with("Block"));
        assert!(dump.contains("\n  IntDcl a"));
        assert!(dump.contains("Binary +"));
    }

    #[test]
    fn test_scope_dump_lists_bindings() {
        let program = try_parse("int a = 1;\nfloat b = 2.0;").unwrap();
        let dump = program.scopes.dump();
        assert!(dump.contains("scope 0 (root):"));
        assert!(dump.contains("a: int, declared line 1"));
        assert!(dump.contains("b: float, declared line 2"));
    }
}
