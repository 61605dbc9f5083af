//! minic-sem - Semantic analysis for MiniLang.
//!
//! A single top-down pass over the parsed AST that resolves names against
//! the scope tree, assigns every expression node its primitive type, inserts
//! the implicit int-to-float widening nodes, folds constants where it can,
//! and rejects ill-typed programs. On success the AST satisfies everything
//! the TAC generator assumes, which is why TAC generation is total.

mod analyzer;
mod edge_cases;

pub use analyzer::SemanticAnalyzer;
