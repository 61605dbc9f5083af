//! minic-drv - Compiler pipeline orchestration.
//!
//! Runs the phases in order over one source string:
//!
//! ```text
//! source -> [lex] -> tokens -> [parse + scopes] -> AST
//!        -> [semantic analysis] -> annotated AST -> [tac] -> instructions
//! ```
//!
//! The first error anywhere aborts the pipeline; later phases never run.
//! The binary half (`main.rs`) handles file I/O and argument parsing; this
//! library half is what the integration tests drive.

use minic_lex::Lexer;
use minic_par::Parser;
use minic_sem::SemanticAnalyzer;
use minic_tac::{Instr, TacGen};
use minic_util::{CompileError, LineIndex, Result};
use tracing::debug;

pub use minic_tac::render;

/// Driver options beyond the source itself.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Dump tokens, the AST, and the scope tables to stderr.
    pub verbose: bool,
}

/// Compiles a source string to TAC with default options.
pub fn compile(source: &str) -> Result<Vec<Instr>> {
    compile_with(source, &Options::default())
}

/// Compiles a source string to TAC.
pub fn compile_with(source: &str, options: &Options) -> Result<Vec<Instr>> {
    let lines = LineIndex::new(source);

    debug!(bytes = source.len(), "lexing");
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();
    if lexer.error_count() > 0 {
        // The lexer recovers to keep scanning, but the pipeline refuses a
        // stream that carried errors. The first offending character names
        // the diagnostic.
        let offending = lexer.error_char().unwrap_or('\0');
        let line = lexer.error_line().unwrap_or(0);
        return Err(CompileError::lex(
            format!("illegal character '{}'", offending),
            line,
            lines.line(line),
        ));
    }
    if options.verbose {
        eprintln!("tokens:");
        for token in &tokens {
            eprintln!("  {:?} (line {})", token.kind, token.line);
        }
    }

    debug!(count = tokens.len(), "parsing");
    let mut program = Parser::new(tokens, &lines).parse()?;
    if options.verbose {
        eprint!("ast:\n{}", program.root.dump());
        eprint!("scopes:\n{}", program.scopes.dump());
    }

    debug!("semantic analysis");
    SemanticAnalyzer::new(&mut program.scopes, &lines).analyze(&mut program.root)?;

    debug!("tac generation");
    Ok(TacGen::new().generate(&program.root))
}
