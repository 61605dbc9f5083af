//! minic - the MiniLang compiler CLI.
//!
//! Reads one source file, runs the front-end pipeline, and either writes
//! the TAC listing next to the input (or to `--output`) or prints a
//! numbered listing to stdout with `--emit-tac`. Exit code 0 on success,
//! 1 on I/O failure or compile error.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// MiniLang compiler front-end
#[derive(Parser, Debug)]
#[command(name = "minic")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles MiniLang source to three-address code", long_about = None)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Output path for the TAC listing (default: the input path with a
    /// `.tac` extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print numbered TAC lines to stdout instead of writing a file
    #[arg(long)]
    emit_tac: bool,

    /// Dump tokens, the AST, and the scope tables to stderr
    #[arg(short, long, env = "MINIC_VERBOSE")]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot read {}", cli.input.display()))?;

    let options = minic_drv::Options {
        verbose: cli.verbose,
    };
    let instrs = match minic_drv::compile_with(&source, &options) {
        Ok(instrs) => instrs,
        Err(e) => bail!("{}", e.render()),
    };

    if cli.emit_tac {
        for (n, instr) in instrs.iter().enumerate() {
            println!("{}) {}", n, instr);
        }
        return Ok(());
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));
    std::fs::write(&output, minic_drv::render(&instrs))
        .with_context(|| format!("cannot write {}", output.display()))?;
    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("tac")
}
