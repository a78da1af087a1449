use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use py2c::Config;
use py2c::transpiler::Transpiler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Print the parsed program structure.
    Tree,
    /// Emit the C translation.
    Translate,
}

/// Translate an indentation-delimited Python subset into C.
///
/// Exits 0 on success and 1 on any I/O, indentation, syntax or translation
/// failure.
#[derive(Debug, Parser)]
#[command(name = "py2c", version)]
struct Cli {
    /// Source file to read.
    source: PathBuf,
    /// What to do with the parsed program.
    #[arg(value_enum)]
    mode: Mode,
    /// Write the translation here instead of standard output.
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let source = fs::read_to_string(&cli.source)
        .with_context(|| format!("Reading {}", cli.source.display()))?;
    let program = py2c::parse_source(&source, &config)
        .with_context(|| format!("Parsing {}", cli.source.display()))?;

    let output = match cli.mode {
        Mode::Tree => format!("{program:#?}\n"),
        Mode::Translate => Transpiler
            .transpile(&program)
            .with_context(|| format!("Translating {}", cli.source.display()))?,
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Writing {}", path.display()))?;
            info!("wrote {} bytes to {}", output.len(), path.display());
        }
        None => print!("{output}"),
    }
    Ok(())
}
