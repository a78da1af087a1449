pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod transpiler;

pub use config::Config;
pub use error::{Error, Result};

use ast::Program;
use transpiler::Transpiler;

/// Tokenizes and parses a complete source text.
pub fn parse_source(source: &str, config: &Config) -> Result<Program> {
    let tokens = lexer::tokenize_with(source, config)?;
    Ok(parser::parse_tokens(tokens)?)
}

/// Runs the whole pipeline and returns the C translation.
pub fn translate_source(source: &str, config: &Config) -> Result<String> {
    let program = parse_source(source, config)?;
    Ok(Transpiler.transpile(&program)?)
}
