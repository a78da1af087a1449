use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::transpiler::error::TranslateError;

/// Any failure of the source-to-C pipeline. Each one aborts the translation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

pub type Result<T> = std::result::Result<T, Error>;
