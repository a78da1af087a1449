use thiserror::Error;

/// Grammar failures. Every variant is a SyntaxError pointing at the token where
/// recognition stopped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("SyntaxError at line {line}, column {column}: expected {expected}, found {found}")]
    Unexpected {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },
    #[error(
        "SyntaxError at line {line}, column {column}: '{keyword}' must directly follow an 'if' or 'elif' block"
    )]
    DanglingBranch {
        keyword: &'static str,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    pub fn position(&self) -> (usize, usize) {
        match self {
            Self::Unexpected { line, column, .. } | Self::DanglingBranch { line, column, .. } => {
                (*line, *column)
            }
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
