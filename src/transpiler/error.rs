use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error(
        "UnsupportedConstructError at line {line}, column {column}: {construct} in {statement} has no C lowering"
    )]
    UnsupportedConstruct {
        construct: String,
        statement: &'static str,
        line: usize,
        column: usize,
    },
}

pub type TranslateResult<T> = Result<T, TranslateError>;
