//! Crate-level error type
//!
//! Every failure a run can end with, whichever stage raised it. The boundary
//! turns the first one into a single message on stderr and a non-zero exit.

use crate::interpreter::errors::RuntimeError;
use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Terminal error: {0}")]
    Terminal(#[source] std::io::Error),
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Parse(ParseError::Lexical(err))
    }
}

impl Error {
    /// Short classification string used for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Parse(ParseError::Lexical(_)) => "lexical",
            Error::Parse(ParseError::UnexpectedToken { .. }) => "syntax",
            Error::Runtime(RuntimeError::UndefinedVariable { .. }) => "undefined-variable",
            Error::Runtime(RuntimeError::DivisionByZero { .. }) => "division-by-zero",
            Error::Runtime(RuntimeError::IntegerOverflow { .. }) => "integer-overflow",
            Error::Runtime(RuntimeError::RealOverflow { .. }) => "real-overflow",
            Error::Runtime(RuntimeError::SnapshotLimitExceeded { .. }) => "snapshot-limit",
            Error::Io { .. } => "io",
            Error::Terminal(_) => "terminal",
        }
    }
}
