//! Runtime error types for the Pascal interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to lexical or syntax errors).
//!
//! All runtime errors are fatal - the first one aborts the run.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Read of a variable that was never assigned
    #[error("Undefined variable '{name}' at line {}, column {}", .location.line, .location.column)]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// `DIV` or `/` with a zero right operand
    #[error("Division by zero at line {}, column {}", .location.line, .location.column)]
    DivisionByZero { location: SourceLocation },

    /// Integer arithmetic left the `i64` range
    #[error(
        "Integer overflow in {operation} at line {}, column {}",
        .location.line,
        .location.column
    )]
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// Real arithmetic produced an infinite or NaN result
    #[error(
        "Real overflow in {operation} at line {}, column {}",
        .location.line,
        .location.column
    )]
    RealOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// Recorded history outgrew its byte budget
    #[error("Snapshot memory limit exceeded: {current} bytes used, limit is {limit}")]
    SnapshotLimitExceeded { current: usize, limit: usize },
}

impl RuntimeError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RuntimeError::UndefinedVariable { location, .. } => Some(location),
            RuntimeError::DivisionByZero { location } => Some(location),
            RuntimeError::IntegerOverflow { location, .. } => Some(location),
            RuntimeError::RealOverflow { location, .. } => Some(location),
            RuntimeError::SnapshotLimitExceeded { .. } => None,
        }
    }
}
