//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible runtime
//! values in the interpreter: an integer or a real. Declared types are never
//! checked against the value kind, so a variable declared `INTEGER` may hold a
//! real after an assignment such as `x := 7 / 2`.

use crate::parser::ast::Literal;
use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
}

impl Value {
    /// Widen to a real, whatever the kind
    pub fn to_real(self) -> f64 {
        match self {
            Value::Integer(n) => n as f64,
            Value::Real(r) => r,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Integer(n) => *n == 0,
            Value::Real(r) => *r == 0.0,
        }
    }

    /// Short kind name used in the variables pane
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Integer(n) => Value::Integer(n),
            Literal::Real(r) => Value::Real(r),
        }
    }
}

/// Integers print bare; reals print the shortest text that reads back to the
/// same number and always contain a decimal point.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(r) => {
                let text = r.to_string();
                if r.is_finite() && !text.contains('.') {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}
