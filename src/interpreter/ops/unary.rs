use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{SourceLocation, UnOp};

impl Interpreter<'_> {
    /// Apply a unary sign; the operand's kind is preserved
    pub(crate) fn apply_unary(
        &self,
        op: UnOp,
        operand: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match (op, operand) {
            (UnOp::Plus, value) => Ok(value),
            (UnOp::Minus, Value::Integer(n)) => {
                n.checked_neg()
                    .map(Value::Integer)
                    .ok_or_else(|| RuntimeError::IntegerOverflow {
                        operation: format!("-({})", n),
                        location,
                    })
            }
            (UnOp::Minus, Value::Real(r)) => Ok(Value::Real(-r)),
        }
    }
}
