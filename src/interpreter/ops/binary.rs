use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{BinOp, SourceLocation};

impl Interpreter<'_> {
    /// Apply a binary operator to two already-evaluated operands
    pub(crate) fn apply_binary(
        &self,
        op: BinOp,
        left: Value,
        right: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinOp::Add => {
                self.checked_arith(left, right, op, i64::checked_add, |a, b| a + b, location)
            }
            BinOp::Sub => {
                self.checked_arith(left, right, op, i64::checked_sub, |a, b| a - b, location)
            }
            BinOp::Mul => {
                self.checked_arith(left, right, op, i64::checked_mul, |a, b| a * b, location)
            }
            BinOp::IntDiv => self.integer_divide(left, right, location),
            BinOp::RealDiv => self.real_divide(left, right, location),
        }
    }

    /// Integer with integer stays integer (overflow is an error); any real
    /// operand makes the result real.
    #[inline]
    fn checked_arith(
        &self,
        left: Value,
        right: Value,
        op: BinOp,
        int_op: fn(i64, i64) -> Option<i64>,
        real_op: fn(f64, f64) -> f64,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => {
                int_op(a, b)
                    .map(Value::Integer)
                    .ok_or_else(|| RuntimeError::IntegerOverflow {
                        operation: format!("{} {} {}", a, op.symbol(), b),
                        location,
                    })
            }
            _ => {
                let result = real_op(left.to_real(), right.to_real());
                finite_real(result, left, op, right, location)
            }
        }
    }

    /// `DIV`: truncates toward zero and always yields an integer
    fn integer_divide(
        &self,
        left: Value,
        right: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if right.is_zero() {
            return Err(RuntimeError::DivisionByZero { location });
        }

        let overflow = || RuntimeError::IntegerOverflow {
            operation: format!("{} DIV {}", left, right),
            location,
        };

        match (left, right) {
            // i64 division already truncates toward zero
            (Value::Integer(a), Value::Integer(b)) => {
                a.checked_div(b).map(Value::Integer).ok_or_else(overflow)
            }
            _ => {
                let quotient = (left.to_real() / right.to_real()).trunc();
                // i64::MAX as f64 rounds up to 2^63, which is itself out of range
                let in_range = quotient >= i64::MIN as f64 && quotient < i64::MAX as f64;
                if quotient.is_finite() && in_range {
                    Ok(Value::Integer(quotient as i64))
                } else {
                    Err(overflow())
                }
            }
        }
    }

    /// `/`: both operands widened to real, result always real
    fn real_divide(
        &self,
        left: Value,
        right: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if right.is_zero() {
            return Err(RuntimeError::DivisionByZero { location });
        }
        let quotient = left.to_real() / right.to_real();
        finite_real(quotient, left, BinOp::RealDiv, right, location)
    }
}

/// Reals must stay finite so every printed value reads back as a number
fn finite_real(
    result: f64,
    left: Value,
    op: BinOp,
    right: Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    if result.is_finite() {
        Ok(Value::Real(result))
    } else {
        Err(RuntimeError::RealOverflow {
            operation: format!("{} {} {}", left, op.symbol(), right),
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::Interpreter;
    use crate::interpreter::errors::RuntimeError;
    use crate::memory::store::VariableStore;
    use crate::memory::value::Value;
    use crate::parser::ast::{BinOp, SourceLocation};

    fn apply(op: BinOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
        let mut store = VariableStore::new();
        let interpreter = Interpreter::new(&mut store);
        interpreter.apply_binary(op, left, right, SourceLocation::new(1, 1))
    }

    #[test]
    fn test_kind_propagation() {
        use Value::{Integer, Real};
        assert_eq!(apply(BinOp::Add, Integer(2), Integer(3)), Ok(Integer(5)));
        assert_eq!(apply(BinOp::Mul, Integer(2), Real(1.5)), Ok(Real(3.0)));
        assert_eq!(apply(BinOp::Sub, Real(0.5), Integer(1)), Ok(Real(-0.5)));
    }

    #[test]
    fn test_division_distinction() {
        use Value::{Integer, Real};
        assert_eq!(apply(BinOp::IntDiv, Integer(7), Integer(2)), Ok(Integer(3)));
        assert_eq!(apply(BinOp::RealDiv, Integer(7), Integer(2)), Ok(Real(3.5)));
        assert_eq!(apply(BinOp::RealDiv, Integer(8), Integer(2)), Ok(Real(4.0)));
    }

    #[test]
    fn test_integer_division_truncates_toward_zero() {
        use Value::{Integer, Real};
        assert_eq!(apply(BinOp::IntDiv, Integer(-7), Integer(2)), Ok(Integer(-3)));
        assert_eq!(apply(BinOp::IntDiv, Integer(7), Integer(-2)), Ok(Integer(-3)));
        assert_eq!(apply(BinOp::IntDiv, Integer(-7), Integer(-2)), Ok(Integer(3)));
        assert_eq!(apply(BinOp::IntDiv, Real(7.5), Integer(2)), Ok(Integer(3)));
        assert_eq!(apply(BinOp::IntDiv, Real(-7.5), Integer(2)), Ok(Integer(-3)));
    }

    #[test]
    fn test_division_by_zero() {
        use Value::{Integer, Real};
        for (op, right) in [
            (BinOp::IntDiv, Integer(0)),
            (BinOp::IntDiv, Real(0.0)),
            (BinOp::RealDiv, Integer(0)),
            (BinOp::RealDiv, Real(0.0)),
        ] {
            assert!(matches!(
                apply(op, Integer(1), right),
                Err(RuntimeError::DivisionByZero { .. })
            ));
        }
    }

    #[test]
    fn test_integer_overflow() {
        use Value::Integer;
        assert!(matches!(
            apply(BinOp::Add, Integer(i64::MAX), Integer(1)),
            Err(RuntimeError::IntegerOverflow { .. })
        ));
        assert!(matches!(
            apply(BinOp::IntDiv, Integer(i64::MIN), Integer(-1)),
            Err(RuntimeError::IntegerOverflow { .. })
        ));
        assert!(matches!(
            apply(BinOp::IntDiv, Value::Real(1e300), Integer(1)),
            Err(RuntimeError::IntegerOverflow { .. })
        ));
    }

    #[test]
    fn test_real_overflow() {
        use Value::{Integer, Real};
        for (op, left, right) in [
            (BinOp::Mul, Real(1e300), Real(1e300)),
            (BinOp::Add, Real(f64::MAX), Real(f64::MAX)),
            (BinOp::Sub, Real(-f64::MAX), Real(f64::MAX)),
            (BinOp::RealDiv, Real(1e300), Real(1e-300)),
        ] {
            assert!(
                matches!(apply(op, left, right), Err(RuntimeError::RealOverflow { .. })),
                "{:?} {:?} {:?}",
                op,
                left,
                right
            );
        }
        assert!(apply(BinOp::Mul, Real(1e150), Real(1e150)).is_ok());
    }
}
