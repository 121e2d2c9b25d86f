//! Expression evaluation implementation
//!
//! Expressions are evaluated post-order: both operands of a binary operator
//! are evaluated, left first, before the operator is applied. Operator
//! semantics live in [`crate::interpreter::ops`].

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::*;

impl Interpreter<'_> {
    /// Evaluate an expression to a value
    pub fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Number(literal, _) => Ok(Value::from(*literal)),

            Expr::Variable(var) => {
                self.store
                    .get(&var.name)
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: var.name.clone(),
                        location: var.location,
                    })
            }

            Expr::UnaryOp {
                op,
                operand,
                location,
            } => {
                let value = self.evaluate_expr(operand)?;
                self.apply_unary(*op, value, *location)
            }

            Expr::BinaryOp {
                op,
                left,
                right,
                location,
            } => {
                let left_val = self.evaluate_expr(left)?;
                let right_val = self.evaluate_expr(right)?;
                self.apply_binary(*op, left_val, right_val, *location)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::engine::Interpreter;
    use crate::interpreter::errors::RuntimeError;
    use crate::memory::store::VariableStore;
    use crate::memory::value::Value;
    use crate::parser::ast::*;
    use crate::parser::parse::Parser;

    fn eval(text: &str) -> Result<Value, RuntimeError> {
        let source = format!("PROGRAM P; BEGIN result := {} END.", text);
        let program = Parser::new(&source).unwrap().parse_program().unwrap();
        let mut store = VariableStore::new();
        Interpreter::new(&mut store).run(&program)?;
        Ok(store.get("result").unwrap())
    }

    #[test]
    fn test_precedence_and_grouping() {
        assert_eq!(eval("2 + 3 * 4"), Ok(Value::Integer(14)));
        assert_eq!(eval("(2 + 3) * 4"), Ok(Value::Integer(20)));
        assert_eq!(eval("10 - 3 - 2"), Ok(Value::Integer(5)));
    }

    #[test]
    fn test_unary_chains() {
        assert_eq!(eval("- -5"), Ok(Value::Integer(5)));
        assert_eq!(eval("-+-5"), Ok(Value::Integer(5)));
        assert_eq!(eval("- - -2.5"), Ok(Value::Real(-2.5)));
        assert_eq!(eval("-(3 - 10)"), Ok(Value::Integer(7)));
    }

    #[test]
    fn test_undefined_variable() {
        let err = eval("1 + missing").unwrap_err();
        assert_eq!(
            err,
            RuntimeError::UndefinedVariable {
                name: "missing".to_string(),
                location: SourceLocation::new(1, 32),
            }
        );
    }

    #[test]
    fn test_left_operand_error_wins() {
        let err = eval("first / second").unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "first"));
    }
}
