//! Statement execution implementation
//!
//! Compound statements run their children in order with no early exit;
//! assignments evaluate the right-hand side and then overwrite the target's
//! binding; the empty statement does nothing.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::*;
use tracing::trace;

impl Interpreter<'_> {
    /// Execute a single statement
    pub(crate) fn execute_statement(&mut self, stmt: &Statement) -> Result<(), RuntimeError> {
        match stmt {
            Statement::Compound(compound) => {
                self.current_location = compound.location;
                self.execute_compound(compound)
            }
            Statement::Assign {
                target,
                value,
                location,
            } => {
                self.current_location = *location;
                self.execute_assignment(stmt, target, value)
            }
            Statement::NoOp => Ok(()),
        }
    }

    fn execute_assignment(
        &mut self,
        stmt: &Statement,
        target: &VariableRef,
        value: &Expr,
    ) -> Result<(), RuntimeError> {
        let result = self.evaluate_expr(value)?;
        let previous = self.store.set(&target.name, result);
        trace!(
            target: "spi::interpreter",
            name = %target.name,
            value = %result,
            previous = ?previous,
            line = target.location.line,
            "assign"
        );
        self.record_step(stmt, &target.name)
    }
}
