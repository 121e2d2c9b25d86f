//! Pascal interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: Main interpreter struct and program/block execution
//! - [`errors`]: Runtime error types
//! - `statements` / `expressions`: `impl Interpreter` blocks for each node family
//! - `ops`: arithmetic for binary and unary operators
//!
//! # Execution Model
//!
//! The interpreter walks the syntax tree once, children before parents, and
//! writes into a [`VariableStore`](crate::memory::store::VariableStore) lent to
//! it by the caller. When created with
//! [`Interpreter::with_history`](engine::Interpreter::with_history) it also
//! records a snapshot after every assignment for the step-through viewer.

pub mod constants;
pub mod engine;
pub mod errors;
mod expressions;
mod ops;
mod statements;
