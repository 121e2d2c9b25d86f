//! # Introduction
//!
//! `spi` interprets a small Pascal subset: a single `PROGRAM` with `VAR`
//! declarations of `INTEGER` or `REAL` variables and a `BEGIN ... END` body of
//! assignments over integer and real arithmetic. Running a program leaves a
//! set of variable bindings, which the binary prints sorted by name.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter → VariableStore
//!                                      ↓
//!                                  Snapshots → TUI
//! ```
//!
//! 1. [`parser`] tokenises the source and builds a typed syntax tree.
//! 2. [`interpreter`] walks the tree once and writes assignments into a
//!    caller-owned [`memory::store::VariableStore`].
//! 3. [`snapshot`] optionally records the store after every assignment so a
//!    finished run can be stepped through in [`ui`].
//! 4. [`config`] turns command-line arguments into [`config::Options`].
//!
//! ```
//! use spi::memory::store::VariableStore;
//!
//! let mut store = VariableStore::new();
//! spi::interpret("PROGRAM P; BEGIN x := 7 DIV 2 END.", &mut store).unwrap();
//! assert_eq!(store.get("x").map(|v| v.to_string()), Some("3".to_string()));
//! ```

pub mod config;
pub mod error;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;

pub use error::Error;

use interpreter::engine::Interpreter;
use interpreter::errors::RuntimeError;
use memory::store::VariableStore;
use parser::ast::Program;
use parser::parse::Parser;
use snapshot::{History, SnapshotManager};
use tracing::info;

/// Lex and parse `source` into a syntax tree.
pub fn parse(source: &str) -> Result<Program, Error> {
    let program = Parser::new(source)?.parse_program()?;
    info!(target: "spi", program = %program.name, "parsed");
    Ok(program)
}

/// Evaluate an already-parsed program, writing its bindings into `store`.
pub fn evaluate(program: &Program, store: &mut VariableStore) -> Result<(), Error> {
    Interpreter::new(store).run(program)?;
    info!(target: "spi", bindings = store.len(), "evaluated");
    Ok(())
}

/// Lex, parse and evaluate `source`, leaving the bindings in `store`.
///
/// The first error at any stage ends the run. Bindings made before a runtime
/// error stay in the store, so callers that must not show partial results
/// should discard it on `Err`.
pub fn interpret(source: &str, store: &mut VariableStore) -> Result<Program, Error> {
    let program = parse(source)?;
    evaluate(&program, store)?;
    Ok(program)
}

/// A finished (or aborted) run with its snapshot history
#[derive(Debug)]
pub struct Recording {
    pub program: Program,
    pub history: History,
    /// Final bindings, up to the failing statement if there was one
    pub store: VariableStore,
    /// Runtime error that stopped the run early
    pub error: Option<RuntimeError>,
}

/// Parse `source` and run it while recording a snapshot after every
/// assignment.
///
/// Lexical and syntax errors are returned as `Err`; a runtime error is kept in
/// the [`Recording`] alongside the partial history.
pub fn record(source: &str, snapshot_limit: usize) -> Result<Recording, Error> {
    let program = parse(source)?;

    let mut store = VariableStore::new();
    let mut manager = SnapshotManager::new(snapshot_limit);
    let error = Interpreter::with_history(&mut store, &mut manager)
        .run(&program)
        .err();
    info!(
        target: "spi",
        snapshots = manager.len(),
        bytes = manager.memory_usage(),
        failed = error.is_some(),
        "recorded"
    );

    Ok(Recording {
        program,
        history: History::new(manager),
        store,
        error,
    })
}
