// Execution engine for the Pascal interpreter

use crate::interpreter::errors::RuntimeError;
use crate::memory::store::VariableStore;
use crate::parser::ast::*;
use crate::snapshot::{Snapshot, SnapshotManager};
use tracing::trace;

/// Tree-walking interpreter over one parsed [`Program`].
///
/// The variable store is owned by the caller and lent to the interpreter for
/// the duration of the run; assignments are its only side effect.
pub struct Interpreter<'a> {
    /// Bindings written by assignments
    pub(crate) store: &'a mut VariableStore,

    /// Snapshot record, when the run is being recorded for stepping through
    snapshots: Option<&'a mut SnapshotManager>,

    /// Current source location being executed
    pub(crate) current_location: SourceLocation,

    /// Number of assignments executed so far
    steps: usize,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter writing into `store`
    pub fn new(store: &'a mut VariableStore) -> Self {
        Interpreter {
            store,
            snapshots: None,
            current_location: SourceLocation::new(1, 1),
            steps: 0,
        }
    }

    /// Create an interpreter that also records a snapshot after every assignment
    pub fn with_history(store: &'a mut VariableStore, snapshots: &'a mut SnapshotManager) -> Self {
        Interpreter {
            snapshots: Some(snapshots),
            ..Self::new(store)
        }
    }

    /// Run the program from start to finish
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        trace!(target: "spi::interpreter", program = %program.name, "run");
        self.current_location = program.location;
        self.take_snapshot(|| format!("PROGRAM {}", program.name), None)?;

        self.execute_block(&program.block)
    }

    /// Declarations first (they have no effect), then the body
    fn execute_block(&mut self, block: &Block) -> Result<(), RuntimeError> {
        for decl in &block.declarations {
            trace!(
                target: "spi::interpreter",
                name = %decl.name,
                var_type = %decl.var_type,
                "declaration (no effect)"
            );
        }
        self.execute_compound(&block.body)
    }

    pub(crate) fn execute_compound(&mut self, compound: &Compound) -> Result<(), RuntimeError> {
        for stmt in &compound.statements {
            self.execute_statement(stmt)?;
        }
        Ok(())
    }

    /// Get the current source location
    pub fn current_location(&self) -> SourceLocation {
        self.current_location
    }

    /// Number of assignments executed
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub(crate) fn record_step(
        &mut self,
        stmt: &Statement,
        target: &str,
    ) -> Result<(), RuntimeError> {
        self.steps += 1;
        self.take_snapshot(|| stmt.to_string(), Some(target))
    }

    /// Snapshot the store; `describe` only runs when history is being recorded
    fn take_snapshot(
        &mut self,
        describe: impl FnOnce() -> String,
        changed: Option<&str>,
    ) -> Result<(), RuntimeError> {
        let Some(manager) = self.snapshots.as_deref_mut() else {
            return Ok(());
        };

        let snapshot = Snapshot {
            store: self.store.clone(),
            source_location: self.current_location,
            description: describe(),
            changed: changed.map(str::to_string),
        };
        let limit = manager.memory_limit();
        manager
            .push(snapshot)
            .map_err(|current| RuntimeError::SnapshotLimitExceeded { current, limit })
    }
}
