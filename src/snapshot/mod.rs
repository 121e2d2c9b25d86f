// Snapshot management for stepping through a finished run

use crate::memory::store::VariableStore;
use crate::parser::ast::SourceLocation;

/// Snapshot of execution state after one step
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub store: VariableStore,
    pub source_location: SourceLocation,
    /// Source-like rendering of the statement that produced this state
    pub description: String,
    /// Variable written by that statement, if any
    pub changed: Option<String>,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // This is a rough estimate
        let changed = self.changed.as_ref().map_or(0, String::len);
        self.store.estimated_size() + self.description.len() + changed + 64
    }
}

/// Append-only record of snapshots with a byte budget
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history.
    ///
    /// On failure returns the memory total the snapshot would have reached.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), usize> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(self.current_memory + snapshot_size);
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

/// Why a history move did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryBoundary {
    AtStart,
    AtEnd,
}

/// A cursor over recorded snapshots, for stepping backward and forward
#[derive(Debug)]
pub struct History {
    manager: SnapshotManager,
    position: usize,
}

impl History {
    pub fn new(manager: SnapshotManager) -> Self {
        History {
            manager,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.manager.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manager.is_empty()
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.manager.get(self.position)
    }

    pub fn step_forward(&mut self) -> Result<(), HistoryBoundary> {
        if self.position + 1 >= self.manager.len() {
            return Err(HistoryBoundary::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), HistoryBoundary> {
        if self.position == 0 {
            return Err(HistoryBoundary::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.manager.len().saturating_sub(1);
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.manager.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::value::Value;

    fn snapshot(step: i64) -> Snapshot {
        let mut store = VariableStore::new();
        store.set("x", Value::Integer(step));
        Snapshot {
            store,
            source_location: SourceLocation::new(step as usize, 1),
            description: format!("x := {}", step),
            changed: Some("x".to_string()),
        }
    }

    #[test]
    fn test_push_respects_limit() {
        let size = snapshot(1).estimated_size();
        let mut manager = SnapshotManager::new(size * 2);

        assert!(manager.push(snapshot(1)).is_ok());
        assert!(manager.push(snapshot(2)).is_ok());
        assert_eq!(manager.push(snapshot(3)), Err(size * 3));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.memory_usage(), size * 2);
    }

    #[test]
    fn test_history_navigation() {
        let mut manager = SnapshotManager::new(usize::MAX);
        for step in 0..3 {
            manager.push(snapshot(step)).unwrap();
        }
        let mut history = History::new(manager);

        assert_eq!(history.step_backward(), Err(HistoryBoundary::AtStart));
        assert!(history.step_forward().is_ok());
        assert_eq!(history.current().unwrap().store.get("x"), Some(Value::Integer(1)));

        history.jump_to_end();
        assert!(history.is_at_end());
        assert_eq!(history.position(), 2);
        assert_eq!(history.step_forward(), Err(HistoryBoundary::AtEnd));

        history.rewind_to_start();
        assert_eq!(history.position(), 0);
    }
}
