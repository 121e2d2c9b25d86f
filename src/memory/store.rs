//! Flat variable store
//!
//! One mapping from name to [`Value`] for the whole program. There is no
//! block scoping: every assignment anywhere targets this single namespace, and
//! a declaration alone never creates an entry.

use crate::memory::value::Value;
use rustc_hash::FxHashMap;

/// Name → value bindings produced by one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    vars: FxHashMap<String, Value>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable; `None` if it was never assigned
    pub fn get(&self, name: &str) -> Option<Value> {
        self.vars.get(name).copied()
    }

    /// Write a binding, returning the previous value if there was one
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        if let Some(slot) = self.vars.get_mut(name) {
            return Some(std::mem::replace(slot, value));
        }
        self.vars.insert(name.to_string(), value);
        None
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// All bindings in ascending name order
    pub fn sorted(&self) -> Vec<(&str, Value)> {
        let mut bindings: Vec<(&str, Value)> = self
            .vars
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        bindings.sort_unstable_by(|a, b| a.0.cmp(b.0));
        bindings
    }

    /// Rough byte footprint, used to budget recorded history
    pub fn estimated_size(&self) -> usize {
        self.vars
            .keys()
            .map(|name| name.len() + std::mem::size_of::<Value>() + 16)
            .sum()
    }
}
