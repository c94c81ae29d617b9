use crate::ExecOp;
use std::sync::{Arc, Mutex};

/// A wrapper around the statement log that provides a clean API for tests
pub struct ExecLog {
    ops: Arc<Mutex<Vec<ExecOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<ExecOp>>>) -> Self {
        Self { ops }
    }

    /// Get the number of logged statements
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    /// Check if any statement's text matches the given predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.ops.lock().unwrap().iter().any(|op| predicate(&op.cql))
    }

    /// Count statements whose text matches the given predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| predicate(&op.cql))
            .count()
    }

    pub fn has_insert(&self) -> bool {
        self.any(|cql| cql.starts_with("INSERT"))
    }

    pub fn has_update(&self) -> bool {
        self.any(|cql| cql.starts_with("UPDATE"))
    }

    pub fn has_delete(&self) -> bool {
        self.any(|cql| cql.starts_with("DELETE"))
    }

    pub fn has_select(&self) -> bool {
        self.any(|cql| cql.starts_with("SELECT"))
    }

    /// Text of every logged statement, oldest first
    pub fn statements(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.cql.clone())
            .collect()
    }

    /// Clear the log
    pub fn clear(&mut self) {
        self.ops.lock().unwrap().clear();
    }

    /// Remove and return the first statement from the log
    /// Returns None if the log is empty
    pub fn pop(&mut self) -> Option<ExecOp> {
        let mut ops = self.ops.lock().unwrap();
        if ops.is_empty() {
            None
        } else {
            Some(ops.remove(0))
        }
    }

    /// Remove the first statement and return its text
    pub fn pop_cql(&mut self) -> Option<String> {
        self.pop().map(|op| op.cql)
    }
}
