//! # Task Type Registry
//!
//! Explicit registry of the task-type names known to the engine, populated
//! once at startup by each task-capable module. Reference resolution consults
//! it before touching the store, replacing any runtime reflection over live
//! types.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

/// Set of task-type names eligible for reference resolution.
#[derive(Clone, Default)]
pub struct TaskTypeRegistry {
    known: Arc<RwLock<HashSet<String>>>,
}

impl TaskTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task-type name. Idempotent.
    pub fn register(&self, task_type: impl Into<String>) {
        let task_type = task_type.into();
        debug!(task_type = %task_type, "registering task type");
        self.known.write().insert(task_type);
    }

    pub fn is_registered(&self, task_type: &str) -> bool {
        self.known.read().contains(task_type)
    }

    /// All known type names, sorted for stable output.
    pub fn known_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.known.read().iter().cloned().collect();
        types.sort();
        types
    }
}
