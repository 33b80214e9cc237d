//! # Signal Registry
//!
//! Registry mapping a task-type name to its list of in-process signal
//! handlers, fired on every task state change.
//!
//! The registry is explicitly constructed and passed down through
//! [`EngineContext`](crate::lifecycle::EngineContext) rather than hidden
//! behind a process-wide singleton, keeping initialization order and test
//! isolation explicit. Registration is append-only and expected to happen
//! during startup; reads on the notification hot path take a shared lock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::models::TaskRecord;

/// In-process callback invoked on every state change of a matching task.
#[async_trait]
pub trait TaskSignal: Send + Sync {
    /// Handle a state change. Errors are logged with the handler's identity
    /// and swallowed by the dispatcher; they never reach the mutating caller.
    async fn handle(
        &self,
        task: &TaskRecord,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Handler name used in notification reports and failure logs.
    fn name(&self) -> &str {
        "unnamed_signal"
    }
}

/// Append-only registry of signal handlers keyed by task-type name.
#[derive(Clone, Default)]
pub struct SignalRegistry {
    signal_map: Arc<RwLock<HashMap<String, Vec<Arc<dyn TaskSignal>>>>>,
}

impl SignalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a task type. There is no uniqueness constraint:
    /// registering the same handler twice makes it fire twice.
    pub fn register(&self, task_type: impl Into<String>, handler: Arc<dyn TaskSignal>) {
        let task_type = task_type.into();
        debug!(task_type = %task_type, handler = handler.name(), "registering signal handler");
        self.signal_map
            .write()
            .entry(task_type)
            .or_default()
            .push(handler);
    }

    /// Handlers registered for a task type; empty if none. Never fails.
    pub fn handlers_for(&self, task_type: &str) -> Vec<Arc<dyn TaskSignal>> {
        self.signal_map
            .read()
            .get(task_type)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of handlers registered for a task type.
    pub fn handler_count(&self, task_type: &str) -> usize {
        self.signal_map
            .read()
            .get(task_type)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopSignal;

    #[async_trait]
    impl TaskSignal for NoopSignal {
        async fn handle(
            &self,
            _task: &TaskRecord,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Ok(())
        }

        fn name(&self) -> &str {
            "noop"
        }
    }

    #[test]
    fn test_unregistered_type_has_no_handlers() {
        let registry = SignalRegistry::new();
        assert!(registry.handlers_for("export").is_empty());
        assert_eq!(registry.handler_count("export"), 0);
    }

    #[test]
    fn test_duplicate_registration_is_kept() {
        let registry = SignalRegistry::new();
        let handler: Arc<dyn TaskSignal> = Arc::new(NoopSignal);
        registry.register("export", Arc::clone(&handler));
        registry.register("export", handler);
        assert_eq!(registry.handler_count("export"), 2);
    }

    #[test]
    fn test_registration_is_per_type() {
        let registry = SignalRegistry::new();
        registry.register("export", Arc::new(NoopSignal));
        assert_eq!(registry.handler_count("export"), 1);
        assert_eq!(registry.handler_count("import"), 0);
    }
}
