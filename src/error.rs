//! Structured error handling for the lifecycle engine.
//!
//! Orchestration failures (reference resolution, plan execution) propagate to
//! the immediate caller. Failures on the notification side of a state change
//! (persist, webhook, signal handlers) are logged and swallowed inside
//! [`TaskLifecycle::save_and_emit`](crate::lifecycle::TaskLifecycle::save_and_emit)
//! and never reach this taxonomy.

use uuid::Uuid;

use crate::storage::StorageError;

/// Errors surfaced by reference resolution and plan execution.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// Reference resolution encountered a type name with no registration.
    #[error("task type {task_type} is not supported")]
    UnknownTaskType { task_type: String },

    /// Reference resolution found no persisted record for a valid type+id pair.
    #[error("no task found with id {task_id} of type {task_type}")]
    TaskNotFound { task_type: String, task_id: Uuid },

    /// `start_processing` was called on a task with no execution plan.
    /// Leaf tasks must drive their own work instead of delegating to a plan.
    #[error("task has no execution plan to process")]
    NotImplemented,

    /// The status compare-and-set guard refused to start an already-running task.
    #[error("task {task_id} is already processing")]
    AlreadyProcessing { task_id: Uuid },

    /// One or more items of an execution plan failed. Serial plans finish the
    /// remaining items before surfacing this; parallel plans join all branches
    /// and collect every failure.
    #[error("execution plan failed: {}", .failures.join("; "))]
    PlanFailed { failures: Vec<String> },

    /// The persistence store rejected an explicit read or write.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Invalid engine configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, LifecycleError>;
