use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::status::TaskStatus;

/// Immutable record of one status transition in a task's history.
///
/// Records are append-only: once pushed onto a task's log they are never
/// mutated or removed. Structural equality exists for deduplication and
/// testing only, never for business logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLogRecord {
    pub reported_at: DateTime<Utc>,
    pub message: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub duration_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TaskLogRecord {
    pub fn new(status: TaskStatus, message: impl Into<String>) -> Self {
        Self {
            reported_at: Utc::now(),
            message: message.into(),
            status,
            duration_ms: 0,
            data: None,
        }
    }

    pub fn with_data(status: TaskStatus, message: impl Into<String>, data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::new(status, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = TaskLogRecord::new(TaskStatus::Init, "initialized");
        assert_eq!(record.status, TaskStatus::Init);
        assert_eq!(record.message, "initialized");
        assert_eq!(record.duration_ms, 0);
        assert!(record.data.is_none());
    }

    #[test]
    fn test_structural_equality_covers_data() {
        let a = TaskLogRecord::with_data(
            TaskStatus::Done,
            "finished",
            serde_json::json!({"items": 3}),
        );
        let mut b = a.clone();
        assert_eq!(a, b);

        b.data = Some(serde_json::json!({"items": 4}));
        assert_ne!(a, b);
    }
}
