//! # Task Record
//!
//! The persisted task entity: base identity fields shared by every stored
//! entity plus the lifecycle state tracked by the engine.
//!
//! ## Overview
//!
//! A `TaskRecord` is the single source of truth for one task. The engine
//! performs no in-memory caching across calls: every mutating operation on
//! [`TaskLifecycle`](crate::lifecycle::TaskLifecycle) appends to `logs` and
//! writes the whole record through to the store. External code never mutates
//! a record directly.
//!
//! ## Invariants
//!
//! - `logs` is append-only and monotonically non-decreasing in length.
//! - Every status transition appends exactly one log record before persist.
//! - Deletion is soft: `is_deleted` is set, the row survives.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::log_record::TaskLogRecord;
use super::plan::ExecutionPlan;
use super::status::TaskStatus;

fn default_progress() -> i64 {
    -1
}

/// Persisted task entity with lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    // Base identity fields shared by all persisted entities.
    pub uid: Uuid,
    /// Type discriminator; the key used for signal and reference lookup.
    pub task_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    // Lifecycle state.
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    /// Percentage complete; -1 means "unknown".
    #[serde(default = "default_progress")]
    pub progress: i64,
    #[serde(default)]
    pub logs: Vec<TaskLogRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ExecutionPlan>,
}

impl TaskRecord {
    /// Create a fresh draft task of the given type.
    pub fn new(task_type: impl Into<String>, metadata: Option<Map<String, Value>>) -> Self {
        let now = Utc::now();
        Self {
            uid: Uuid::new_v4(),
            task_type: task_type.into(),
            owner_id: None,
            created_at: now,
            updated_at: now,
            is_deleted: false,
            metadata,
            status: TaskStatus::Draft,
            report: None,
            progress: default_progress(),
            logs: Vec::new(),
            references: None,
        }
    }

    pub fn with_owner(mut self, owner_id: Uuid) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Refresh `updated_at`; called before every persist.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether the record has gone stale (not updated for `days` days).
    pub fn expired(&self, days: i64) -> bool {
        Utc::now() - self.updated_at > Duration::days(days)
    }

    /// Webhook URL from metadata, if any. Both `webhook` and `webhook_url`
    /// keys are honored.
    pub fn webhook_url(&self) -> Option<&str> {
        let metadata = self.metadata.as_ref()?;
        metadata
            .get("webhook")
            .or_else(|| metadata.get("webhook_url"))
            .and_then(Value::as_str)
    }

    /// JSON snapshot of the task: every field plus any caller-provided extra
    /// keys. This is the shape delivered to webhooks and serialized into HTTP
    /// responses; `task_type` rides along as the discriminator.
    pub fn snapshot(&self, extra: Option<&Map<String, Value>>) -> Value {
        let mut snapshot = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct with named fields always serializes to an object.
            _ => Map::new(),
        };
        if let Some(extra) = extra {
            for (key, value) in extra {
                snapshot.insert(key.clone(), value.clone());
            }
        }
        Value::Object(snapshot)
    }
}
