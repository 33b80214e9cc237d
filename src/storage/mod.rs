//! # Persistence Store Contract
//!
//! The engine treats storage as an external collaborator: a store durably
//! saves a task's full state (including nested log sequences and execution
//! plans, losslessly) and can be queried by identifier and by owner. Writes
//! go through immediately; the engine keeps no cache of task state across
//! calls.
//!
//! Two implementations ship with the crate: [`InMemoryTaskStore`] for tests
//! and embedded use, and the Postgres-backed [`PgTaskStore`] behind the
//! `postgres` feature.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{TaskRecord, TaskStatus};

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::InMemoryTaskStore;
#[cfg(feature = "postgres")]
pub use postgres::PgTaskStore;

/// Errors from the persistence store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Read-side filter for listing tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Restrict to tasks owned by this principal.
    pub owner_id: Option<Uuid>,
    /// Restrict to tasks in this status.
    pub status: Option<TaskStatus>,
    /// Include soft-deleted records. Off by default.
    pub include_deleted: bool,
}

impl TaskFilter {
    pub fn owned_by(owner_id: Uuid) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Durable read/write contract the lifecycle engine requires.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist the full record, inserting or replacing by (type, uid).
    async fn save(&self, record: &TaskRecord) -> Result<(), StorageError>;

    /// Fetch one record by type and identifier. Soft-deleted records are
    /// treated as absent.
    async fn find_by_id(
        &self,
        task_type: &str,
        uid: Uuid,
    ) -> Result<Option<TaskRecord>, StorageError>;

    /// List records of a type matching the filter, ordered by creation time.
    async fn find_all(
        &self,
        task_type: &str,
        filter: &TaskFilter,
    ) -> Result<Vec<TaskRecord>, StorageError>;
}
