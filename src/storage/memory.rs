//! In-memory task store for tests and embedded use.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::TaskRecord;

use super::{StorageError, TaskFilter, TaskStore};

/// Concurrent in-memory store keyed by (task type, uid).
#[derive(Default)]
pub struct InMemoryTaskStore {
    records: DashMap<(String, Uuid), TaskRecord>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn save(&self, record: &TaskRecord) -> Result<(), StorageError> {
        self.records
            .insert((record.task_type.clone(), record.uid), record.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        task_type: &str,
        uid: Uuid,
    ) -> Result<Option<TaskRecord>, StorageError> {
        Ok(self
            .records
            .get(&(task_type.to_string(), uid))
            .filter(|record| !record.value().is_deleted)
            .map(|record| record.value().clone()))
    }

    async fn find_all(
        &self,
        task_type: &str,
        filter: &TaskFilter,
    ) -> Result<Vec<TaskRecord>, StorageError> {
        let mut matches: Vec<TaskRecord> = self
            .records
            .iter()
            .filter(|entry| entry.key().0 == task_type)
            .map(|entry| entry.value().clone())
            .filter(|record| filter.include_deleted || !record.is_deleted)
            .filter(|record| {
                filter
                    .owner_id
                    .map_or(true, |owner| record.owner_id == Some(owner))
            })
            .filter(|record| filter.status.map_or(true, |status| record.status == status))
            .collect();
        matches.sort_by_key(|record| record.created_at);
        Ok(matches)
    }
}
