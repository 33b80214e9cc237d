//! Postgres-backed task store.
//!
//! Tasks live in a single `taskcycle_tasks` table: the filterable identity
//! columns are materialized, the full record (logs, plans, metadata) is kept
//! as one JSONB document so nested structures round-trip losslessly.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::TaskRecord;

use super::{StorageError, TaskFilter, TaskStore};

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS taskcycle_tasks (
    task_type  TEXT        NOT NULL,
    uid        UUID        NOT NULL,
    owner_id   UUID,
    status     TEXT        NOT NULL,
    is_deleted BOOLEAN     NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    document   JSONB       NOT NULL,
    PRIMARY KEY (task_type, uid)
)";

impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        StorageError::Database(error.to_string())
    }
}

/// Task store over a Postgres connection pool.
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Create the backing table if it does not exist.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    fn decode(row: &sqlx::postgres::PgRow) -> Result<TaskRecord, StorageError> {
        let document: Value = row.try_get("document")?;
        Ok(serde_json::from_value(document)?)
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn save(&self, record: &TaskRecord) -> Result<(), StorageError> {
        let document = serde_json::to_value(record)?;
        sqlx::query(
            r"INSERT INTO taskcycle_tasks
                  (task_type, uid, owner_id, status, is_deleted, created_at, updated_at, document)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
              ON CONFLICT (task_type, uid) DO UPDATE
                  SET owner_id = $3, status = $4, is_deleted = $5,
                      updated_at = $7, document = $8",
        )
        .bind(&record.task_type)
        .bind(record.uid)
        .bind(record.owner_id)
        .bind(record.status.to_string())
        .bind(record.is_deleted)
        .bind(record.created_at)
        .bind(record.updated_at)
        .bind(&document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        task_type: &str,
        uid: Uuid,
    ) -> Result<Option<TaskRecord>, StorageError> {
        let row = sqlx::query(
            "SELECT document FROM taskcycle_tasks
             WHERE task_type = $1 AND uid = $2 AND is_deleted = FALSE",
        )
        .bind(task_type)
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn find_all(
        &self,
        task_type: &str,
        filter: &TaskFilter,
    ) -> Result<Vec<TaskRecord>, StorageError> {
        let mut sql = String::from("SELECT document FROM taskcycle_tasks WHERE task_type = $1");
        let mut next_param = 2;

        if !filter.include_deleted {
            sql.push_str(" AND is_deleted = FALSE");
        }
        if filter.owner_id.is_some() {
            sql.push_str(&format!(" AND owner_id = ${next_param}"));
            next_param += 1;
        }
        if filter.status.is_some() {
            sql.push_str(&format!(" AND status = ${next_param}"));
        }
        sql.push_str(" ORDER BY created_at");

        let mut query = sqlx::query(&sql).bind(task_type);
        if let Some(owner_id) = filter.owner_id {
            query = query.bind(owner_id);
        }
        if let Some(status) = filter.status {
            query = query.bind(status.to_string());
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(Self::decode).collect()
    }
}
