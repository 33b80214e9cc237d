//! # Task Lifecycle
//!
//! The central state machine: every mutation of a persisted task flows
//! through a [`TaskLifecycle`] handle. Each status-changing operation appends
//! exactly one log record and then runs one persist-and-notify cycle, so a
//! task's log history is an exact append-only trace of its transitions.
//!
//! ## Concurrency
//!
//! Operations on one handle are ordered by call order. Concurrent mutation of
//! the same task through separate handles is not assumed safe; callers must
//! serialize (per-task lock, or funnel mutation through a single owner).
//!
//! ## Failure model
//!
//! The "fire" half of a transition (persist + notify) is swallowed:
//! [`TaskLifecycle::save_and_emit`] logs store and notification failures and
//! cannot fail observably. Orchestration calls (`start_processing`, reference
//! resolution) propagate errors to the caller.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::error;
use uuid::Uuid;

use crate::error::{LifecycleError, Result};
use crate::models::{
    ExecutionPlan, PlanNode, TaskLogRecord, TaskRecord, TaskReference, TaskStatus,
};

use super::context::EngineContext;
use super::runner::run_plan;

/// Partial update applied in one persisted revision by
/// [`TaskLifecycle::update_and_emit`].
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub status: Option<TaskStatus>,
    pub progress: Option<i64>,
    pub report: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_progress(mut self, progress: i64) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = Some(report.into());
        self
    }
}

/// Live handle on a persisted task, wired to the engine's store, registries,
/// and notification dispatch.
pub struct TaskLifecycle {
    record: TaskRecord,
    ctx: Arc<EngineContext>,
}

impl TaskLifecycle {
    /// Create a fresh draft task of a given type. Nothing is persisted until
    /// the first operation (or an explicit `save_and_emit`).
    pub fn create(
        ctx: Arc<EngineContext>,
        task_type: impl Into<String>,
        metadata: Option<Map<String, Value>>,
    ) -> Self {
        Self::attach(ctx, TaskRecord::new(task_type, metadata))
    }

    /// Wrap an already-loaded record.
    pub fn attach(ctx: Arc<EngineContext>, record: TaskRecord) -> Self {
        Self { record, ctx }
    }

    /// Load a persisted task through reference resolution.
    pub async fn load(ctx: Arc<EngineContext>, task_type: &str, uid: Uuid) -> Result<Self> {
        TaskReference::new(uid, task_type).resolve(&ctx).await
    }

    pub fn record(&self) -> &TaskRecord {
        &self.record
    }

    pub fn into_record(self) -> TaskRecord {
        self.record
    }

    /// Set the status, log `"Status changed to <status>"`, persist, notify.
    pub async fn save_status(&mut self, status: TaskStatus, extra: Option<&Map<String, Value>>) {
        self.record.status = status;
        self.add_log(
            TaskLogRecord::new(status, format!("Status changed to {status}")),
            true,
            extra,
        )
        .await;
    }

    /// Append a reference to this task's execution plan (creating a serial
    /// plan if none exists yet), log it, persist, notify.
    pub async fn add_reference(
        &mut self,
        reference: TaskReference,
        extra: Option<&Map<String, Value>>,
    ) {
        let message = format!("Added reference to task {}", reference.task_id);
        self.record
            .references
            .get_or_insert_with(ExecutionPlan::default)
            .push(PlanNode::Task(reference));
        self.add_log(TaskLogRecord::new(self.record.status, message), true, extra)
            .await;
    }

    /// Set the report text, log it verbatim, persist, notify.
    pub async fn save_report(
        &mut self,
        report: impl Into<String>,
        extra: Option<&Map<String, Value>>,
    ) {
        let report = report.into();
        self.record.report = Some(report.clone());
        self.add_log(TaskLogRecord::new(self.record.status, report), true, extra)
            .await;
    }

    /// Append a log record verbatim. With `emit` the persist-and-notify cycle
    /// runs immediately; without it the record stays buffered in memory until
    /// a later flush.
    pub async fn add_log(
        &mut self,
        record: TaskLogRecord,
        emit: bool,
        extra: Option<&Map<String, Value>>,
    ) {
        self.record.logs.push(record);
        if emit {
            self.save_and_emit_with(extra).await;
        }
    }

    /// Execute this task's plan. Fails with [`LifecycleError::NotImplemented`]
    /// when the task has no plan: leaf tasks drive their own work instead of
    /// delegating here.
    pub async fn start_processing(&self) -> Result<()> {
        let plan = self
            .record
            .references
            .as_ref()
            .ok_or(LifecycleError::NotImplemented)?;
        run_plan(&self.ctx, plan).await
    }

    /// Status-guarded start: refuses with [`LifecycleError::AlreadyProcessing`]
    /// if the task is already `processing`, otherwise transitions to
    /// `processing`. Callers serializing mutation per task (see module docs)
    /// get an idempotent start out of this.
    pub async fn try_begin_processing(&mut self) -> Result<()> {
        if self.record.status == TaskStatus::Processing {
            return Err(LifecycleError::AlreadyProcessing {
                task_id: self.record.uid,
            });
        }
        self.save_status(TaskStatus::Processing, None).await;
        Ok(())
    }

    /// Persist the record and dispatch notifications concurrently. Failures
    /// on either side are logged and swallowed; this operation cannot fail
    /// observably. Callers needing strong durability guarantees must go
    /// through the store directly.
    pub async fn save_and_emit(&mut self) {
        self.save_and_emit_with(None).await;
    }

    async fn save_and_emit_with(&mut self, extra: Option<&Map<String, Value>>) {
        self.record.touch();
        let (saved, _report) = tokio::join!(
            self.ctx.store.save(&self.record),
            self.ctx.dispatcher.emit(&self.record, extra),
        );
        if let Err(err) = saved {
            error!(
                task_id = %self.record.uid,
                task_type = %self.record.task_type,
                error = %err,
                "failed to persist task state"
            );
        }
    }

    /// Bulk partial update, visible as a single persisted revision.
    ///
    /// A `Done` status defaults `progress` to 100 unless explicitly set. A
    /// report value is additionally appended as a log record (without its own
    /// emit) before the final persist-and-notify, so the report and the field
    /// update land together.
    pub async fn update_and_emit(&mut self, update: TaskUpdate) {
        let TaskUpdate {
            status,
            progress,
            report,
            metadata,
        } = update;

        let progress = match (status, progress) {
            (Some(TaskStatus::Done), None) => Some(100),
            _ => progress,
        };

        if let Some(status) = status {
            self.record.status = status;
        }
        if let Some(progress) = progress {
            self.record.progress = progress;
        }
        if let Some(metadata) = metadata {
            self.record.metadata = Some(metadata);
        }
        if let Some(report) = report {
            self.record.report = Some(report.clone());
            self.add_log(TaskLogRecord::new(self.record.status, report), false, None)
                .await;
        }

        self.save_and_emit().await;
    }
}
