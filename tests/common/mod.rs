//! Shared test doubles: recording/failing webhook clients and an
//! instrumented store that logs resolution order and can delay lookups.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use taskcycle::{
    EngineConfig, EngineContext, ExecutionPlan, InMemoryTaskStore, PlanNode, StorageError,
    TaskFilter, TaskRecord, TaskReference, TaskStore, WebhookClient, WebhookError,
};

/// Webhook client that records every delivery.
#[derive(Default)]
pub struct RecordingWebhookClient {
    pub calls: Mutex<Vec<(String, Value)>>,
}

impl RecordingWebhookClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl WebhookClient for RecordingWebhookClient {
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), WebhookError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        Ok(())
    }
}

/// Webhook client whose every delivery fails.
pub struct FailingWebhookClient;

#[async_trait]
impl WebhookClient for FailingWebhookClient {
    async fn post_json(&self, _url: &str, _body: &Value) -> Result<(), WebhookError> {
        Err(WebhookError::Status(503))
    }
}

/// Store wrapper that counts saves, records the order in which tasks are
/// resolved, and optionally delays individual lookups to make completion
/// ordering observable.
pub struct InstrumentedStore {
    inner: InMemoryTaskStore,
    saves: AtomicUsize,
    resolved: Mutex<Vec<Uuid>>,
    delays: HashMap<Uuid, Duration>,
}

impl InstrumentedStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryTaskStore::new(),
            saves: AtomicUsize::new(0),
            resolved: Mutex::new(Vec::new()),
            delays: HashMap::new(),
        }
    }

    /// Delay `find_by_id` for this uid by `ms` milliseconds.
    pub fn with_delay(mut self, uid: Uuid, ms: u64) -> Self {
        self.delays.insert(uid, Duration::from_millis(ms));
        self
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Uids in the order their lookups completed.
    pub fn resolved_order(&self) -> Vec<Uuid> {
        self.resolved.lock().unwrap().clone()
    }
}

impl Default for InstrumentedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InstrumentedStore {
    async fn save(&self, record: &TaskRecord) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(record).await
    }

    async fn find_by_id(
        &self,
        task_type: &str,
        uid: Uuid,
    ) -> Result<Option<TaskRecord>, StorageError> {
        if let Some(delay) = self.delays.get(&uid) {
            tokio::time::sleep(*delay).await;
        }
        self.resolved.lock().unwrap().push(uid);
        self.inner.find_by_id(task_type, uid).await
    }

    async fn find_all(
        &self,
        task_type: &str,
        filter: &TaskFilter,
    ) -> Result<Vec<TaskRecord>, StorageError> {
        self.inner.find_all(task_type, filter).await
    }
}

/// Store that rejects every operation.
pub struct FailingStore;

#[async_trait]
impl TaskStore for FailingStore {
    async fn save(&self, _record: &TaskRecord) -> Result<(), StorageError> {
        Err(StorageError::Database("store offline".into()))
    }

    async fn find_by_id(
        &self,
        _task_type: &str,
        _uid: Uuid,
    ) -> Result<Option<TaskRecord>, StorageError> {
        Err(StorageError::Database("store offline".into()))
    }

    async fn find_all(
        &self,
        _task_type: &str,
        _filter: &TaskFilter,
    ) -> Result<Vec<TaskRecord>, StorageError> {
        Err(StorageError::Database("store offline".into()))
    }
}

/// Engine context over the given store and a recording webhook client.
pub fn recording_ctx(
    store: Arc<dyn TaskStore>,
) -> (Arc<EngineContext>, Arc<RecordingWebhookClient>) {
    let client = Arc::new(RecordingWebhookClient::new());
    let ctx = EngineContext::new(store, client.clone(), EngineConfig::default());
    (ctx, client)
}

/// Fresh record of `task_type`; with `with_plan`, an empty serial plan is
/// attached so `start_processing` is a no-op success instead of an error.
pub fn child_task(task_type: &str, with_plan: bool) -> TaskRecord {
    let mut record = TaskRecord::new(task_type, None);
    if with_plan {
        record.references = Some(ExecutionPlan::default());
    }
    record
}

/// Plan leaf pointing at a record.
pub fn leaf(record: &TaskRecord) -> PlanNode {
    PlanNode::Task(TaskReference::new(record.uid, record.task_type.clone()))
}
