//! # Taskcycle
//!
//! Task lifecycle and orchestration engine: tracks the status of
//! long-running, persisted tasks, records an append-only history of status
//! transitions, notifies interested parties (in-process signal handlers and
//! external webhooks) on every state change, and composes tasks into trees
//! that execute their children serially or in parallel.
//!
//! ## Architecture
//!
//! The engine owns lifecycle and orchestration only. Persistence and outbound
//! HTTP are collaborators behind traits ([`TaskStore`], [`WebhookClient`]);
//! the surrounding CRUD/HTTP surface consumes the [`TaskLifecycle`] handle
//! and the entity snapshot shape and is out of scope here.
//!
//! ## Module Organization
//!
//! - [`models`] - Statuses, log records, references, execution plans, the task record
//! - [`lifecycle`] - Engine context, the per-task state machine, the plan runner
//! - [`events`] - Webhook delivery and notification fan-out
//! - [`registry`] - Signal handler and task-type registration
//! - [`storage`] - Store contract plus in-memory and Postgres implementations
//! - [`config`] - Engine configuration
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskcycle::{EngineConfig, EngineContext, InMemoryTaskStore, TaskLifecycle, TaskStatus};
//!
//! # async fn example() {
//! let store = Arc::new(InMemoryTaskStore::new());
//! let ctx = EngineContext::with_http_webhooks(store, EngineConfig::default());
//! ctx.types.register("export");
//!
//! let mut task = TaskLifecycle::create(Arc::clone(&ctx), "export", None);
//! task.save_status(TaskStatus::Processing, None).await;
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod registry;
pub mod storage;

pub use config::EngineConfig;
pub use error::{LifecycleError, Result};
pub use events::{
    DeliveryOutcome, HttpWebhookClient, NotificationReport, SignalDispatcher, WebhookClient,
    WebhookError,
};
pub use lifecycle::{run_plan, EngineContext, TaskLifecycle, TaskUpdate};
pub use models::{
    ExecutionMode, ExecutionPlan, PlanNode, TaskLogRecord, TaskRecord, TaskReference, TaskStatus,
};
pub use registry::{SignalRegistry, TaskSignal, TaskTypeRegistry};
#[cfg(feature = "postgres")]
pub use storage::PgTaskStore;
pub use storage::{InMemoryTaskStore, StorageError, TaskFilter, TaskStore};
