//! # Notification Dispatch
//!
//! Fan-out of task state changes to the webhook (if the task's metadata names
//! one) and to every in-process signal handler registered for the task's
//! type.
//!
//! All branches run concurrently and each is individually fault-isolated: a
//! failing or panicking branch is captured as an outcome, logged with its
//! identity, and never prevents the other branches from completing. The
//! aggregate is returned as a [`NotificationReport`] and logged; the contract
//! to mutating callers is "best-effort notify, never fail".

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::TaskRecord;
use crate::registry::SignalRegistry;

use super::webhook::WebhookClient;

/// Outcome of one notification branch (the webhook or one signal handler).
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    /// Branch identity: `webhook:<url>` or `signal:<handler name>`.
    pub target: String,
    /// `None` on success, the failure description otherwise.
    pub error: Option<String>,
}

/// Aggregate result of one notification fan-out.
#[derive(Debug, Clone, Default)]
pub struct NotificationReport {
    pub outcomes: Vec<DeliveryOutcome>,
}

impl NotificationReport {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_none()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }
}

/// Dispatches state-change notifications for one engine instance.
pub struct SignalDispatcher {
    registry: SignalRegistry,
    webhook_client: Arc<dyn WebhookClient>,
}

impl SignalDispatcher {
    pub fn new(registry: SignalRegistry, webhook_client: Arc<dyn WebhookClient>) -> Self {
        Self {
            registry,
            webhook_client,
        }
    }

    /// Notify all interested parties of the task's current state.
    ///
    /// `extra` keys are merged into the webhook payload on top of the task
    /// snapshot. This method never fails; per-branch outcomes are captured in
    /// the returned report.
    pub async fn emit(
        &self,
        task: &TaskRecord,
        extra: Option<&Map<String, Value>>,
    ) -> NotificationReport {
        let task = Arc::new(task.clone());
        let mut branches: Vec<(String, JoinHandle<Result<(), String>>)> = Vec::new();

        if let Some(url) = task.webhook_url() {
            let url = url.to_string();
            let payload = task.snapshot(extra);
            let client = Arc::clone(&self.webhook_client);
            let target = format!("webhook:{url}");
            branches.push((
                target,
                tokio::spawn(async move {
                    client
                        .post_json(&url, &payload)
                        .await
                        .map_err(|e| e.to_string())
                }),
            ));
        }

        for handler in self.registry.handlers_for(&task.task_type) {
            let target = format!("signal:{}", handler.name());
            let task = Arc::clone(&task);
            branches.push((
                target,
                tokio::spawn(async move {
                    handler.handle(&task).await.map_err(|e| e.to_string())
                }),
            ));
        }

        let mut report = NotificationReport::default();
        for (target, handle) in branches {
            let error = match handle.await {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e),
                Err(join_error) => Some(format!("handler aborted: {join_error}")),
            };
            if let Some(err) = &error {
                warn!(
                    task_id = %task.uid,
                    task_type = %task.task_type,
                    branch = %target,
                    error = %err,
                    "notification branch failed"
                );
            }
            report.outcomes.push(DeliveryOutcome { target, error });
        }

        debug!(
            task_id = %task.uid,
            task_type = %task.task_type,
            delivered = report.delivered(),
            failed = report.failed(),
            "notification dispatch complete"
        );
        report
    }
}
