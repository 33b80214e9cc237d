//! Shared engine context: the collaborators every lifecycle operation needs.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::events::{HttpWebhookClient, SignalDispatcher, WebhookClient};
use crate::registry::{SignalRegistry, TaskTypeRegistry};
use crate::storage::TaskStore;

/// Dependency bundle constructed once at startup and passed down to every
/// task handle. Registries are explicit members rather than process-global
/// singletons so initialization order and test isolation stay visible.
pub struct EngineContext {
    pub store: Arc<dyn TaskStore>,
    pub signals: SignalRegistry,
    pub types: TaskTypeRegistry,
    pub dispatcher: SignalDispatcher,
    pub config: EngineConfig,
}

impl EngineContext {
    /// Build a context over the given store and webhook transport.
    pub fn new(
        store: Arc<dyn TaskStore>,
        webhook_client: Arc<dyn WebhookClient>,
        config: EngineConfig,
    ) -> Arc<Self> {
        let signals = SignalRegistry::new();
        let types = TaskTypeRegistry::new();
        let dispatcher = SignalDispatcher::new(signals.clone(), webhook_client);
        Arc::new(Self {
            store,
            signals,
            types,
            dispatcher,
            config,
        })
    }

    /// Context with the production HTTP webhook client.
    pub fn with_http_webhooks(store: Arc<dyn TaskStore>, config: EngineConfig) -> Arc<Self> {
        let client = Arc::new(HttpWebhookClient::new(config.webhook_timeout()));
        Self::new(store, client, config)
    }
}
