//! Notification fan-out: webhook delivery and signal handler dispatch.

pub mod dispatcher;
pub mod webhook;

pub use dispatcher::{DeliveryOutcome, NotificationReport, SignalDispatcher};
pub use webhook::{HttpWebhookClient, WebhookClient, WebhookError};
