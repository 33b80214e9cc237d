use std::time::Duration;

use crate::error::{LifecycleError, Result};

/// Engine-wide configuration, loaded from the environment at startup and
/// passed down through [`EngineContext`](crate::lifecycle::EngineContext).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Connection string for the Postgres-backed store.
    pub database_url: String,
    /// Per-request timeout for outbound webhook deliveries.
    pub webhook_timeout_ms: u64,
    /// Upper bound on concurrently executing branches of a parallel plan node.
    pub max_parallel_branches: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/taskcycle_development".to_string(),
            webhook_timeout_ms: 5_000,
            max_parallel_branches: 8,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) =
            std::env::var("TASKCYCLE_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL"))
        {
            config.database_url = db_url;
        }

        if let Ok(timeout) = std::env::var("TASKCYCLE_WEBHOOK_TIMEOUT_MS") {
            config.webhook_timeout_ms = timeout.parse().map_err(|e| {
                LifecycleError::Configuration(format!("Invalid webhook_timeout_ms: {e}"))
            })?;
        }

        if let Ok(branches) = std::env::var("TASKCYCLE_MAX_PARALLEL_BRANCHES") {
            config.max_parallel_branches = branches.parse().map_err(|e| {
                LifecycleError::Configuration(format!("Invalid max_parallel_branches: {e}"))
            })?;
        }

        Ok(config)
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_millis(self.webhook_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.webhook_timeout_ms, 5_000);
        assert_eq!(config.max_parallel_branches, 8);
        assert_eq!(config.webhook_timeout(), Duration::from_millis(5_000));
    }

    #[test]
    fn test_invalid_timeout_is_a_configuration_error() {
        std::env::set_var("TASKCYCLE_WEBHOOK_TIMEOUT_MS", "not-a-number");
        let result = EngineConfig::from_env();
        std::env::remove_var("TASKCYCLE_WEBHOOK_TIMEOUT_MS");
        assert!(matches!(result, Err(LifecycleError::Configuration(_))));
    }
}
