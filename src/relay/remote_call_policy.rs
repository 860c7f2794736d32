use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::core::interfaces::adapters::LookalikeInferenceService;
use crate::core::models::{ImageBlob, RelaySettings};
use crate::global_constants::LOG_TAG_RELAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteCallPolicy {
    pub attempt_timeout: Duration,
    pub max_retries: u32,
    pub max_concurrent_calls: usize,
}

impl RemoteCallPolicy {
    pub fn from_settings(settings: &RelaySettings) -> Self {
        Self {
            attempt_timeout: settings.remote_timeout(),
            max_retries: settings.remote_max_retries,
            max_concurrent_calls: settings.max_concurrent_calls.max(1),
        }
    }
}

/// Wraps the remote collaborator with a per-attempt timeout, a bounded retry
/// count and a cap on in-flight calls. Callers over the cap wait for a permit.
pub struct GuardedInferenceService {
    inner: Arc<dyn LookalikeInferenceService>,
    permits: Semaphore,
    policy: RemoteCallPolicy,
}

impl GuardedInferenceService {
    pub fn new(inner: Arc<dyn LookalikeInferenceService>, policy: RemoteCallPolicy) -> Self {
        Self {
            inner,
            permits: Semaphore::new(policy.max_concurrent_calls.max(1)),
            policy,
        }
    }
}

#[async_trait]
impl LookalikeInferenceService for GuardedInferenceService {
    async fn find_lookalike(&self, image: &ImageBlob) -> Result<Vec<Value>> {
        let _permit = self
            .permits
            .acquire()
            .await
            .context("Remote call limiter was closed")?;

        let total_attempts = self.policy.max_retries + 1;
        let mut last_error = anyhow::anyhow!("Remote call was never attempted");

        for attempt in 1..=total_attempts {
            match tokio::time::timeout(self.policy.attempt_timeout, self.inner.find_lookalike(image)).await {
                Ok(Ok(output)) => return Ok(output),
                Ok(Err(error)) => {
                    log::warn!(
                        "{} remote attempt {}/{} failed: {:#}",
                        LOG_TAG_RELAY,
                        attempt,
                        total_attempts,
                        error
                    );
                    last_error = error;
                }
                Err(_) => {
                    log::warn!(
                        "{} remote attempt {}/{} timed out after {:?}",
                        LOG_TAG_RELAY,
                        attempt,
                        total_attempts,
                        self.policy.attempt_timeout
                    );
                    last_error = anyhow::anyhow!(
                        "Remote call timed out after {:?}",
                        self.policy.attempt_timeout
                    );
                }
            }
        }

        Err(last_error)
    }
}
