use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::clients::traits::{
    CompletionError, CompletionRequest, CompletionResponse, CompletionService,
};

/// Wraps a completion service with bounded exponential backoff.
///
/// Only errors reporting `is_retryable()` are retried.
pub struct RetryingCompletionService {
    inner: Arc<dyn CompletionService>,
    max_retries: u32,
    base_delay_ms: u64,
}

impl RetryingCompletionService {
    pub fn new(inner: Arc<dyn CompletionService>, max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            inner,
            max_retries,
            base_delay_ms,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.base_delay_ms.saturating_mul(1u64 << attempt.min(16)))
    }
}

#[async_trait]
impl CompletionService for RetryingCompletionService {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let mut attempt = 0;
        loop {
            match self.inner.complete(request.clone()).await {
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "Completion attempt {} failed ({}), retrying in {}ms",
                        attempt + 1,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
