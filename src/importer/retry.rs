use std::{future::Future, time::Duration};

use tokio::time::sleep;

use crate::{errors::ApiError, warning};

/// Retries allowed after a read timeout before the error is returned.
pub const MAX_TIMEOUT_RETRIES: u32 = 5;

/// Absorbs rate limiting and read timeouts of destination API calls.
///
/// - `429` waits `retry_after + 1` seconds and tries again, without a cap.
/// - a timeout is retried immediately, at most `max_timeout_retries` times.
/// - anything else is returned to the caller untouched.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_timeout_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_timeout_retries: MAX_TIMEOUT_RETRIES,
        }
    }
}

impl RetryPolicy {
    /// Runs `op` until it succeeds or fails with an error the policy does not absorb.
    ///
    /// # Example
    ///
    /// ```
    /// let user = RetryPolicy::default()
    ///     .run(|| destination.current_user())
    ///     .await?;
    /// ```
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut timeouts = 0;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(ApiError::RateLimited { retry_after }) => {
                    let wait = retry_after.saturating_add(1);
                    warning!("Rate limited. Waiting {}s before retrying...", wait);
                    sleep(Duration::from_secs(wait)).await;
                }
                Err(ApiError::Timeout) => {
                    timeouts += 1;
                    if timeouts > self.max_timeout_retries {
                        warning!("Read timed out. Max retries reached.");
                        return Err(ApiError::Timeout);
                    }
                    warning!("Read timed out. Retrying #{}...", timeouts);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
