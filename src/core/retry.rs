//! Retry utility for operations against resources that appear asynchronously
//!
//! The server creates some objects (notably project-versions mapped from a
//! scan upload) in the background, so a lookup issued right after an upload
//! can miss. Callers describe how patient to be with a `RetryPolicy` instead
//! of hardcoding attempt counts at the call site.

use std::time::Duration;
use tokio::time::sleep;

/// Configurable retry policy for async operations
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // Matches the window the server usually needs to map an uploaded scan
        Self {
            max_attempts: 4,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

/// Execute an async operation, sleeping `policy.delay` between failed attempts.
///
/// Returns the first success, or the last error once `policy.max_attempts`
/// attempts are exhausted.
pub async fn retry_async<F, T, E, Fut>(
    operation_name: &str,
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_error = None;

    for attempt in 0..policy.max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) => {
                last_error = Some(error);
                if attempt < policy.max_attempts - 1 {
                    log::debug!(
                        "Operation '{}' failed on attempt {}/{}, retrying in {:?}: {}",
                        operation_name,
                        attempt + 1,
                        policy.max_attempts,
                        policy.delay,
                        last_error.as_ref().unwrap()
                    );
                    sleep(policy.delay).await;
                }
            }
        }
    }

    Err(last_error.unwrap())
}
