use std::fmt;
use std::future::Future;
use std::time::Duration;

use log::warn;
use tokio::time::sleep;

/// Run `operation` up to `max_attempts` times with exponential backoff.
///
/// The delay before attempt n (n >= 2) is `base_delay * 2^(n-2)`, so the
/// defaults used by the extractor wait 2s then 4s. The delay is a plain
/// suspension; dropping the returned future cancels any in-flight attempt.
///
/// When the final attempt fails its error is returned unchanged, so callers
/// see the true root cause rather than a "retries exhausted" wrapper.
pub async fn with_retry<T, E, F, Fut>(
    mut operation: F,
    max_attempts: u32,
    base_delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts => {
                let delay = base_delay * 2u32.pow(attempt - 1);
                warn!(
                    "attempt {}/{} failed: {}; retrying in {:?}",
                    attempt, max_attempts, err, delay
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
