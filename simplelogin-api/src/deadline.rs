// simplelogin-api/src/deadline.rs
use crate::error::Error;
use std::future::Future;
use std::time::Duration;

/// Run `future` within `limit`. On expiry the in-flight request is dropped
/// and [`Error::DeadlineExceeded`] is returned.
pub async fn with_deadline<T, E, F>(limit: Duration, future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<Error>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(Error::DeadlineExceeded(limit).into()),
    }
}
