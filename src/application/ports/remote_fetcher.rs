use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

/// Downloads audio referenced by URL. Callers are responsible for trust checks.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, max_bytes: usize) -> Result<Bytes, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("body exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("response body is empty")]
    EmptyBody,
    #[error("failed to read body: {0}")]
    Body(String),
}
