use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use url::Url;

use crate::application::ports::{FetchError, RemoteFetcher};

/// Downloads referenced audio over HTTP(S).
///
/// Redirects are not followed so a trusted URL cannot bounce to another host.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| FetchError::RequestFailed(format!("client: {}", e)))?;
        Ok(Self { client })
    }
}

fn map_request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl RemoteFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url, max_bytes: usize) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, host = url.host_str().unwrap_or_default(), "Audio fetch failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(length) = response.content_length() {
            if length > max_bytes as u64 {
                return Err(FetchError::TooLarge { limit: max_bytes });
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Body(e.to_string())
                }
            })?;
            if body.len() + chunk.len() > max_bytes {
                return Err(FetchError::TooLarge { limit: max_bytes });
            }
            body.extend_from_slice(&chunk);
        }

        if body.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        tracing::debug!(bytes = body.len(), "Remote audio downloaded");

        Ok(body.freeze())
    }
}
