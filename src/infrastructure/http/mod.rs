mod reqwest_fetcher;

pub use reqwest_fetcher::ReqwestFetcher;

use std::time::Duration;

use reqwest::StatusCode;

/// How a provider's non-success status should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    /// Provider outage, throttling or any 5xx.
    Unavailable,
    /// The provider refused this request; resending it unchanged will not help.
    Rejected,
}

impl ProviderStatus {
    pub fn classify(status: StatusCode) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS
            || status == StatusCode::REQUEST_TIMEOUT
            || !status.is_client_error()
        {
            ProviderStatus::Unavailable
        } else {
            ProviderStatus::Rejected
        }
    }
}

/// Client for outbound provider calls; every request carries `timeout`.
pub fn provider_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .build()
}

pub(crate) async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    format!("status {}: {}", status, truncate(&body, 512))
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
