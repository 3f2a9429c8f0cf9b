use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{ErrorKind, PipelineError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// An error already reduced to what the client is allowed to see.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput
        | ErrorKind::UntrustedSource
        | ErrorKind::EmptyPayload
        | ErrorKind::PayloadTooLarge => StatusCode::BAD_REQUEST,
        ErrorKind::FetchFailed
        | ErrorKind::Io
        | ErrorKind::ProviderUnavailable
        | ErrorKind::ProviderRejected
        | ErrorKind::EmptyTranscription
        | ErrorKind::InvalidClassifierOutput => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Server-side failures get a fixed message; provider bodies stay in the logs.
fn public_detail(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::FetchFailed => "Failed to fetch referenced audio",
        ErrorKind::Io => "Failed to buffer audio",
        ErrorKind::ProviderUnavailable => "Upstream provider unavailable",
        ErrorKind::ProviderRejected => "Upstream provider rejected the request",
        ErrorKind::EmptyTranscription => "No speech could be transcribed from the audio",
        ErrorKind::InvalidClassifierOutput => "Classifier returned invalid output",
        ErrorKind::InvalidInput
        | ErrorKind::UntrustedSource
        | ErrorKind::EmptyPayload
        | ErrorKind::PayloadTooLarge => "Invalid request",
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        let kind = e.kind();
        let status = status_for(kind);

        if kind.is_client_error() {
            tracing::warn!(kind = kind.as_str(), error = %e, "Request rejected");
            Self {
                status,
                detail: e.to_string(),
            }
        } else {
            tracing::error!(kind = kind.as_str(), error = %e, "Request failed");
            Self {
                status,
                detail: public_detail(kind).to_string(),
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
