use axum::Json;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::application::services::PipelineError;
use crate::domain::AudioSource;
use crate::presentation::handlers::error::ApiError;
use crate::presentation::state::AppState;

const FILE_FIELD: &str = "file";
const AUDIO_URL_FIELD: &str = "audioUrl";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeReferenceRequest {
    pub audio_url: Option<String>,
}

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

/// Audio source taken from either a multipart upload (`file` or `audioUrl`
/// field) or a JSON `{ "audioUrl": ... }` body.
pub struct TranscribeInput(pub AudioSource);

impl<S> FromRequest<S> for TranscribeInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let (inline, audio_url) = if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
            read_multipart(multipart).await?
        } else if content_type.starts_with("application/json") {
            let Json(body) = Json::<TranscribeReferenceRequest>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
            (None, body.audio_url)
        } else {
            tracing::warn!(content_type = %content_type, "Unsupported transcribe content type");
            return Err(ApiError::bad_request(
                "Expected multipart/form-data with a file field or a JSON body with audioUrl",
            ));
        };

        let source =
            AudioSource::from_parts(inline, audio_url).map_err(PipelineError::from)?;
        Ok(TranscribeInput(source))
    }
}

type MultipartParts = (Option<(Bytes, Option<String>)>, Option<String>);

async fn read_multipart(mut multipart: Multipart) -> Result<MultipartParts, ApiError> {
    let mut inline = None;
    let mut audio_url = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(ApiError::bad_request(format!(
                    "Failed to read multipart: {}",
                    e.body_text()
                )));
            }
        };

        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                if inline.is_some() {
                    return Err(ApiError::bad_request("Only one file field is allowed"));
                }
                let filename = field.file_name().map(String::from);
                let data = field.bytes().await.map_err(|e| {
                    tracing::warn!(error = %e, "Failed to read file bytes");
                    ApiError::bad_request(format!("Failed to read file: {}", e.body_text()))
                })?;
                tracing::debug!(bytes = data.len(), "Audio upload received");
                inline = Some((data, filename));
            }
            Some(AUDIO_URL_FIELD) => {
                if audio_url.is_some() {
                    return Err(ApiError::bad_request("Only one audioUrl field is allowed"));
                }
                let text = field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read audioUrl: {}", e.body_text()))
                })?;
                audio_url = Some(text);
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok((inline, audio_url))
}

#[tracing::instrument(skip(state, input), fields(source = input.0.kind()))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    input: TranscribeInput,
) -> impl IntoResponse {
    let TranscribeInput(source) = input;

    match state.pipeline.transcribe(source).await {
        Ok(transcript) => {
            tracing::info!(chars = transcript.as_str().len(), "Transcription successful");
            (
                StatusCode::OK,
                Json(TranscribeResponse {
                    text: transcript.into_string(),
                }),
            )
                .into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
