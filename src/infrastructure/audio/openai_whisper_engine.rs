use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::FormatHint;
use crate::infrastructure::http::{ProviderStatus, error_body, provider_client};

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    language: Option<String>,
}

impl OpenAiWhisperEngine {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        language: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TranscriptionError> {
        let client = provider_client(timeout)
            .map_err(|e| TranscriptionError::ProviderUnavailable(format!("client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
            language,
        })
    }
}

pub(super) fn map_send_error(e: reqwest::Error) -> TranscriptionError {
    if e.is_timeout() {
        TranscriptionError::ProviderUnavailable("request timed out".to_string())
    } else {
        TranscriptionError::ProviderUnavailable(format!("request: {}", e))
    }
}

pub(super) async fn status_error(response: reqwest::Response) -> TranscriptionError {
    let kind = ProviderStatus::classify(response.status());
    let detail = error_body(response).await;
    match kind {
        ProviderStatus::Unavailable => TranscriptionError::ProviderUnavailable(detail),
        ProviderStatus::Rejected => TranscriptionError::ProviderRejected(detail),
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        format: &FormatHint,
    ) -> Result<String, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(audio_data.to_vec())
            .file_name(format.file_name())
            .mime_str(format.mime())
            .map_err(|e| TranscriptionError::ProviderRejected(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        tracing::debug!(model = %self.model, format = format.extension(), "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            let err = status_error(response).await;
            tracing::error!(error = %err, "OpenAI Whisper request failed");
            return Err(err);
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::ProviderUnavailable(format!("body: {}", e)))?;

        tracing::info!(
            chars = transcript.len(),
            "OpenAI Whisper transcription completed"
        );

        Ok(transcript.trim().to_string())
    }
}
