use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::FormatHint;
use crate::infrastructure::http::provider_client;

use super::openai_whisper_engine::{map_send_error, status_error};

pub struct AzureWhisperEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: Option<String>,
}

impl AzureWhisperEngine {
    pub fn new(
        base_url: &str,
        deployment: &str,
        api_key: &str,
        api_version: &str,
        language: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TranscriptionError> {
        let endpoint = format!(
            "{}/openai/deployments/{}/audio/transcriptions?api-version={}",
            base_url.trim_end_matches('/'),
            deployment,
            api_version,
        );
        let client = provider_client(timeout)
            .map_err(|e| TranscriptionError::ProviderUnavailable(format!("client: {}", e)))?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            language,
        })
    }
}

#[derive(Deserialize)]
struct AzureTranscriptionResponse {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl TranscriptionEngine for AzureWhisperEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        format: &FormatHint,
    ) -> Result<String, TranscriptionError> {
        let file_part = multipart::Part::bytes(audio_data.to_vec())
            .file_name(format.file_name())
            .mime_str(format.mime())
            .map_err(|e| TranscriptionError::ProviderRejected(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new().part("file", file_part);
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        tracing::debug!(endpoint = %self.endpoint, "Sending audio to Azure OpenAI Whisper");

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            let err = status_error(response).await;
            tracing::error!(error = %err, "Azure OpenAI Whisper request failed");
            return Err(err);
        }

        let result: AzureTranscriptionResponse = response.json().await.map_err(|e| {
            TranscriptionError::ProviderUnavailable(format!("parse response: {}", e))
        })?;

        let text = result.text.unwrap_or_default();

        tracing::info!(
            chars = text.len(),
            "Azure OpenAI Whisper transcription completed"
        );

        Ok(text.trim().to_string())
    }
}
