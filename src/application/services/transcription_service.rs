use std::io;
use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::Transcript;

use super::scoped_audio::ScopedAudio;

pub struct TranscriptionService {
    engine: Arc<dyn TranscriptionEngine>,
}

impl TranscriptionService {
    pub fn new(engine: Arc<dyn TranscriptionEngine>) -> Self {
        Self { engine }
    }

    /// Sends the buffered audio to the provider. Never retries.
    #[tracing::instrument(skip(self, audio), fields(bytes = audio.len(), format = audio.format_hint().extension()))]
    pub async fn transcribe(&self, audio: &ScopedAudio) -> Result<Transcript, TranscribeError> {
        let data = audio.read().await.map_err(TranscribeError::Buffer)?;

        let raw = self
            .engine
            .transcribe(&data, audio.format_hint())
            .await
            .map_err(TranscribeError::Provider)?;

        let transcript = Transcript::new(raw).ok_or(TranscribeError::EmptyTranscription)?;

        tracing::info!(chars = transcript.as_str().len(), "Transcription completed");

        Ok(transcript)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("failed to read audio buffer: {0}")]
    Buffer(io::Error),
    #[error(transparent)]
    Provider(TranscriptionError),
    #[error("transcription produced no text")]
    EmptyTranscription,
}
