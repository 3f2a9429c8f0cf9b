use async_trait::async_trait;

use crate::domain::FormatHint;

/// Speech-to-text provider.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Returns the provider's plain-text transcript, possibly empty.
    async fn transcribe(
        &self,
        audio_data: &[u8],
        format: &FormatHint,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    /// Transport failure, timeout, 5xx, throttling or an unreadable response.
    #[error("transcription provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// The provider refused the request, typically malformed or unsupported audio.
    #[error("transcription provider rejected request: {0}")]
    ProviderRejected(String),
}
