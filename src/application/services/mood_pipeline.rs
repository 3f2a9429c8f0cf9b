use crate::application::ports::TranscriptionError;
use crate::domain::{AnalysisResult, AudioSource, AudioSourceError, Transcript};

use super::audio_acquirer::{AcquireError, AudioAcquirer};
use super::scoped_audio::ResourceLedger;
use super::tag_classifier::{ClassifierError, TagClassifier};
use super::transcription_service::{TranscribeError, TranscriptionService};

/// How classification failures reach the caller. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierFailurePolicy {
    /// Provider and output failures degrade to an empty tag list.
    #[default]
    Lenient,
    /// Provider and output failures surface as errors.
    Strict,
}

/// Composes acquisition, transcription and classification for one request at a time.
pub struct MoodPipeline {
    acquirer: AudioAcquirer,
    transcription: TranscriptionService,
    classifier: TagClassifier,
    failure_policy: ClassifierFailurePolicy,
}

impl MoodPipeline {
    pub fn new(
        acquirer: AudioAcquirer,
        transcription: TranscriptionService,
        classifier: TagClassifier,
        failure_policy: ClassifierFailurePolicy,
    ) -> Self {
        Self {
            acquirer,
            transcription,
            classifier,
            failure_policy,
        }
    }

    pub fn failure_policy(&self) -> ClassifierFailurePolicy {
        self.failure_policy
    }

    pub fn resource_ledger(&self) -> &ResourceLedger {
        self.acquirer.ledger()
    }

    /// Acquire, then transcribe. The audio is released before returning on every path.
    pub async fn transcribe(&self, source: AudioSource) -> Result<Transcript, PipelineError> {
        let audio = self.acquirer.acquire(source).await?;
        let result = self.transcription.transcribe(&audio).await;
        audio.release();
        Ok(result?)
    }

    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, PipelineError> {
        match self.classifier.classify(text).await {
            Ok(result) => Ok(result),
            Err(e) => match self.failure_policy {
                ClassifierFailurePolicy::Lenient => {
                    tracing::warn!(error = %e, "Classification failed, returning no tags");
                    Ok(AnalysisResult::empty())
                }
                ClassifierFailurePolicy::Strict => Err(PipelineError::Classification(e)),
            },
        }
    }
}

/// Externally visible failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    UntrustedSource,
    EmptyPayload,
    PayloadTooLarge,
    FetchFailed,
    Io,
    ProviderUnavailable,
    ProviderRejected,
    EmptyTranscription,
    InvalidClassifierOutput,
}

impl ErrorKind {
    /// Failures the client can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidInput
                | ErrorKind::UntrustedSource
                | ErrorKind::EmptyPayload
                | ErrorKind::PayloadTooLarge
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::UntrustedSource => "untrusted_source",
            ErrorKind::EmptyPayload => "empty_payload",
            ErrorKind::PayloadTooLarge => "payload_too_large",
            ErrorKind::FetchFailed => "fetch_failed",
            ErrorKind::Io => "io",
            ErrorKind::ProviderUnavailable => "provider_unavailable",
            ErrorKind::ProviderRejected => "provider_rejected",
            ErrorKind::EmptyTranscription => "empty_transcription",
            ErrorKind::InvalidClassifierOutput => "invalid_classifier_output",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Acquire(#[from] AcquireError),
    #[error(transparent)]
    Transcription(#[from] TranscribeError),
    #[error(transparent)]
    Classification(ClassifierError),
}

impl From<AudioSourceError> for PipelineError {
    fn from(e: AudioSourceError) -> Self {
        PipelineError::InvalidInput(e.to_string())
    }
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidInput(_) => ErrorKind::InvalidInput,
            PipelineError::Acquire(e) => match e {
                AcquireError::EmptyPayload => ErrorKind::EmptyPayload,
                AcquireError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
                AcquireError::UntrustedSource(_) => ErrorKind::UntrustedSource,
                AcquireError::Fetch(_) => ErrorKind::FetchFailed,
                AcquireError::Io(_) => ErrorKind::Io,
            },
            PipelineError::Transcription(e) => match e {
                TranscribeError::Buffer(_) => ErrorKind::Io,
                TranscribeError::Provider(TranscriptionError::ProviderUnavailable(_)) => {
                    ErrorKind::ProviderUnavailable
                }
                TranscribeError::Provider(TranscriptionError::ProviderRejected(_)) => {
                    ErrorKind::ProviderRejected
                }
                TranscribeError::EmptyTranscription => ErrorKind::EmptyTranscription,
            },
            PipelineError::Classification(e) => match e {
                ClassifierError::ProviderUnavailable(_) => ErrorKind::ProviderUnavailable,
                ClassifierError::ProviderRejected(_) => ErrorKind::ProviderRejected,
                ClassifierError::InvalidOutput(_) => ErrorKind::InvalidClassifierOutput,
            },
        }
    }
}
