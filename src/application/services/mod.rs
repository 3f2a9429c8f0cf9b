mod audio_acquirer;
mod mood_pipeline;
mod scoped_audio;
mod tag_classifier;
mod transcription_service;

pub use audio_acquirer::{AcquireError, AudioAcquirer, BufferMode};
pub use mood_pipeline::{ClassifierFailurePolicy, ErrorKind, MoodPipeline, PipelineError};
pub use scoped_audio::{ResourceLedger, ScopedAudio};
pub use tag_classifier::{CLASSIFIER_SYSTEM_PROMPT, ClassifierError, TagClassifier, parse_tags};
pub use transcription_service::{TranscribeError, TranscriptionService};
