mod llm_client;
mod remote_fetcher;
mod transcription_engine;

pub use llm_client::{CompletionRequest, LlmClient, LlmClientError};
pub use remote_fetcher::{FetchError, RemoteFetcher};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
