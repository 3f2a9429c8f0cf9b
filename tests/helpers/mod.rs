#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use url::Url;

use moodscribe::application::ports::{
    CompletionRequest, FetchError, LlmClient, LlmClientError, RemoteFetcher, TranscriptionEngine,
    TranscriptionError,
};
use moodscribe::application::services::{
    AudioAcquirer, BufferMode, ClassifierFailurePolicy, MoodPipeline, TagClassifier,
    TranscriptionService,
};
use moodscribe::domain::{FetchAllowList, FormatHint};
use moodscribe::presentation::{AppState, Settings, create_router};

pub const TRUSTED_HOST: &str = "storage.moodjournal.test";
pub const TEST_MAX_BYTES: usize = 1024 * 1024;

pub fn trusted_url(path: &str) -> String {
    format!("https://{}/{}", TRUSTED_HOST, path)
}

pub fn test_allow_list() -> FetchAllowList {
    FetchAllowList::new([TRUSTED_HOST], false)
}

pub enum FetchOutcome {
    Body(Bytes),
    Status(u16),
}

pub struct FakeFetcher {
    outcome: FetchOutcome,
    calls: AtomicUsize,
    last_url: Mutex<Option<Url>>,
}

impl FakeFetcher {
    pub fn returning(body: &'static [u8]) -> Arc<Self> {
        Arc::new(Self {
            outcome: FetchOutcome::Body(Bytes::from_static(body)),
            calls: AtomicUsize::new(0),
            last_url: Mutex::new(None),
        })
    }

    pub fn failing_with_status(status: u16) -> Arc<Self> {
        Arc::new(Self {
            outcome: FetchOutcome::Status(status),
            calls: AtomicUsize::new(0),
            last_url: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<Url> {
        self.last_url.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RemoteFetcher for FakeFetcher {
    async fn fetch(&self, url: &Url, max_bytes: usize) -> Result<Bytes, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(url.clone());
        match &self.outcome {
            FetchOutcome::Body(body) if body.len() > max_bytes => {
                Err(FetchError::TooLarge { limit: max_bytes })
            }
            FetchOutcome::Body(body) => Ok(body.clone()),
            FetchOutcome::Status(status) => Err(FetchError::Status(*status)),
        }
    }
}

pub enum EngineOutcome {
    Text(&'static str),
    Unavailable,
    Rejected,
    /// Never answers, like a provider that accepted the upload and stalled.
    Hang,
}

pub struct FakeTranscriptionEngine {
    outcome: EngineOutcome,
    calls: AtomicUsize,
    last_format: Mutex<Option<FormatHint>>,
    last_len: AtomicUsize,
}

impl FakeTranscriptionEngine {
    pub fn new(outcome: EngineOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_format: Mutex::new(None),
            last_len: AtomicUsize::new(0),
        })
    }

    pub fn returning(text: &'static str) -> Arc<Self> {
        Self::new(EngineOutcome::Text(text))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_format(&self) -> Option<FormatHint> {
        self.last_format.lock().unwrap().clone()
    }

    pub fn last_len(&self) -> usize {
        self.last_len.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for FakeTranscriptionEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        format: &FormatHint,
    ) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_len.store(audio_data.len(), Ordering::SeqCst);
        *self.last_format.lock().unwrap() = Some(format.clone());
        match &self.outcome {
            EngineOutcome::Text(text) => Ok(text.to_string()),
            EngineOutcome::Unavailable => Err(TranscriptionError::ProviderUnavailable(
                "status 503: overloaded".to_string(),
            )),
            EngineOutcome::Rejected => Err(TranscriptionError::ProviderRejected(
                "status 400: unsupported audio".to_string(),
            )),
            EngineOutcome::Hang => {
                std::future::pending::<()>().await;
                unreachable!("pending future never resolves")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCompletion {
    pub system_prompt: String,
    pub user_text: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

pub enum LlmOutcome {
    Reply(&'static str),
    Unavailable,
    Rejected,
    EmptyResponse,
}

pub struct FakeLlmClient {
    outcome: LlmOutcome,
    calls: AtomicUsize,
    requests: Mutex<Vec<RecordedCompletion>>,
}

impl FakeLlmClient {
    pub fn new(outcome: LlmOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(reply: &'static str) -> Arc<Self> {
        Self::new(LlmOutcome::Reply(reply))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedCompletion> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for FakeLlmClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(RecordedCompletion {
            system_prompt: request.system_prompt.to_string(),
            user_text: request.user_text.to_string(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        });
        match &self.outcome {
            LlmOutcome::Reply(reply) => Ok(reply.to_string()),
            LlmOutcome::Unavailable => Err(LlmClientError::ApiRequestFailed(
                "HTTP 502: bad gateway".to_string(),
            )),
            LlmOutcome::Rejected => Err(LlmClientError::Rejected(
                "status 400: context length exceeded".to_string(),
            )),
            LlmOutcome::EmptyResponse => Err(LlmClientError::InvalidResponse(
                "empty choices".to_string(),
            )),
        }
    }
}

pub struct TestPipeline {
    pub pipeline: Arc<MoodPipeline>,
    pub engine: Arc<FakeTranscriptionEngine>,
    pub llm: Arc<FakeLlmClient>,
    pub fetcher: Arc<FakeFetcher>,
}

pub fn build_pipeline(
    engine: Arc<FakeTranscriptionEngine>,
    llm: Arc<FakeLlmClient>,
    fetcher: Arc<FakeFetcher>,
    policy: ClassifierFailurePolicy,
    buffer_mode: BufferMode,
) -> TestPipeline {
    let acquirer = AudioAcquirer::new(
        fetcher.clone(),
        test_allow_list(),
        TEST_MAX_BYTES,
        buffer_mode,
    );
    let pipeline = MoodPipeline::new(
        acquirer,
        TranscriptionService::new(engine.clone()),
        TagClassifier::new(llm.clone(), 0.2, 100),
        policy,
    );
    TestPipeline {
        pipeline: Arc::new(pipeline),
        engine,
        llm,
        fetcher,
    }
}

pub fn default_pipeline(policy: ClassifierFailurePolicy) -> TestPipeline {
    build_pipeline(
        FakeTranscriptionEngine::returning("I went for a run this morning"),
        FakeLlmClient::replying(r#"["happy","exercise"]"#),
        FakeFetcher::returning(b"remote-audio-bytes"),
        policy,
        BufferMode::Memory,
    )
}

pub fn test_router(test_pipeline: &TestPipeline) -> axum::Router {
    let mut settings = Settings::default();
    settings.audio.max_bytes = TEST_MAX_BYTES;
    create_router(AppState::new(test_pipeline.pipeline.clone(), settings))
}
