use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::azure_whisper_engine::AzureWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriptionProvider {
    OpenAi,
    Azure,
}

/// Everything needed to build any supported engine.
#[derive(Debug, Clone)]
pub struct TranscriptionEngineConfig {
    pub provider: TranscriptionProvider,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    pub language: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: String,
    pub timeout: Duration,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        config: TranscriptionEngineConfig,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        if config.api_key.trim().is_empty() {
            return Err(TranscriptionError::ProviderUnavailable(
                "API key required for transcription provider".to_string(),
            ));
        }

        match config.provider {
            TranscriptionProvider::OpenAi => {
                let engine = OpenAiWhisperEngine::new(
                    config.api_key,
                    config.base_url,
                    Some(config.model),
                    config.language,
                    config.timeout,
                )?;
                Ok(Arc::new(engine))
            }
            TranscriptionProvider::Azure => {
                let base_url = config.base_url.ok_or_else(|| {
                    TranscriptionError::ProviderUnavailable(
                        "base_url required for Azure OpenAI Whisper".to_string(),
                    )
                })?;
                let deployment = config.azure_deployment.unwrap_or(config.model);
                let engine = AzureWhisperEngine::new(
                    &base_url,
                    &deployment,
                    &config.api_key,
                    &config.azure_api_version,
                    config.language,
                    config.timeout,
                )?;
                Ok(Arc::new(engine))
            }
        }
    }
}
