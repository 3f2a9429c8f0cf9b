use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{BufferMode, ClassifierFailurePolicy};
use crate::domain::FetchAllowList;
use crate::infrastructure::audio::{TranscriptionEngineConfig, TranscriptionProvider};

use super::Environment;

/// Service configuration.
///
/// Layered from an optional `appsettings.{environment}.toml` and then
/// `APP_`-prefixed environment variables using `__` between sections, e.g.
/// `APP_PROVIDER__API_KEY` or `APP_FETCH__ALLOWED_HOSTS=a.example.com,.cdn.example.com`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub transcription: TranscriptionSettings,
    pub classifier: ClassifierSettings,
    pub fetch: FetchSettings,
    pub audio: AudioSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// `*` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

/// Credential and endpoint shared by both OpenAI-compatible providers.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub model: String,
    pub language: Option<String>,
    pub timeout_secs: u64,
    /// Overrides `provider.base_url` for the speech-to-text provider only.
    pub base_url: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub failure_policy: FailurePolicySetting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicySetting {
    Lenient,
    Strict,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub allowed_hosts: Vec<String>,
    pub allow_insecure_http: bool,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub max_bytes: usize,
    pub buffer: BufferSetting,
    pub spool_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferSetting {
    Memory,
    Spool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("fetch.allowed_hosts")
                    .with_list_parse_key("server.cors_allowed_origins"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn fetch_allow_list(&self) -> FetchAllowList {
        FetchAllowList::new(&self.fetch.allowed_hosts, self.fetch.allow_insecure_http)
    }

    pub fn transcription_engine_config(&self) -> TranscriptionEngineConfig {
        TranscriptionEngineConfig {
            provider: self.transcription.provider.into(),
            api_key: self.provider.api_key.clone(),
            base_url: self
                .transcription
                .base_url
                .clone()
                .or_else(|| self.provider.base_url.clone()),
            model: self.transcription.model.clone(),
            language: self.transcription.language.clone(),
            azure_deployment: self.transcription.azure_deployment.clone(),
            azure_api_version: self.transcription.azure_api_version.clone(),
            timeout: Duration::from_secs(self.transcription.timeout_secs),
        }
    }

    pub fn buffer_mode(&self) -> BufferMode {
        match self.audio.buffer {
            BufferSetting::Memory => BufferMode::Memory,
            BufferSetting::Spool => BufferMode::Spool {
                dir: self.audio.spool_dir.clone(),
            },
        }
    }

    /// Largest request body accepted: the audio limit plus room for multipart framing.
    pub fn request_body_limit(&self) -> usize {
        self.audio.max_bytes.saturating_add(64 * 1024)
    }
}

impl From<TranscriptionProviderSetting> for TranscriptionProvider {
    fn from(setting: TranscriptionProviderSetting) -> Self {
        match setting {
            TranscriptionProviderSetting::OpenAi => TranscriptionProvider::OpenAi,
            TranscriptionProviderSetting::Azure => TranscriptionProvider::Azure,
        }
    }
}

impl From<FailurePolicySetting> for ClassifierFailurePolicy {
    fn from(setting: FailurePolicySetting) -> Self {
        match setting {
            FailurePolicySetting::Lenient => ClassifierFailurePolicy::Lenient,
            FailurePolicySetting::Strict => ClassifierFailurePolicy::Strict,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: TranscriptionProviderSetting::OpenAi,
            model: "whisper-1".to_string(),
            language: None,
            timeout_secs: 60,
            base_url: None,
            azure_deployment: None,
            azure_api_version: "2024-06-01".to_string(),
        }
    }
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 100,
            timeout_secs: 30,
            failure_policy: FailurePolicySetting::Lenient,
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            allowed_hosts: Vec::new(),
            allow_insecure_http: false,
            timeout_secs: 30,
        }
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            max_bytes: 25 * 1024 * 1024,
            buffer: BufferSetting::Memory,
            spool_dir: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
