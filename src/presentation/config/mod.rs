mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, BufferSetting, ClassifierSettings, FailurePolicySetting, FetchSettings,
    LoggingSettings, ProviderSettings, ServerSettings, Settings, TranscriptionProviderSetting,
    TranscriptionSettings,
};
