mod analysis;
mod audio_source;
mod fetch_allow_list;
mod format_hint;
mod mood_tag;
mod transcript;

pub use analysis::AnalysisResult;
pub use audio_source::{AudioSource, AudioSourceError};
pub use fetch_allow_list::{FetchAllowList, UntrustedReason};
pub use format_hint::FormatHint;
pub use mood_tag::{MoodTag, TagCategory};
pub use transcript::Transcript;
