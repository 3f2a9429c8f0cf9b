mod analyze;
mod error;
mod health;
mod tags;
mod transcribe;

pub use analyze::{AnalyzeRequest, AnalyzeResponse, analyze_handler};
pub use error::{ApiError, ErrorResponse, status_for};
pub use health::{health_handler, root_handler};
pub use tags::tags_handler;
pub use transcribe::{TranscribeInput, TranscribeResponse, transcribe_handler};
