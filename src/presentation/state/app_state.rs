use std::sync::Arc;

use crate::application::services::MoodPipeline;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<MoodPipeline>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pipeline: Arc<MoodPipeline>, settings: Settings) -> Self {
        Self {
            pipeline,
            settings: Arc::new(settings),
        }
    }
}
