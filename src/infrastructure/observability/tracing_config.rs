/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, level: &str, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            default_filter: format!("{level},moodscribe={level},tower_http=info"),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new("local", "info", false)
    }
}
