use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use crate::domain::{AnalysisResult, MoodTag};

pub const CLASSIFIER_SYSTEM_PROMPT: &str = "You are a mood analysis expert. Analyze the given text and return relevant mood tags from the following categories:
Emotions: happy, excited, calm, anxious, sad, angry
Activities: work_activity, exercise, social, rest
Contexts: home, work_location, outside
Return only the tag IDs in a JSON array, for example: [\"happy\", \"exercise\", \"outside\"]";

pub struct TagClassifier {
    llm_client: Arc<dyn LlmClient>,
    temperature: f32,
    max_tokens: u32,
}

impl TagClassifier {
    pub fn new(llm_client: Arc<dyn LlmClient>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            llm_client,
            temperature,
            max_tokens,
        }
    }

    /// Blank text short-circuits to an empty result without calling the provider.
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn classify(&self, text: &str) -> Result<AnalysisResult, ClassifierError> {
        if text.trim().is_empty() {
            tracing::debug!("Blank text, skipping classification");
            return Ok(AnalysisResult::empty());
        }

        let raw = self
            .llm_client
            .complete(CompletionRequest {
                system_prompt: CLASSIFIER_SYSTEM_PROMPT,
                user_text: text,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            })
            .await
            .map_err(ClassifierError::from)?;

        let tags = parse_tags(&raw)?;

        tracing::info!(tags = tags.len(), "Classification completed");

        Ok(AnalysisResult::new(tags))
    }
}

/// Parses provider output as a JSON array of strings and keeps only known tags.
///
/// Anything that is not an array of strings is rejected as a whole; strings
/// outside the vocabulary are dropped. Order and duplicates are preserved.
pub fn parse_tags(raw: &str) -> Result<Vec<MoodTag>, ClassifierError> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ClassifierError::InvalidOutput(format!("not JSON: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ClassifierError::InvalidOutput(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )));
        }
    };

    let literals = items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => Err(ClassifierError::InvalidOutput(format!(
                "expected string elements, got {}",
                json_kind(&other)
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total = literals.len();
    let tags: Vec<MoodTag> = literals
        .iter()
        .filter_map(|literal| literal.parse::<MoodTag>().ok())
        .collect();

    if tags.len() < total {
        tracing::debug!(dropped = total - tags.len(), "Dropped tags outside the vocabulary");
    }

    Ok(tags)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an info string such as `json` on the opening fence line.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('[') => body.trim(),
        _ => inner.trim(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classification provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("classification provider rejected request: {0}")]
    ProviderRejected(String),
    #[error("invalid classifier output: {0}")]
    InvalidOutput(String),
}

impl From<LlmClientError> for ClassifierError {
    fn from(e: LlmClientError) -> Self {
        match e {
            LlmClientError::Rejected(_) => ClassifierError::ProviderRejected(e.to_string()),
            // The provider answered, but with nothing usable.
            LlmClientError::InvalidResponse(_) => ClassifierError::InvalidOutput(e.to_string()),
            LlmClientError::ApiRequestFailed(_) | LlmClientError::RateLimited => {
                ClassifierError::ProviderUnavailable(e.to_string())
            }
        }
    }
}
