use super::mood_tag::MoodTag;

/// Tags the classifier produced for one piece of text, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    pub tags: Vec<MoodTag>,
}

impl AnalysisResult {
    pub fn new(tags: Vec<MoodTag>) -> Self {
        Self { tags }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn tag_literals(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.as_str().to_string()).collect()
    }
}
