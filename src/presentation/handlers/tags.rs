use axum::Json;
use serde::Serialize;

use crate::domain::{MoodTag, TagCategory};

#[derive(Serialize)]
pub struct TagEntry {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Serialize)]
pub struct TagVocabularyResponse {
    pub emotions: Vec<TagEntry>,
    pub activities: Vec<TagEntry>,
    pub contexts: Vec<TagEntry>,
}

fn entries(category: TagCategory) -> Vec<TagEntry> {
    category
        .tags()
        .map(|tag: MoodTag| TagEntry {
            id: tag.as_str(),
            name: tag.display_name(),
        })
        .collect()
}

pub async fn tags_handler() -> Json<TagVocabularyResponse> {
    Json(TagVocabularyResponse {
        emotions: entries(TagCategory::Emotion),
        activities: entries(TagCategory::Activity),
        contexts: entries(TagCategory::Context),
    })
}
