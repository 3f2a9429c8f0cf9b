use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::handlers::error::ApiError;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub tags: Vec<String>,
}

#[tracing::instrument(skip(state, body))]
pub async fn analyze_handler(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed analyze request");
            return ApiError::bad_request(rejection.body_text()).into_response();
        }
    };

    tracing::debug!(text = %sanitize_prompt(&request.text), "Processing analyze request");

    match state.pipeline.analyze(&request.text).await {
        Ok(result) => {
            tracing::info!(tags = result.tags.len(), "Analysis successful");
            (
                StatusCode::OK,
                Json(AnalyzeResponse {
                    tags: result.tag_literals(),
                }),
            )
                .into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
