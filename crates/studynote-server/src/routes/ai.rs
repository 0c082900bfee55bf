//! AI routes: summarize note text, generate a study guide.
//!
//! Both endpoints proxy the generative-language backend. Upstream failures
//! surface as 502; empty input is rejected as 400 before any network call.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use studynote_core::StudyGuide;

use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    /// Approximate summary length in words. Omitted means the default.
    #[serde(default)]
    pub max_words: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct StudyGuideRequest {
    pub topic: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/ai/summarize - Summarize free text.
async fn summarize(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<SummarizeRequest>,
) -> ApiResult<Json<SummarizeResponse>> {
    let summary = state
        .ai()
        .summarize(&request.text, request.max_words.unwrap_or(0))
        .await?;

    tracing::info!(user_id = %user.user_id, chars = request.text.len(), "Summary generated");

    Ok(Json(SummarizeResponse { summary }))
}

/// POST /api/ai/study-guide - Generate a study guide for a topic.
async fn study_guide(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<StudyGuideRequest>,
) -> ApiResult<Json<StudyGuide>> {
    let guide = state.ai().generate_study_guide(&request.topic).await?;

    tracing::info!(
        user_id = %user.user_id,
        flashcards = guide.flashcards.len(),
        quiz_questions = guide.quiz_questions.len(),
        "Study guide generated"
    );

    Ok(Json(guide))
}

/// Build AI routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/ai/summarize", post(summarize))
        .route("/api/ai/study-guide", post(study_guide))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_request_deserialize() {
        let json = r#"{"text": "long note body", "max_words": 50}"#;
        let request: SummarizeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.text, "long note body");
        assert_eq!(request.max_words, Some(50));
    }

    #[test]
    fn test_summarize_request_without_max_words() {
        let json = r#"{"text": "long note body"}"#;
        let request: SummarizeRequest = serde_json::from_str(json).unwrap();
        assert!(request.max_words.is_none());
    }

    #[test]
    fn test_study_guide_request_deserialize() {
        let json = r#"{"topic": "Photosynthesis"}"#;
        let request: StudyGuideRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.topic, "Photosynthesis");
    }
}
