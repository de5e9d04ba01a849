//! Learning path, lessons and flashcards.

use serde::{Deserialize, Serialize};
use serde_json::json;

use hoctap_core::error::ApiResult;
use hoctap_core::model::{Flashcard, LearningPath, Lesson, PathItem};

use crate::http::ApiClient;

/// Request body for a learner-authored lesson.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomLessonRequest {
    pub title: String,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// What finishing a lesson earned.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub xp_gained: f64,
    #[serde(default)]
    pub user_level: Option<u32>,
    #[serde(default)]
    pub xp: Option<f64>,
}

impl ApiClient {
    pub async fn learning_path(&self) -> ApiResult<LearningPath> {
        let items: Vec<PathItem> = self.get_field("/learning-path", "path").await?;
        Ok(LearningPath { items })
    }

    pub async fn lesson(&self, id: &str) -> ApiResult<Lesson> {
        self.get_field(&format!("/lessons/{id}"), "lesson").await
    }

    /// Report a finished lesson with the quiz score in percent.
    pub async fn complete_lesson(&self, id: &str, score: u32) -> ApiResult<Completion> {
        self.post(&format!("/lessons/{id}/complete"), &json!({ "score": score }))
            .await
    }

    pub async fn create_custom_lesson(&self, request: &CustomLessonRequest) -> ApiResult<Lesson> {
        let payload: serde_json::Value = self.post("/lessons/custom", request).await?;
        crate::http::take_field(payload, "lesson")
    }

    pub async fn flashcards(&self, lesson_id: &str) -> ApiResult<Vec<Flashcard>> {
        self.get_field(&format!("/lessons/{lesson_id}/flashcards"), "flashcards")
            .await
    }
}
