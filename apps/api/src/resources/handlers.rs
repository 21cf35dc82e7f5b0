//! Axum route handlers for learning resources.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiJson, AppError};
use crate::resources::learning::{learning_resources, LearningResource};
use crate::resources::youtube::{resources_for_skills, SkillVideos};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct YouTubeRequest {
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct YouTubeResponse {
    pub resources: Vec<SkillVideos>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResourcesRequest {
    pub missing_skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct LearningResourcesResponse {
    pub resources: Vec<LearningResource>,
}

/// POST /api/youtube
pub async fn handle_youtube(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<YouTubeRequest>,
) -> Result<Json<YouTubeResponse>, AppError> {
    let skills = request
        .skills
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("skills must be a non-empty array".to_string()))?;

    let resources = resources_for_skills(state.videos.as_ref(), &skills).await;
    Ok(Json(YouTubeResponse { resources }))
}

/// POST /api/learning-resources
///
/// YouTube-backed when a key is configured, LLM-generated otherwise.
pub async fn handle_learning_resources(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LearningResourcesRequest>,
) -> Result<Json<LearningResourcesResponse>, AppError> {
    let missing_skills = request.missing_skills.ok_or_else(|| {
        AppError::Validation("missingSkills must be an array of strings".to_string())
    })?;

    let resources = learning_resources(&missing_skills, state.videos.as_ref(), &state.llm).await?;
    Ok(Json(LearningResourcesResponse { resources }))
}
