//! Axum route handlers for the resume builder.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::assist::{enhance_job_description, generate_summary, suggest_skills};
use crate::builder::export::{export_resume, ExportFormat};
use crate::builder::models::{Education, Experience, Personal, Resume};
use crate::errors::{ApiJson, AppError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SummaryRequest {
    pub personal: Personal,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceDescriptionRequest {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct EnhanceDescriptionResponse {
    pub bullets: Vec<String>,
    /// Bullets joined with newlines, ready to drop into the description field.
    pub description: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestSkillsRequest {
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub existing_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestSkillsResponse {
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume-builder/export/:format
///
/// Renders the posted resume as a download in pdf, docx, html or txt.
pub async fn handle_export(
    Path(format): Path<String>,
    ApiJson(resume): ApiJson<Resume>,
) -> Result<impl IntoResponse, AppError> {
    let format: ExportFormat = format.parse().map_err(AppError::Validation)?;

    let file = tokio::task::spawn_blocking(move || export_resume(&resume, format))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("export task failed: {e}")))??;

    info!("Exported {} ({} bytes)", file.file_name, file.bytes.len());

    let disposition = format!("attachment; filename=\"{}\"", file.file_name.replace('"', ""));
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    ))
}

/// POST /api/resume-builder/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = generate_summary(
        &request.personal,
        &request.experience,
        &request.education,
        &request.skills,
        &state.llm,
    )
    .await?;
    Ok(Json(SummaryResponse { summary }))
}

/// POST /api/resume-builder/enhance-description
pub async fn handle_enhance_description(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EnhanceDescriptionRequest>,
) -> Result<Json<EnhanceDescriptionResponse>, AppError> {
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("description cannot be empty".to_string()));
    }

    let bullets = enhance_job_description(
        request.role.trim(),
        request.company.trim(),
        request.description.trim(),
        &state.llm,
    )
    .await?;

    Ok(Json(EnhanceDescriptionResponse {
        description: bullets.join("\n"),
        bullets,
    }))
}

/// POST /api/resume-builder/suggest-skills
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SuggestSkillsRequest>,
) -> Result<Json<SuggestSkillsResponse>, AppError> {
    let skills = suggest_skills(
        &request.experience,
        &request.education,
        &request.existing_skills,
        &state.llm,
    )
    .await?;
    Ok(Json(SuggestSkillsResponse { skills }))
}
