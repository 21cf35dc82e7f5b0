//! Axum route handlers for the analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::analyzer::{
    analyze_for_role, analyze_with_job_description, enrich_with_youtube, ResumeAnalysis,
    RoleAnalysis,
};
use crate::analysis::ats::{compute_ats_score, AtsResult};
use crate::analysis::critique::critique_resume;
use crate::analysis::extractor::{extract_skills, ExtractedSkills};
use crate::analysis::roadmap::{generate_roadmap, Roadmap};
use crate::analysis::skills::{compare_skills, merge_user_skills};
use crate::catalog::{
    find_role, industry_demand, job_role_options, required_skills_for, role_definitions,
    IndustryDemand,
};
use crate::errors::{ApiJson, AppError};
use crate::resume::handlers::UploadForm;
use crate::resume::ingest::extract_text_from_upload;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub email: Option<String>,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub selected_role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub match_score: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub skills: Vec<String>,
    pub extracted: ExtractedSkills,
    pub comparison: Comparison,
    pub roadmap: Roadmap,
    pub ats: AtsResult,
    pub demand: Option<&'static IndustryDemand>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResumeRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRoleRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CritiqueRequest {
    #[serde(default)]
    pub resume_text: String,
    pub job_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CritiqueResponse {
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    #[serde(default)]
    pub target_role: String,
    pub missing_skills: Option<Vec<String>>,
    pub current_skills: Option<Vec<String>>,
}

fn require_text<'a>(value: &'a str, message: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(trimmed)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/analyze
///
/// Role names accepted by `POST /api/analyze`.
pub async fn handle_list_roles() -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: role_definitions().iter().map(|r| r.name).collect(),
    })
}

/// POST /api/analyze
///
/// Full pipeline: skill extraction → gap against the role → ATS score → demand → roadmap.
pub async fn handle_analyze(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let resume_text = request.resume_text.trim();
    let selected_role = request.selected_role.trim();
    if resume_text.is_empty() || selected_role.is_empty() {
        return Err(AppError::Validation(
            "Missing resume text or selected role".to_string(),
        ));
    }

    let role = find_role(selected_role)
        .ok_or_else(|| AppError::Validation("Invalid role selected".to_string()))?;

    let extracted = extract_skills(resume_text, &state.llm).await?;
    let skills = merge_user_skills(&extracted);
    let gap = compare_skills(&skills, role.required_skills);
    let ats = compute_ats_score(resume_text, role.required_skills);
    let demand = industry_demand(role.name);

    let roadmap = generate_roadmap(
        role.name,
        &gap.missing_skills,
        Some(skills.as_slice()),
        &state.llm,
    )
    .await?;

    info!(
        "Analyzed resume for '{}': {}% match, ATS {}",
        role.name, gap.skill_match_percentage, ats.score
    );

    Ok(Json(AnalyzeResponse {
        user_id: request.email.map(|email| format!("email:{email}")),
        skills,
        extracted,
        comparison: Comparison {
            matched_skills: gap.matched_skills,
            missing_skills: gap.missing_skills,
            match_score: gap.skill_match_percentage,
        },
        roadmap,
        ats,
        demand,
    }))
}

/// POST /api/analyze-resume
///
/// Resume vs. job description. Roadmap items are enriched with YouTube courses;
/// enrichment problems leave the lists empty.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeResumeRequest>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let resume_text = require_text(&request.resume_text, "Missing resume text")?;
    let job_description = require_text(&request.job_description, "Missing job description")?;

    let mut analysis = analyze_with_job_description(resume_text, job_description, &state.llm).await?;
    analysis.roadmap = enrich_with_youtube(analysis.roadmap, state.videos.as_ref()).await;

    Ok(Json(analysis))
}

/// GET /api/job-roles
pub async fn handle_job_roles() -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: job_role_options(),
    })
}

/// POST /api/analyze-role
///
/// Gap analysis against a job role's required skills, with per-skill staged roadmaps.
pub async fn handle_analyze_role(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeRoleRequest>,
) -> Result<Json<RoleAnalysis>, AppError> {
    let resume_text = require_text(&request.resume_text, "Missing resume text")?;
    let job_role = require_text(&request.job_role, "Missing job role")?;

    let required = required_skills_for(job_role);
    if required.is_empty() {
        return Err(AppError::Validation(format!("Unknown job role: {job_role}")));
    }

    let analysis = analyze_for_role(resume_text, job_role, &required, &state.llm).await?;
    Ok(Json(analysis))
}

/// POST /api/critique-resume
pub async fn handle_critique(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CritiqueRequest>,
) -> Result<Json<CritiqueResponse>, AppError> {
    let resume_text = require_text(&request.resume_text, "Missing resume text")?;
    let analysis = critique_resume(resume_text, request.job_role.as_deref(), &state.llm).await?;
    Ok(Json(CritiqueResponse { analysis }))
}

/// POST /api/critique-resume/file
///
/// Multipart variant: `file` (PDF or plain text) and optional `job_role`.
pub async fn handle_critique_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CritiqueResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.take_file()?;

    let resume_text =
        extract_text_from_upload(&file.file_name, file.content_type.as_deref(), file.bytes).await?;

    let analysis = critique_resume(&resume_text, form.text_field("job_role"), &state.llm).await?;
    Ok(Json(CritiqueResponse { analysis }))
}

/// POST /api/roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RoadmapRequest>,
) -> Result<Json<Roadmap>, AppError> {
    let target_role = request.target_role.trim();
    let missing_skills = match request.missing_skills {
        Some(skills) if !target_role.is_empty() => skills,
        _ => {
            return Err(AppError::Validation(
                "targetRole and missingSkills are required".to_string(),
            ))
        }
    };

    let roadmap = generate_roadmap(
        target_role,
        &missing_skills,
        request.current_skills.as_deref(),
        &state.llm,
    )
    .await?;

    Ok(Json(roadmap))
}
