//! AI polish for the resume builder: summary, bullet rewrite and skill suggestions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::builder::models::{Education, Experience, Personal};
use crate::builder::prompts::{ENHANCE_DESCRIPTION_SYSTEM, SUGGEST_SKILLS_SYSTEM, SUMMARY_SYSTEM};
use crate::llm_client::{CallOptions, LlmClient, LlmError};

const TEMPERATURE: f32 = 0.7;

/// Leading list markers the model adds despite instructions: "-", "*", "•", "1.", "2)".
/// A marker must be followed by whitespace, so "3.5x faster" is not a numbered item.
static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").expect("valid list marker regex"));

fn or_none(joined: String) -> String {
    if joined.is_empty() {
        "None".to_string()
    } else {
        joined
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}

pub fn summary_context(
    personal: &Personal,
    experience: &[Experience],
    education: &[Education],
    skills: &[String],
) -> String {
    let experience_line = experience
        .iter()
        .map(|e| format!("{} at {}", e.title, e.company))
        .collect::<Vec<_>>()
        .join("; ");
    let education_line = education
        .iter()
        .map(|e| format!("{} - {}", e.degree, e.school))
        .collect::<Vec<_>>()
        .join("; ");
    [
        format!("Name: {}", or_default(&personal.name, "N/A")),
        format!("Target role/industry: {}", or_default(&personal.target_role, "General")),
        format!("Experience: {}", or_none(experience_line)),
        format!("Education: {}", or_none(education_line)),
        format!("Skills: {}", or_none(skills.join(", "))),
    ]
    .join("\n")
}

pub async fn generate_summary(
    personal: &Personal,
    experience: &[Experience],
    education: &[Education],
    skills: &[String],
    llm: &LlmClient,
) -> Result<String, LlmError> {
    let context = summary_context(personal, experience, education, skills);
    let summary = llm
        .complete(SUMMARY_SYSTEM, &context, CallOptions::with_temperature(TEMPERATURE))
        .await?;
    Ok(summary.trim().to_string())
}

/// Rewrites a free-form description into resume bullets, one per line, markers stripped.
pub async fn enhance_job_description(
    role: &str,
    company: &str,
    description: &str,
    llm: &LlmClient,
) -> Result<Vec<String>, LlmError> {
    let user = format!("Role: {role}\nCompany: {company}\n\nOriginal description:\n{description}");
    let reply = llm
        .complete(
            ENHANCE_DESCRIPTION_SYSTEM,
            &user,
            CallOptions::with_temperature(TEMPERATURE),
        )
        .await?;
    Ok(parse_bullets(&reply))
}

pub fn parse_bullets(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(|line| LIST_MARKER_RE.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

pub async fn suggest_skills(
    experience: &[Experience],
    education: &[Education],
    existing_skills: &[String],
    llm: &LlmClient,
) -> Result<Vec<String>, LlmError> {
    let experience_line = experience
        .iter()
        .map(|e| format!("{} at {}: {}", e.title, e.company, e.description))
        .collect::<Vec<_>>()
        .join("\n");
    let education_line = education
        .iter()
        .map(|e| format!("{} - {} ({})", e.degree, e.school, e.field))
        .collect::<Vec<_>>()
        .join("; ");
    let context = [
        format!("Work experience: {}", or_none(experience_line)),
        format!("Education: {}", or_none(education_line)),
        format!("Existing skills: {}", or_none(existing_skills.join(", "))),
    ]
    .join("\n");

    let reply = llm
        .complete(
            SUGGEST_SKILLS_SYSTEM,
            &context,
            CallOptions::with_temperature(TEMPERATURE),
        )
        .await?;
    Ok(parse_skill_list(&reply))
}

pub fn parse_skill_list(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
