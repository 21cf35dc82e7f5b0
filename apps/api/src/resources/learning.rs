//! Learning resources per missing skill.
//!
//! Built from YouTube search when a key is configured, otherwise generated by the LLM.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::analysis::repair::{lenient_number, string_or};
use crate::llm_client::prompts::fill;
use crate::llm_client::{CallOptions, LlmClient, LlmError};
use crate::resources::prompts::{LEARNING_RESOURCES_PROMPT_TEMPLATE, LEARNING_RESOURCES_SYSTEM};
use crate::resources::youtube::{resources_for_skills, SkillVideos, VideoSearch};

const SEARCH_BASED_WEEKS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoLink {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseLink {
    pub title: String,
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub skill: String,
    pub youtube: Vec<VideoLink>,
    pub courses: Vec<CourseLink>,
    pub project_suggestion: String,
    pub estimated_learning_time_weeks: u32,
}

impl From<SkillVideos> for LearningResource {
    fn from(found: SkillVideos) -> Self {
        let project_suggestion = format!(
            "Build a small project using {} to solidify your learning.",
            found.skill
        );
        LearningResource {
            youtube: found
                .videos
                .into_iter()
                .map(|v| VideoLink {
                    title: v.title,
                    url: v.url,
                    channel: Some(v.channel),
                })
                .collect(),
            skill: found.skill,
            courses: vec![],
            project_suggestion,
            estimated_learning_time_weeks: SEARCH_BASED_WEEKS,
        }
    }
}

pub async fn learning_resources(
    missing_skills: &[String],
    videos: &dyn VideoSearch,
    llm: &LlmClient,
) -> Result<Vec<LearningResource>, LlmError> {
    if videos.is_enabled() {
        let found = resources_for_skills(videos, missing_skills).await;
        return Ok(found.into_iter().map(LearningResource::from).collect());
    }
    generate_learning_resources(missing_skills, llm).await
}

/// Asks the LLM for videos, courses and a project per skill.
pub async fn generate_learning_resources(
    missing_skills: &[String],
    llm: &LlmClient,
) -> Result<Vec<LearningResource>, LlmError> {
    if missing_skills.is_empty() {
        return Ok(vec![]);
    }

    let prompt = fill(
        LEARNING_RESOURCES_PROMPT_TEMPLATE,
        &[("skills_list", &missing_skills.join(", "))],
    );
    let value: Value = llm
        .complete_json(
            LEARNING_RESOURCES_SYSTEM,
            &prompt,
            CallOptions::with_temperature(0.4),
        )
        .await?;

    let resources = repair_resources(&value);
    info!(
        "Generated learning resources for {} of {} skills",
        resources.len(),
        missing_skills.len()
    );
    Ok(resources)
}

fn repair_resources(value: &Value) -> Vec<LearningResource> {
    let Some(items) = value.get("resources").and_then(Value::as_array) else {
        warn!("Learning resources reply had no resources array");
        return vec![];
    };

    items
        .iter()
        .filter_map(|item| {
            let skill = item.get("skill")?.as_str()?.trim();
            if skill.is_empty() {
                return None;
            }
            Some(LearningResource {
                skill: skill.to_string(),
                youtube: links(item.get("youtube")),
                courses: links(item.get("courses")),
                project_suggestion: string_or(item.get("projectSuggestion"), ""),
                estimated_learning_time_weeks: lenient_number(item.get("estimatedLearningTimeWeeks"))
                    .map(|w| w.round().max(0.0) as u32)
                    .unwrap_or(0),
            })
        })
        .collect()
}

/// Entries of a link array that deserialize cleanly; malformed ones are dropped.
fn links<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
