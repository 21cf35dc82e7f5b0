//! Monthly learning roadmap: an LLM-generated plan toward a target role.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::analysis::prompts::{ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM};
use crate::analysis::repair::{lenient_number, string_list, string_or};
use crate::llm_client::prompts::fill;
use crate::llm_client::{CallOptions, LlmClient, LlmError};

const ROADMAP_MONTHS: usize = 6;
const SKILLS_PER_SYNTHETIC_MONTH: usize = 2;
const DEFAULT_HOURS_PER_WEEK: f64 = 8.0;
const MAX_CURRENT_SKILLS_IN_PROMPT: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapMonth {
    pub month: f64,
    pub focus_skills: Vec<String>,
    pub recommended_projects: Vec<String>,
    pub weekly_goals: String,
    pub estimated_hours_per_week: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub months: Vec<RoadmapMonth>,
}

pub async fn generate_roadmap(
    target_role: &str,
    missing_skills: &[String],
    current_skills: Option<&[String]>,
    llm: &LlmClient,
) -> Result<Roadmap, LlmError> {
    let current_skills_line = match current_skills {
        Some(skills) if !skills.is_empty() => format!(
            "Current skills: {}",
            skills
                .iter()
                .take(MAX_CURRENT_SKILLS_IN_PROMPT)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        _ => String::new(),
    };

    let prompt = fill(
        ROADMAP_PROMPT_TEMPLATE,
        &[
            ("target_role", target_role),
            ("missing_skills", &missing_skills.join(", ")),
            ("current_skills_line", &current_skills_line),
        ],
    );

    let value: Value = llm
        .complete_json(
            ROADMAP_SYSTEM,
            &prompt,
            CallOptions::with_temperature(0.3).json(),
        )
        .await?;

    Ok(repair_roadmap(value, missing_skills))
}

/// Accepts a well-formed roadmap as-is; otherwise salvages what it can.
///
/// - `months` array present: first six months, each field defaulted when unusable.
/// - no `months` array: a synthetic six-month plan covering the missing skills two at a time.
pub fn repair_roadmap(value: Value, missing_skills: &[String]) -> Roadmap {
    if let Ok(roadmap) = serde_json::from_value::<Roadmap>(value.clone()) {
        return roadmap;
    }

    match value.get("months").and_then(Value::as_array) {
        Some(months) => {
            warn!("Roadmap reply did not match schema, repairing {} months", months.len());
            Roadmap {
                months: months
                    .iter()
                    .take(ROADMAP_MONTHS)
                    .enumerate()
                    .map(|(i, m)| repair_month(i, m))
                    .collect(),
            }
        }
        None => {
            warn!("Roadmap reply had no months, synthesizing a plan");
            synthesize_roadmap(missing_skills)
        }
    }
}

fn repair_month(index: usize, month: &Value) -> RoadmapMonth {
    RoadmapMonth {
        month: lenient_number(month.get("month")).unwrap_or(index as f64 + 1.0),
        focus_skills: string_list(month.get("focusSkills")),
        recommended_projects: string_list(month.get("recommendedProjects")),
        weekly_goals: string_or(month.get("weeklyGoals"), ""),
        estimated_hours_per_week: month
            .get("estimatedHoursPerWeek")
            .and_then(Value::as_f64)
            .unwrap_or(DEFAULT_HOURS_PER_WEEK),
    }
}

fn synthesize_roadmap(missing_skills: &[String]) -> Roadmap {
    let mut chunks = missing_skills.chunks(SKILLS_PER_SYNTHETIC_MONTH);
    let months = (0..ROADMAP_MONTHS)
        .map(|i| RoadmapMonth {
            month: i as f64 + 1.0,
            focus_skills: chunks.next().map(<[String]>::to_vec).unwrap_or_default(),
            recommended_projects: vec![],
            weekly_goals: "Focus on skill building".to_string(),
            estimated_hours_per_week: DEFAULT_HOURS_PER_WEEK,
        })
        .collect();
    Roadmap { months }
}
