//! Resume analysis against a job description or a catalog role.
//!
//! Both flows ask the model for a gap analysis and then repair the reply into a
//! fixed shape, since the model's JSON drifts from the requested schema.

use std::collections::BTreeMap;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::analysis::prompts::{
    JD_ANALYSIS_PROMPT_TEMPLATE, ROLE_ANALYSIS_SYSTEM_TEMPLATE, ROLE_ANALYSIS_USER_TEMPLATE,
};
use crate::analysis::repair::{clamp_percentage, lenient_number, string_list, string_or};
use crate::llm_client::prompts::{clip, fill, JSON_ONLY_SYSTEM};
use crate::llm_client::{CallOptions, LlmClient, LlmError};
use crate::resources::youtube::{course_query, VideoSearch, YouTubeVideo};

const MAX_RESUME_CHARS: usize = 14_000;
const MAX_JOB_DESCRIPTION_CHARS: usize = 4_000;
const MAX_ROLE_RESUME_CHARS: usize = 12_000;
const VIDEOS_PER_ROADMAP_ITEM: u32 = 3;
const STAGE_COUNT: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Job description analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub skill: String,
    pub beginner_steps: Vec<String>,
    pub intermediate_steps: Vec<String>,
    pub advanced_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_resources: Option<Vec<YouTubeVideo>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Match percentage as a decimal string, "0" – "100".
    pub skill_gap_percentage: String,
    pub roadmap: Vec<RoadmapItem>,
}

pub async fn analyze_with_job_description(
    resume_text: &str,
    job_description: &str,
    llm: &LlmClient,
) -> Result<ResumeAnalysis, LlmError> {
    let prompt = fill(
        JD_ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("resume_text", clip(resume_text, MAX_RESUME_CHARS)),
            (
                "job_description",
                clip(job_description, MAX_JOB_DESCRIPTION_CHARS),
            ),
        ],
    );

    let value: Value = llm
        .complete_json(JSON_ONLY_SYSTEM, &prompt, CallOptions::with_temperature(0.2))
        .await?;

    Ok(repair_analysis(&value))
}

pub fn repair_analysis(value: &Value) -> ResumeAnalysis {
    let skill_gap_percentage = lenient_number(value.get("skill_gap_percentage"))
        .map(clamp_percentage)
        .unwrap_or(0)
        .to_string();

    let roadmap = value
        .get("roadmap")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(repair_roadmap_item).collect())
        .unwrap_or_default();

    ResumeAnalysis {
        matched_skills: string_list(value.get("matched_skills")),
        missing_skills: string_list(value.get("missing_skills")),
        skill_gap_percentage,
        roadmap,
    }
}

fn repair_roadmap_item(item: &Value) -> Option<RoadmapItem> {
    let skill = item.get("skill")?.as_str()?.trim();
    if skill.is_empty() {
        return None;
    }
    Some(RoadmapItem {
        skill: skill.to_string(),
        beginner_steps: string_list(item.get("beginner_steps")),
        intermediate_steps: string_list(item.get("intermediate_steps")),
        advanced_steps: string_list(item.get("advanced_steps")),
        youtube_resources: None,
    })
}

/// Attaches course videos to each roadmap item. Lookups run concurrently.
pub async fn enrich_with_youtube(
    roadmap: Vec<RoadmapItem>,
    videos: &dyn VideoSearch,
) -> Vec<RoadmapItem> {
    let lookups = roadmap.into_iter().map(|mut item| async move {
        let found = videos
            .search(&course_query(&item.skill), VIDEOS_PER_ROADMAP_ITEM)
            .await;
        item.youtube_resources = Some(found);
        item
    });
    join_all(lookups).await
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog role analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl StageLevel {
    const ORDER: [StageLevel; STAGE_COUNT] = [
        StageLevel::Beginner,
        StageLevel::Intermediate,
        StageLevel::Advanced,
    ];

    fn parse(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("Intermediate") => StageLevel::Intermediate,
            Some("Advanced") => StageLevel::Advanced,
            _ => StageLevel::Beginner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStage {
    pub level: StageLevel,
    pub topics: Vec<String>,
    pub projects: Vec<String>,
    pub duration: String,
}

impl RoadmapStage {
    fn empty(level: StageLevel) -> Self {
        Self {
            level,
            topics: vec![],
            projects: vec![],
            duration: String::new(),
        }
    }

    fn repair(value: &Value) -> Self {
        Self {
            level: StageLevel::parse(value.get("level")),
            topics: string_list(value.get("topics")),
            projects: string_list(value.get("projects")),
            duration: string_or(value.get("duration"), ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRoadmap {
    pub stages: Vec<RoadmapStage>,
    pub youtube_queries: Vec<String>,
}

impl SkillRoadmap {
    fn placeholder() -> Self {
        Self {
            stages: StageLevel::ORDER.into_iter().map(RoadmapStage::empty).collect(),
            youtube_queries: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAnalysis {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub skill_gap_percentage: u8,
    /// Keyed by missing skill.
    pub roadmap: BTreeMap<String, SkillRoadmap>,
}

pub async fn analyze_for_role(
    resume_text: &str,
    job_role: &str,
    required_skills: &[String],
    llm: &LlmClient,
) -> Result<RoleAnalysis, LlmError> {
    let required_json = serde_json::to_string(required_skills)?;
    let system = fill(
        ROLE_ANALYSIS_SYSTEM_TEMPLATE,
        &[("required_skills_json", &required_json)],
    );
    let user = fill(
        ROLE_ANALYSIS_USER_TEMPLATE,
        &[
            ("job_role", job_role),
            ("resume_text", clip(resume_text, MAX_ROLE_RESUME_CHARS)),
        ],
    );

    let value: Value = llm
        .complete_json(
            &system,
            &user,
            CallOptions {
                max_tokens: 4096,
                ..CallOptions::with_temperature(0.2).json()
            },
        )
        .await?;

    debug!("Role analysis for '{job_role}' against {} skills", required_skills.len());
    Ok(repair_role_analysis(&value, required_skills.len()))
}

pub fn repair_role_analysis(value: &Value, required_count: usize) -> RoleAnalysis {
    let matching_skills = string_list(value.get("matchingSkills"));
    let missing_skills = string_list(value.get("missingSkills"));

    let skill_gap_percentage = match lenient_number(value.get("skillGapPercentage")) {
        Some(n) => clamp_percentage(n),
        None if required_count > 0 => {
            clamp_percentage(100.0 * missing_skills.len() as f64 / required_count as f64)
        }
        None => 0,
    };

    let roadmap = match value.get("roadmap").and_then(Value::as_object) {
        Some(entries) => missing_skills
            .iter()
            .map(|skill| {
                let repaired = entries
                    .get(skill)
                    .and_then(repair_skill_roadmap)
                    .unwrap_or_else(SkillRoadmap::placeholder);
                (skill.clone(), repaired)
            })
            .collect(),
        None => BTreeMap::new(),
    };

    RoleAnalysis {
        matching_skills,
        missing_skills,
        skill_gap_percentage,
        roadmap,
    }
}

fn repair_skill_roadmap(entry: &Value) -> Option<SkillRoadmap> {
    let stages = entry.get("stages")?.as_array()?;
    Some(SkillRoadmap {
        stages: stages.iter().take(STAGE_COUNT).map(RoadmapStage::repair).collect(),
        youtube_queries: string_list(entry.get("youtubeQueries")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::youtube::testing::EchoVideoSearch;
    use crate::config::Config;
    use crate::resources::youtube::DisabledVideoSearch;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_replying(content: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    async fn sent_prompts(server: &MockServer) -> (String, String) {
        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        (
            body["messages"][0]["content"].as_str().unwrap().to_string(),
            body["messages"][1]["content"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_job_description_inputs_clipped() {
        let server = server_replying(r#"{"matched_skills": ["Go"], "skill_gap_percentage": 50}"#).await;
        let llm = LlmClient::for_tests(&Config::for_tests(&server.uri()));

        let resume = format!("{}RESUME_TAIL", "r".repeat(MAX_RESUME_CHARS));
        let jd = format!("{}JD_TAIL", "j".repeat(MAX_JOB_DESCRIPTION_CHARS));
        let analysis = analyze_with_job_description(&resume, &jd, &llm).await.unwrap();
        assert_eq!(analysis.matched_skills, vec!["Go"]);
        assert_eq!(analysis.skill_gap_percentage, "50");

        let (_, prompt) = sent_prompts(&server).await;
        assert!(prompt.contains(&"r".repeat(MAX_RESUME_CHARS)));
        assert!(!prompt.contains("RESUME_TAIL"));
        assert!(prompt.contains(&"j".repeat(MAX_JOB_DESCRIPTION_CHARS)));
        assert!(!prompt.contains("JD_TAIL"));
    }

    #[tokio::test]
    async fn test_resume_placeholder_text_not_expanded() {
        let server = server_replying("{}").await;
        let llm = LlmClient::for_tests(&Config::for_tests(&server.uri()));

        analyze_with_job_description("Wrote {job_description} parsers", "Senior Go role", &llm)
            .await
            .unwrap();

        let (_, prompt) = sent_prompts(&server).await;
        assert!(prompt.contains("Wrote {job_description} parsers"));
        assert_eq!(prompt.matches("Senior Go role").count(), 1);
    }

    #[tokio::test]
    async fn test_role_analysis_prompt_clips_resume() {
        let server = server_replying(r#"{"matchingSkills": ["SQL"], "missingSkills": []}"#).await;
        let llm = LlmClient::for_tests(&Config::for_tests(&server.uri()));

        let resume = format!("{}ROLE_TAIL", "s".repeat(MAX_ROLE_RESUME_CHARS));
        let required = vec!["SQL".to_string()];
        let analysis = analyze_for_role(&resume, "Data Analyst", &required, &llm)
            .await
            .unwrap();
        assert_eq!(analysis.matching_skills, vec!["SQL"]);

        let (system, prompt) = sent_prompts(&server).await;
        assert!(system.contains(r#"["SQL"]"#));
        assert!(prompt.contains("Data Analyst"));
        assert!(prompt.contains(&"s".repeat(MAX_ROLE_RESUME_CHARS)));
        assert!(!prompt.contains("ROLE_TAIL"));
    }

    #[test]
    fn test_repair_analysis_keeps_string_skills() {
        let value = json!({
            "matched_skills": ["Python", 42, null, "SQL"],
            "missing_skills": ["Docker"],
            "skill_gap_percentage": "68",
            "roadmap": [{"skill": "Docker", "beginner_steps": ["Install Docker"]}]
        });
        let analysis = repair_analysis(&value);
        assert_eq!(analysis.matched_skills, vec!["Python", "SQL"]);
        assert_eq!(analysis.skill_gap_percentage, "68");
        assert_eq!(analysis.roadmap.len(), 1);
        assert_eq!(analysis.roadmap[0].beginner_steps, vec!["Install Docker"]);
        assert!(analysis.roadmap[0].advanced_steps.is_empty());
    }

    #[test]
    fn test_repair_analysis_percentage_variants() {
        assert_eq!(repair_analysis(&json!({"skill_gap_percentage": 72.6})).skill_gap_percentage, "73");
        assert_eq!(repair_analysis(&json!({"skill_gap_percentage": "140"})).skill_gap_percentage, "100");
        assert_eq!(repair_analysis(&json!({"skill_gap_percentage": "n/a"})).skill_gap_percentage, "0");
        assert_eq!(repair_analysis(&json!({})).skill_gap_percentage, "0");
    }

    #[test]
    fn test_repair_analysis_drops_nameless_roadmap_items() {
        let value = json!({"roadmap": [{"beginner_steps": ["x"]}, "Docker", {"skill": " Go "}]});
        let analysis = repair_analysis(&value);
        assert_eq!(analysis.roadmap.len(), 1);
        assert_eq!(analysis.roadmap[0].skill, "Go");
    }

    #[tokio::test]
    async fn test_enrich_attaches_course_videos() {
        let analysis = repair_analysis(&json!({
            "roadmap": [{"skill": "Kubernetes"}, {"skill": "Terraform"}]
        }));
        let enriched = enrich_with_youtube(analysis.roadmap, &EchoVideoSearch).await;
        assert_eq!(enriched.len(), 2);
        let videos = enriched[1].youtube_resources.as_ref().unwrap();
        assert_eq!(videos[0].title, "Learn Terraform full course");
    }

    #[tokio::test]
    async fn test_enrich_without_search_yields_empty_lists() {
        let analysis = repair_analysis(&json!({"roadmap": [{"skill": "Rust"}]}));
        let enriched = enrich_with_youtube(analysis.roadmap, &DisabledVideoSearch).await;
        assert_eq!(enriched[0].youtube_resources, Some(vec![]));
    }

    #[test]
    fn test_role_percentage_computed_when_missing() {
        let value = json!({
            "matchingSkills": ["Python"],
            "missingSkills": ["Docker", "AWS"],
            "roadmap": {}
        });
        let analysis = repair_role_analysis(&value, 3);
        assert_eq!(analysis.skill_gap_percentage, 67);
    }

    #[test]
    fn test_role_percentage_zero_without_required_skills() {
        let analysis = repair_role_analysis(&json!({"missingSkills": ["Docker"]}), 0);
        assert_eq!(analysis.skill_gap_percentage, 0);
        assert!(analysis.roadmap.is_empty());
    }

    #[test]
    fn test_role_roadmap_stages_repaired() {
        let value = json!({
            "missingSkills": ["Docker", "AWS"],
            "skillGapPercentage": 50,
            "roadmap": {
                "Docker": {
                    "stages": [
                        {"level": "Beginner", "topics": ["images"], "projects": [], "duration": "1 week"},
                        {"level": "Expert", "topics": ["swarm"]},
                        {"level": "Advanced"},
                        {"level": "Intermediate"}
                    ],
                    "youtubeQueries": ["docker tutorial"]
                }
            }
        });
        let analysis = repair_role_analysis(&value, 4);
        assert_eq!(analysis.skill_gap_percentage, 50);

        let docker = &analysis.roadmap["Docker"];
        assert_eq!(docker.stages.len(), 3);
        assert_eq!(docker.stages[1].level, StageLevel::Beginner);
        assert_eq!(docker.stages[1].topics, vec!["swarm"]);
        assert_eq!(docker.stages[2].level, StageLevel::Advanced);
        assert_eq!(docker.youtube_queries, vec!["docker tutorial"]);

        let aws = &analysis.roadmap["AWS"];
        assert_eq!(aws.stages.len(), 3);
        assert_eq!(aws.stages[2].level, StageLevel::Advanced);
        assert!(aws.stages.iter().all(|s| s.topics.is_empty() && s.duration.is_empty()));
    }

    #[test]
    fn test_role_analysis_serializes_camel_case() {
        let analysis = repair_role_analysis(
            &json!({"missingSkills": ["Go"], "roadmap": {}}),
            1,
        );
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["skillGapPercentage"], 100);
        assert!(json["roadmap"]["Go"].get("youtubeQueries").is_some());
        assert_eq!(json["roadmap"]["Go"]["stages"][0]["level"], "Beginner");
    }
}
