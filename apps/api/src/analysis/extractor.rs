//! Skill extraction: asks the LLM for a structured skill inventory from raw resume text.

use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{EXTRACT_SKILLS_PROMPT_TEMPLATE, EXTRACT_SKILLS_SYSTEM};
use crate::llm_client::prompts::{clip, fill};
use crate::llm_client::{parse_json_reply, CallOptions, LlmClient, LlmError};

const MAX_RESUME_CHARS: usize = 12_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkills {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tools: Vec<String>,
    /// "Junior" | "Mid" | "Senior" | "Lead" | "Unknown"
    pub experience_level: String,
}

/// Shapes the model is known to return. Older prompts produced a flat `skills` list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExtractionReply {
    Structured(ExtractedSkills),
    Legacy { skills: Vec<String> },
}

impl From<ExtractionReply> for ExtractedSkills {
    fn from(reply: ExtractionReply) -> Self {
        match reply {
            ExtractionReply::Structured(skills) => skills,
            ExtractionReply::Legacy { skills } => ExtractedSkills {
                technical_skills: skills,
                soft_skills: vec![],
                tools: vec![],
                experience_level: "Unknown".to_string(),
            },
        }
    }
}

pub async fn extract_skills(resume_text: &str, llm: &LlmClient) -> Result<ExtractedSkills, LlmError> {
    let prompt = fill(
        EXTRACT_SKILLS_PROMPT_TEMPLATE,
        &[("resume_text", clip(resume_text, MAX_RESUME_CHARS))],
    );
    let raw = llm
        .complete(
            EXTRACT_SKILLS_SYSTEM,
            &prompt,
            CallOptions::with_temperature(0.1).json(),
        )
        .await?;
    parse_extraction(&raw)
}

/// Parses the model reply, accepting the structured or legacy shape.
pub fn parse_extraction(raw: &str) -> Result<ExtractedSkills, LlmError> {
    let value: serde_json::Value = parse_json_reply(raw)?;
    serde_json::from_value::<ExtractionReply>(value)
        .map(ExtractedSkills::from)
        .map_err(|_| {
            LlmError::UnexpectedShape("AI response format unexpected. Please try again.".to_string())
        })
}
