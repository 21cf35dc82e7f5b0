//! Narrative resume feedback.

use crate::analysis::prompts::{CRITIQUE_PROMPT_TEMPLATE, CRITIQUE_SYSTEM};
use crate::llm_client::prompts::{clip, fill};
use crate::llm_client::{CallOptions, LlmClient, LlmError};

const MAX_RESUME_CHARS: usize = 14_000;
const DEFAULT_TARGET: &str = "general job applications";

pub async fn critique_resume(
    resume_text: &str,
    job_role: Option<&str>,
    llm: &LlmClient,
) -> Result<String, LlmError> {
    let prompt = critique_prompt(resume_text, job_role);
    let feedback = llm
        .complete(CRITIQUE_SYSTEM, &prompt, CallOptions::with_temperature(0.7))
        .await?;
    Ok(feedback.trim().to_string())
}

fn critique_prompt(resume_text: &str, job_role: Option<&str>) -> String {
    let target = job_role
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_TARGET);
    fill(
        CRITIQUE_PROMPT_TEMPLATE,
        &[
            ("target_role", target),
            ("resume_text", clip(resume_text, MAX_RESUME_CHARS)),
        ],
    )
}
