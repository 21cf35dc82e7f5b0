// Resume analysis: skill extraction, gap scoring, ATS heuristics, roadmaps and critique.
// Local scoring lives in skills/ats; everything LLM-backed repairs its reply via repair.rs.

pub mod analyzer;
pub mod ats;
pub mod critique;
pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod repair;
pub mod roadmap;
pub mod skills;
