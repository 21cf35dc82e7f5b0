//! ATS score: a local heuristic for how well a resume survives keyword-scanning software.
//!
//! Not a real ATS. Pure-Rust, deterministic, no LLM call.
//!
//! Algorithm (points, clamped to 0 – 100):
//! - base 40
//! - +15 if any standard section heading is present
//! - + round(keyword_ratio × 30), keyword_ratio = required skills found in the text / required
//! - +10 if the text uses bullet structure
//! - +5 if the text is longer than 500 characters

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const BASE_SCORE: u32 = 40;
const SECTION_POINTS: u32 = 15;
const KEYWORD_POINTS: f64 = 30.0;
const BULLET_POINTS: u32 = 10;
const LENGTH_POINTS: u32 = 5;
const LENGTH_THRESHOLD_CHARS: usize = 500;
const LOW_KEYWORD_RATIO: f64 = 0.4;

static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)experience|projects|education|skills|summary|objective")
        .expect("section regex is valid")
});

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"•|-\s+|\d+\.").expect("bullet regex is valid"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsResult {
    /// 0 – 100
    pub score: u8,
    pub notes: Vec<String>,
}

pub fn compute_ats_score<S: AsRef<str>>(resume_text: &str, required_skills: &[S]) -> AtsResult {
    let text_lower = resume_text.to_lowercase();
    let mut notes = Vec::with_capacity(3);
    let mut score = BASE_SCORE;

    if SECTION_RE.is_match(resume_text) {
        score += SECTION_POINTS;
        notes.push("Good use of standard sections (Experience, Projects, Skills).".to_string());
    } else {
        notes.push("Add clear sections: Experience, Projects, Skills, Education.".to_string());
    }

    let ratio = keyword_ratio(&text_lower, required_skills);
    score += (ratio * KEYWORD_POINTS).round() as u32;
    if ratio < LOW_KEYWORD_RATIO {
        notes.push("Include more target role keywords in bullet points.".to_string());
    } else {
        notes.push("Good keyword coverage for the role.".to_string());
    }

    if BULLET_RE.is_match(resume_text) {
        score += BULLET_POINTS;
        notes.push("Uses bullet points—ATS parses these well.".to_string());
    } else {
        notes.push("Use concise bullet points instead of paragraphs.".to_string());
    }

    if resume_text.chars().count() > LENGTH_THRESHOLD_CHARS {
        score += LENGTH_POINTS;
    }

    AtsResult {
        score: score.min(100) as u8,
        notes,
    }
}

/// Fraction of required skills that appear verbatim (case-insensitive) in the text.
fn keyword_ratio<S: AsRef<str>>(text_lower: &str, required_skills: &[S]) -> f64 {
    let hits = required_skills
        .iter()
        .filter(|s| text_lower.contains(&s.as_ref().to_lowercase()))
        .count();
    hits as f64 / required_skills.len().max(1) as f64
}
