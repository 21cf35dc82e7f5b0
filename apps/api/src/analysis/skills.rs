//! Skill-set comparison between a candidate and a role template.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analysis::extractor::ExtractedSkills;

/// How many soft skills count toward the comparison set.
const SOFT_SKILL_LIMIT: usize = 5;

/// Result of comparing a candidate's skills against a role's required skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapResult {
    /// Required skills the candidate has, in required-list order and spelling.
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// 0 – 100
    pub skill_match_percentage: u8,
}

pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Splits `required` into matched and missing against `user_skills`, ignoring case and
/// surrounding whitespace. An empty requirement list scores 0.
pub fn compare_skills<U, R>(user_skills: &[U], required: &[R]) -> SkillGapResult
where
    U: AsRef<str>,
    R: AsRef<str>,
{
    let normalized_user: HashSet<String> = user_skills
        .iter()
        .map(|s| normalize_skill(s.as_ref()))
        .collect();

    let (matched, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .map(|s| s.as_ref().to_string())
        .partition(|s| normalized_user.contains(&normalize_skill(s)));

    let skill_match_percentage = percentage(matched.len(), required.len());

    SkillGapResult {
        matched_skills: matched,
        missing_skills: missing,
        skill_match_percentage,
    }
}

/// round(part / whole × 100), clamped to 0 – 100; 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Builds the comparison set: technical skills, tools, then the first few soft skills.
pub fn merge_user_skills(extracted: &ExtractedSkills) -> Vec<String> {
    let all = extracted
        .technical_skills
        .iter()
        .chain(extracted.tools.iter())
        .chain(extracted.soft_skills.iter().take(SOFT_SKILL_LIMIT));
    dedup_skills(all)
}

/// Trims, drops blanks and removes case-insensitive duplicates. The first spelling wins.
pub fn dedup_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(technical: &[&str], soft: &[&str], tools: &[&str]) -> ExtractedSkills {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        ExtractedSkills {
            technical_skills: owned(technical),
            soft_skills: owned(soft),
            tools: owned(tools),
            experience_level: "Junior".to_string(),
        }
    }

    #[test]
    fn test_compare_ignores_case_and_whitespace() {
        let result = compare_skills(&[" react ", "SQL"], &["React", "sql", "Docker"]);
        assert_eq!(result.matched_skills, vec!["React", "sql"]);
        assert_eq!(result.missing_skills, vec!["Docker"]);
        assert_eq!(result.skill_match_percentage, 67);
    }

    #[test]
    fn test_compare_keeps_required_order() {
        let result = compare_skills(&["c", "a"], &["a", "b", "c"]);
        assert_eq!(result.matched_skills, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        let empty: [&str; 0] = [];
        let result = compare_skills(&["Rust"], &empty);
        assert_eq!(result.skill_match_percentage, 0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_full_match_is_100() {
        let result = compare_skills(&["Git", "SQL"], &["git", "sql"]);
        assert_eq!(result.skill_match_percentage, 100);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn test_merge_takes_first_five_soft_skills() {
        let soft = ["a", "b", "c", "d", "e", "f", "g"];
        let merged = merge_user_skills(&extracted(&["Rust"], &soft, &["Git"]));
        assert_eq!(merged, vec!["Rust", "Git", "a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_merge_dedups_case_insensitively() {
        let merged = merge_user_skills(&extracted(&["Docker", " "], &[], &["docker", "Git "]));
        assert_eq!(merged, vec!["Docker", "Git"]);
    }
}
