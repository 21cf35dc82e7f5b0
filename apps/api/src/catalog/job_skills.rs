//! Per-job skill requirements for the role analyzer.
//! Keep skill names consistent so the model can echo them back verbatim.

static JOB_SKILL_REQUIREMENTS: &[(&str, &[&str])] = &[
    (
        "Frontend Developer",
        &[
            "HTML",
            "CSS",
            "JavaScript",
            "React",
            "TypeScript",
            "Responsive Design",
            "Git",
            "REST APIs",
        ],
    ),
    (
        "Backend Developer",
        &[
            "Node.js",
            "Python",
            "Java",
            "REST APIs",
            "SQL",
            "Database Design",
            "Git",
            "Authentication",
        ],
    ),
    (
        "Full Stack Developer",
        &[
            "JavaScript",
            "TypeScript",
            "React",
            "Node.js",
            "SQL",
            "REST APIs",
            "Git",
            "HTML",
            "CSS",
        ],
    ),
    (
        "Data Scientist",
        &[
            "Python",
            "Statistics",
            "Machine Learning",
            "SQL",
            "Data Visualization",
            "Pandas",
            "NumPy",
            "Jupyter",
        ],
    ),
    (
        "DevOps Engineer",
        &[
            "Linux",
            "Docker",
            "Kubernetes",
            "CI/CD",
            "AWS",
            "Scripting",
            "Git",
            "Monitoring",
        ],
    ),
    (
        "Mobile Developer",
        &["React Native", "Swift", "Kotlin", "REST APIs", "Git", "UI/UX"],
    ),
    (
        "Software Engineer",
        &[
            "Data Structures",
            "Algorithms",
            "OOP",
            "Git",
            "SQL",
            "REST APIs",
            "Testing",
        ],
    ),
    (
        "ML Engineer",
        &[
            "Python",
            "Machine Learning",
            "Deep Learning",
            "TensorFlow",
            "PyTorch",
            "SQL",
            "MLOps",
        ],
    ),
];

pub fn job_role_options() -> Vec<&'static str> {
    JOB_SKILL_REQUIREMENTS.iter().map(|(role, _)| *role).collect()
}

/// Resolves a job role to its skills.
///
/// Exact (trimmed) match first, then the first role whose name contains the query
/// case-insensitively ("frontend" -> Frontend Developer). Unknown roles yield an empty list.
pub fn required_skills_for(role: &str) -> Vec<String> {
    let query = role.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let exact = JOB_SKILL_REQUIREMENTS.iter().find(|(name, _)| *name == query);
    let query_lower = query.to_lowercase();
    let found = exact.or_else(|| {
        JOB_SKILL_REQUIREMENTS
            .iter()
            .find(|(name, _)| name.to_lowercase().contains(&query_lower))
    });

    found
        .map(|(_, skills)| skills.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let skills = required_skills_for("DevOps Engineer");
        assert!(skills.contains(&"Kubernetes".to_string()));
        assert_eq!(skills.len(), 8);
    }

    #[test]
    fn test_partial_match_case_insensitive() {
        let skills = required_skills_for("  frontend ");
        assert_eq!(skills, required_skills_for("Frontend Developer"));
    }

    #[test]
    fn test_unknown_role_is_empty() {
        assert!(required_skills_for("Astronaut").is_empty());
        assert!(required_skills_for("   ").is_empty());
    }

    #[test]
    fn test_options_listed_in_table_order() {
        let options = job_role_options();
        assert_eq!(options.first(), Some(&"Frontend Developer"));
        assert_eq!(options.len(), 8);
    }
}
