//! Role templates used by the main analysis flow.

use serde::Serialize;

/// A target role and the skills a candidate is expected to show for it.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub required_skills: &'static [&'static str],
}

static ROLE_DEFINITIONS: &[RoleDefinition] = &[
    RoleDefinition {
        name: "Full Stack Developer",
        description: "End-to-end web development",
        required_skills: &[
            "HTML",
            "CSS",
            "JavaScript",
            "TypeScript",
            "React",
            "Node.js",
            "REST APIs",
            "SQL",
            "Git",
            "Testing",
            "Responsive Design",
            "Databases",
        ],
    },
    RoleDefinition {
        name: "Frontend Developer",
        description: "UI/UX and client-side development",
        required_skills: &[
            "HTML",
            "CSS",
            "JavaScript",
            "TypeScript",
            "React",
            "Next.js",
            "Tailwind CSS",
            "Responsive Design",
            "Git",
            "REST APIs",
            "Testing",
            "Accessibility",
        ],
    },
    RoleDefinition {
        name: "Backend Developer",
        description: "Server-side and API development",
        required_skills: &[
            "Node.js",
            "Express",
            "REST APIs",
            "Authentication",
            "Databases",
            "SQL",
            "NoSQL",
            "MongoDB",
            "TypeScript",
            "Testing",
            "Docker",
            "Git",
        ],
    },
    RoleDefinition {
        name: "Data Scientist",
        description: "Statistical modelling and machine learning on real data",
        required_skills: &[
            "Python",
            "SQL",
            "Pandas",
            "NumPy",
            "Scikit-learn",
            "Data Visualization",
            "Statistics",
            "Machine Learning",
            "Jupyter",
            "TensorFlow",
            "ETL",
        ],
    },
    RoleDefinition {
        name: "Data Analyst",
        description: "Reporting, dashboards and business insight",
        required_skills: &[
            "SQL",
            "Python",
            "Pandas",
            "NumPy",
            "Data Visualization",
            "Excel",
            "Statistics",
            "Power BI",
            "Tableau",
            "ETL",
        ],
    },
    RoleDefinition {
        name: "AI Engineer",
        description: "Building and shipping ML and LLM-powered products",
        required_skills: &[
            "Python",
            "Machine Learning",
            "Deep Learning",
            "PyTorch",
            "TensorFlow",
            "Data Preprocessing",
            "Model Deployment",
            "MLOps",
            "Cloud Platforms",
            "Vector Databases",
        ],
    },
    RoleDefinition {
        name: "Cyber Security",
        description: "Defending systems, networks and data",
        required_skills: &[
            "Networking",
            "Linux",
            "Security Fundamentals",
            "Threat Modeling",
            "Vulnerability Assessment",
            "Penetration Testing",
            "SIEM",
            "Incident Response",
            "Cloud Security",
            "Scripting",
        ],
    },
];

pub fn role_definitions() -> &'static [RoleDefinition] {
    ROLE_DEFINITIONS
}

/// Exact-name lookup; role names come from the list served to the client.
pub fn find_role(name: &str) -> Option<&'static RoleDefinition> {
    ROLE_DEFINITIONS.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seven_roles_defined() {
        assert_eq!(role_definitions().len(), 7);
    }

    #[test]
    fn test_find_role_is_exact() {
        assert!(find_role("Backend Developer").is_some());
        assert!(find_role("backend developer").is_none());
        assert!(find_role("Backend").is_none());
    }

    #[test]
    fn test_required_skills_have_no_case_insensitive_duplicates() {
        for role in role_definitions() {
            let unique: HashSet<String> = role
                .required_skills
                .iter()
                .map(|s| s.to_lowercase())
                .collect();
            assert_eq!(unique.len(), role.required_skills.len(), "{}", role.name);
        }
    }
}
