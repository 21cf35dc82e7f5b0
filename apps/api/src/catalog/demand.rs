use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DemandLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

/// Hiring-demand indicator shown next to the ATS score.
#[derive(Debug, Clone, Serialize)]
pub struct IndustryDemand {
    pub level: DemandLevel,
    /// 0 – 100
    pub index: u8,
    pub summary: &'static str,
}

static INDUSTRY_DEMAND_BY_ROLE: &[(&str, IndustryDemand)] = &[
    (
        "Full Stack Developer",
        IndustryDemand {
            level: DemandLevel::VeryHigh,
            index: 88,
            summary: "High demand for developers who can build end-to-end web applications.",
        },
    ),
    (
        "Frontend Developer",
        IndustryDemand {
            level: DemandLevel::High,
            index: 82,
            summary: "Strong demand for modern frontend engineers with React/Next.js and design-system skills.",
        },
    ),
    (
        "Backend Developer",
        IndustryDemand {
            level: DemandLevel::High,
            index: 79,
            summary: "Consistent hiring for backend engineers who can design APIs, work with databases, and deploy services.",
        },
    ),
    (
        "Data Scientist",
        IndustryDemand {
            level: DemandLevel::VeryHigh,
            index: 85,
            summary: "Strong demand for data scientists in analytics, ML, and AI roles.",
        },
    ),
    (
        "Data Analyst",
        IndustryDemand {
            level: DemandLevel::Medium,
            index: 68,
            summary: "Healthy demand, especially in product & growth teams; strong SQL and storytelling skills stand out.",
        },
    ),
    (
        "AI Engineer",
        IndustryDemand {
            level: DemandLevel::VeryHigh,
            index: 90,
            summary: "Explosive demand for applied AI engineers who can build and ship LLM-powered products.",
        },
    ),
    (
        "Cyber Security",
        IndustryDemand {
            level: DemandLevel::High,
            index: 85,
            summary: "Security roles remain critical as more systems move online and compliance requirements grow.",
        },
    ),
];

pub fn industry_demand(role: &str) -> Option<&'static IndustryDemand> {
    INDUSTRY_DEMAND_BY_ROLE
        .iter()
        .find(|(name, _)| *name == role)
        .map(|(_, demand)| demand)
}
