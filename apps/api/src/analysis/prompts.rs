// All LLM prompt constants for the analysis module.
// Templates use `{placeholder}` markers replaced before sending.

pub const EXTRACT_SKILLS_SYSTEM: &str =
    "You extract structured skill information from resumes. Respond only with valid JSON.";

pub const EXTRACT_SKILLS_PROMPT_TEMPLATE: &str = r#"Extract structured skills from this resume. Return ONLY valid JSON in this exact format:
{
  "technical_skills": ["skill1", "skill2"],
  "soft_skills": ["skill1", "skill2"],
  "tools": ["tool1", "tool2"],
  "experience_level": "Junior" | "Mid" | "Senior" | "Lead" | "Unknown"
}

Resume:
"""
{resume_text}
""""#;

pub const ROADMAP_SYSTEM: &str =
    "You design realistic learning roadmaps. Respond only with valid JSON.";

pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Generate a 6-month learning roadmap in JSON format.
Target role: {target_role}
Missing skills: {missing_skills}
{current_skills_line}

Return ONLY valid JSON:
{
  "months": [
    {
      "month": 1,
      "focusSkills": ["skill1", "skill2"],
      "recommendedProjects": ["project1"],
      "weeklyGoals": "string",
      "estimatedHoursPerWeek": 8
    }
  ]
}

Each month must have: focusSkills, recommendedProjects, weeklyGoals, estimatedHoursPerWeek."#;

pub const JD_ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are a resume analyst. Compare the candidate's resume with the job description and return ONLY valid JSON with no markdown, no explanation, no code block.

RESUME:
"""
{resume_text}
"""

JOB DESCRIPTION:
"""
{job_description}
"""

Return exactly this JSON structure and nothing else:
{
  "matched_skills": ["skill1", "skill2"],
  "missing_skills": ["skill1", "skill2"],
  "skill_gap_percentage": "75",
  "roadmap": [
    {
      "skill": "Skill Name",
      "beginner_steps": ["step1", "step2"],
      "intermediate_steps": ["step1", "step2"],
      "advanced_steps": ["step1", "step2"]
    }
  ]
}

Rules:
- matched_skills: skills from the job that appear in the resume
- missing_skills: skills from the job that are missing in the resume
- skill_gap_percentage: number as string 0-100 (how well resume matches job)
- roadmap: one object per missing_skill with learning steps (beginner, intermediate, advanced)
- Return only the JSON object."#;

pub const ROLE_ANALYSIS_SYSTEM_TEMPLATE: &str = r#"You are a career analyst. You analyze resumes against a target job role and return ONLY valid JSON—no markdown, no code fences, no explanation.

Given resume text and the list of required skills for the job, you must:
1. Identify which required skills the candidate clearly has (matchingSkills).
2. Identify which required skills are missing or weak (missingSkills).
3. Compute skillGapPercentage: round(100 * (missingSkills.length / totalRequiredSkills)).
4. For each skill in missingSkills, generate a roadmap with:
   - stages: array of exactly 3 objects with level "Beginner", "Intermediate", "Advanced". Each has: topics (string[]), projects (string[]), duration (string, e.g. "2-3 weeks").
   - youtubeQueries: 3-5 search query strings to find YouTube tutorials for this skill (e.g. "React hooks tutorial for beginners").

Required skills for the job (use these exact names in matchingSkills/missingSkills):
{required_skills_json}

Respond with a single JSON object in this exact shape:
{
  "matchingSkills": ["Skill1", "Skill2"],
  "missingSkills": ["SkillA", "SkillB"],
  "skillGapPercentage": number,
  "roadmap": {
    "SkillA": {
      "stages": [
        { "level": "Beginner", "topics": [], "projects": [], "duration": "" },
        { "level": "Intermediate", "topics": [], "projects": [], "duration": "" },
        { "level": "Advanced", "topics": [], "projects": [], "duration": "" }
      ],
      "youtubeQueries": []
    }
  }
}"#;

pub const ROLE_ANALYSIS_USER_TEMPLATE: &str = r#"Job role: {job_role}

Resume text:
"""
{resume_text}
"""

Return only the JSON object, no other text."#;

pub const CRITIQUE_SYSTEM: &str =
    "You are an expert resume reviewer with years of experience in HR and recruitment.";

pub const CRITIQUE_PROMPT_TEMPLATE: &str = r#"Please analyze this resume and provide constructive feedback.
Focus on the following aspects:
1. Content clarity and impact
2. Skills presentation
3. Experience description
4. Specific improvements for {target_role}

Resume content:
{resume_text}

Please provide your analysis in a clear, structured format with specific recommendations."#;
