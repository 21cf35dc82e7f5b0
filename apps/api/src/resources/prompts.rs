// LLM prompt constants for learning resource generation.
// Templates use `{placeholder}` markers replaced before sending.

pub const LEARNING_RESOURCES_SYSTEM: &str = "You are an AI career mentor for Indian college students. \
    Always respond with strictly valid JSON that matches the requested schema.";

pub const LEARNING_RESOURCES_PROMPT_TEMPLATE: &str = r#"You are an AI career mentor system.

The user is missing the following technical skills:

{skills_list}

For each missing skill:

1. Recommend 3 high-quality YouTube learning videos.
2. Recommend 2 structured online courses (Coursera, Udemy, freeCodeCamp, etc.)
3. Suggest 1 practical project idea to master the skill.
4. Estimate how many weeks it would take to become internship-ready in that skill (assuming 10-12 hours per week).

IMPORTANT:
- Return only valid JSON.
- Do not add explanations.
- Do not add markdown.
- Do not include commentary.
- URLs should look realistic and valid.
- Keep titles short and professional.
- Focus on beginner to intermediate level resources.
- Optimize recommendations for Indian students.

JSON format:

{
  "resources": [
    {
      "skill": "Skill Name",
      "youtube": [
        {
          "title": "Video Title",
          "url": "https://youtube.com/..."
        }
      ],
      "courses": [
        {
          "title": "Course Title",
          "platform": "Platform Name",
          "url": "https://..."
        }
      ],
      "projectSuggestion": "Project idea description",
      "estimatedLearningTimeWeeks": number
    }
  ]
}"#;
