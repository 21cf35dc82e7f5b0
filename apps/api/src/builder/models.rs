use serde::{Deserialize, Deserializer, Serialize};

/// Resume assembled by the builder form. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub personal: Personal,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(deserialize_with = "one_or_many")]
    pub skills: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Personal {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub target_role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub start: String,
    pub end: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub field: String,
    pub school: String,
    pub start: String,
    pub end: String,
}

impl Resume {
    /// Non-blank skills, trimmed.
    pub fn skill_list(&self) -> Vec<&str> {
        self.skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// The builder form sends `skills` either as a list or as a single string.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) if s.trim().is_empty() => vec![],
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => vec![],
    })
}
