//! Format-neutral reading order of a resume.
//!
//! Every exporter walks the same block list, so section order and the
//! empty-section rules live in one place.

use crate::builder::models::Resume;

pub const PLACEHOLDER_NAME: &str = "Your Name";
pub const DATE_SEPARATOR: &str = " \u{2013} ";

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Name(String),
    /// Non-empty contact parts; each format picks its own separator.
    Contact(Vec<String>),
    Heading(&'static str),
    EntryTitle(String),
    Meta(String),
    /// May contain newlines.
    Body(String),
    /// End of an entry or section.
    Break,
}

pub fn blocks(resume: &Resume) -> Vec<Block> {
    let personal = &resume.personal;
    let mut out = Vec::new();

    let name = personal.name.trim();
    out.push(Block::Name(if name.is_empty() { PLACEHOLDER_NAME } else { name }.to_string()));

    let contact = non_blank(&[&personal.email, &personal.phone, &personal.location]);
    if !contact.is_empty() {
        out.push(Block::Contact(contact));
    }
    out.push(Block::Break);

    let summary = resume.summary.trim();
    if !summary.is_empty() {
        out.push(Block::Heading("Summary"));
        out.push(Block::Body(summary.to_string()));
        out.push(Block::Break);
    }

    if !resume.experience.is_empty() {
        out.push(Block::Heading("Experience"));
        for exp in &resume.experience {
            let title = non_blank(&[&exp.title, &exp.company]).join(" | ");
            out.push(Block::EntryTitle(if title.is_empty() {
                "Experience".to_string()
            } else {
                title
            }));
            if let Some(dates) = date_range(&exp.start, &exp.end) {
                out.push(Block::Meta(dates));
            }
            if !exp.description.trim().is_empty() {
                out.push(Block::Body(exp.description.trim().to_string()));
            }
            out.push(Block::Break);
        }
    }

    if !resume.education.is_empty() {
        out.push(Block::Heading("Education"));
        for edu in &resume.education {
            let field = edu.field.trim();
            let title = if field.is_empty() {
                edu.degree.trim().to_string()
            } else {
                format!("{} in {field}", edu.degree.trim())
            };
            out.push(Block::EntryTitle(title));
            if !edu.school.trim().is_empty() {
                out.push(Block::Meta(edu.school.trim().to_string()));
            }
            if let Some(dates) = date_range(&edu.start, &edu.end) {
                out.push(Block::Meta(dates));
            }
            out.push(Block::Break);
        }
    }

    let skills = resume.skill_list();
    if !skills.is_empty() {
        out.push(Block::Heading("Skills"));
        out.push(Block::Body(skills.join(", ")));
    }

    out
}

fn non_blank(parts: &[&String]) -> Vec<String> {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

fn date_range(start: &str, end: &str) -> Option<String> {
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() && end.is_empty() {
        return None;
    }
    Some(format!("{start}{DATE_SEPARATOR}{end}"))
}
