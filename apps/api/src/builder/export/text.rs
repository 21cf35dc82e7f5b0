use crate::builder::export::document::{blocks, Block};
use crate::builder::models::Resume;

const CONTACT_SEPARATOR: &str = "  |  ";

pub fn render_text(resume: &Resume) -> String {
    let mut lines: Vec<String> = Vec::new();
    for block in blocks(resume) {
        match block {
            Block::Name(name) => lines.push(name),
            Block::Contact(parts) => lines.push(parts.join(CONTACT_SEPARATOR)),
            Block::Heading(title) => lines.push(title.to_uppercase()),
            Block::EntryTitle(text) | Block::Meta(text) | Block::Body(text) => lines.push(text),
            Block::Break => lines.push(String::new()),
        }
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::export::document::tests::sample_resume;

    #[test]
    fn test_text_layout() {
        let text = render_text(&sample_resume());
        let expected_start = "Asha Rao\nasha@example.com  |  Pune\n\nSUMMARY\nBackend-focused engineer.\n\nEXPERIENCE\nIntern | Acme & Co\n";
        assert!(text.starts_with(expected_start), "got:\n{text}");
        assert!(text.ends_with("SKILLS\nRust, PostgreSQL"));
    }

    #[test]
    fn test_empty_resume_text() {
        assert_eq!(render_text(&Resume::default()), "Your Name");
    }
}
