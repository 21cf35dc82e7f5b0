use crate::builder::export::document::{blocks, Block};
use crate::builder::models::Resume;

const STYLE: &str = "body{font-family:Georgia,serif;max-width:700px;margin:2rem auto;padding:0 1rem;color:#222;line-height:1.5;}\n\
h1{font-size:1.75rem;margin-bottom:0.25rem;}\n\
.contact{color:#555;font-size:0.9rem;margin-bottom:1.5rem;}\n\
h2{font-size:0.75rem;text-transform:uppercase;letter-spacing:0.05em;color:#666;margin-top:1.5rem;margin-bottom:0.5rem;border-bottom:1px solid #ddd;}\n\
p{margin:0.25rem 0;}\n\
.entry-title{font-weight:600;}\n\
.entry-meta{color:#555;font-size:0.9rem;}\n";

pub fn render_html(resume: &Resume) -> String {
    let blocks = blocks(resume);
    let title = blocks
        .iter()
        .find_map(|b| match b {
            Block::Name(name) => Some(name.as_str()),
            _ => None,
        })
        .unwrap_or("Resume");

    let mut html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"UTF-8\"><title>{}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n",
        escape(title)
    );

    for block in &blocks {
        match block {
            Block::Name(name) => html.push_str(&format!("<h1>{}</h1>\n", escape(name))),
            Block::Contact(parts) => {
                let joined = parts.iter().map(|p| escape(p)).collect::<Vec<_>>().join(" &bull; ");
                html.push_str(&format!("<div class=\"contact\">{joined}</div>\n"));
            }
            Block::Heading(title) => html.push_str(&format!("<h2>{title}</h2>\n")),
            Block::EntryTitle(text) => {
                html.push_str(&format!("<div class=\"entry-title\">{}</div>\n", escape(text)))
            }
            Block::Meta(text) => {
                html.push_str(&format!("<div class=\"entry-meta\">{}</div>\n", escape(text)))
            }
            Block::Body(text) => html.push_str(&format!("<p>{}</p>\n", multiline(text))),
            Block::Break => {}
        }
    }

    html.push_str("</body>\n</html>");
    html
}

/// HTML-escapes text for element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn multiline(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}
