//! A4 PDF rendering with the base-14 Helvetica faces.
//!
//! Lines are wrapped with the static width tables in `metrics` and flow onto a
//! new page when the bottom margin is reached.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::builder::export::document::{blocks, Block};
use crate::builder::export::metrics::{wrap, Face};
use crate::builder::export::ExportError;
use crate::builder::models::Resume;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 57.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const LINE_SPACING: f32 = 1.4;

const NAME_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;

const CONTACT_SEPARATOR: &str = "  |  ";

pub fn render_pdf(resume: &Resume) -> Result<Vec<u8>, ExportError> {
    let mut layout = PageLayout::new();
    for block in blocks(resume) {
        match block {
            Block::Name(name) => layout.write(Face::Bold, NAME_SIZE, &name),
            Block::Contact(parts) => layout.write(Face::Regular, BODY_SIZE, &parts.join(CONTACT_SEPARATOR)),
            Block::Heading(title) => {
                layout.gap(6.0);
                layout.write(Face::Bold, HEADING_SIZE, title);
                layout.gap(2.0);
            }
            Block::EntryTitle(text) => layout.write(Face::Bold, BODY_SIZE, &text),
            Block::Meta(text) | Block::Body(text) => layout.write(Face::Regular, BODY_SIZE, &text),
            Block::Break => layout.gap(8.0),
        }
    }
    build_document(layout.finish())
}

/// Maps text onto what a standard Type1 font can show without an embedded encoding.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2022}' | '\u{00b7}' => out.push('*'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201c}' | '\u{201d}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            '\t' => out.push(' '),
            '\n' => out.push('\n'),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

struct PageLayout {
    finished: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: f32,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            finished: vec![],
            current: vec![],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn gap(&mut self, points: f32) {
        self.y -= points;
    }

    fn write(&mut self, face: Face, size: f32, text: &str) {
        let line_height = size * LINE_SPACING;
        for line in wrap(face, &sanitize(text), size, CONTENT_WIDTH) {
            if self.y - line_height < MARGIN {
                self.finished.push(std::mem::take(&mut self.current));
                self.y = PAGE_HEIGHT - MARGIN;
            }
            self.y -= line_height;
            if line.is_empty() {
                continue;
            }
            let ops = &mut self.current;
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![face.resource_name().into(), (size.round() as i64).into()],
            ));
            ops.push(Operation::new(
                "Td",
                vec![(MARGIN as i64).into(), (self.y.round() as i64).into()],
            ));
            ops.push(Operation::new("Tj", vec![Object::string_literal(line)]));
            ops.push(Operation::new("ET", vec![]));
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.finished.push(self.current);
        self.finished
    }
}

fn font_object(doc: &mut Document, face: Face) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

fn build_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = font_object(&mut doc, Face::Regular);
    let bold_id = font_object(&mut doc, Face::Bold);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Face::Regular.resource_name() => regular_id,
            Face::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH as i64),
                Object::Integer(PAGE_HEIGHT as i64),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::export::document::tests::sample_resume;
    use crate::builder::models::Experience;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Jan \u{2013} Jun \u{2022} caf\u{e9}\u{2026}"), "Jan - Jun * caf?...");
        assert_eq!(sanitize("a\tb\nc"), "a b\nc");
    }

    #[test]
    fn test_pdf_header_and_single_page() {
        let bytes = render_pdf(&sample_resume()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_long_resume_breaks_pages() {
        let mut resume = sample_resume();
        resume.experience = (0..40)
            .map(|i| Experience {
                title: format!("Role {i}"),
                company: "Acme".to_string(),
                start: "2020".to_string(),
                end: "2021".to_string(),
                description: "Shipped features across the stack and mentored interns.".to_string(),
            })
            .collect();
        let bytes = render_pdf(&resume).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn test_layout_wraps_within_margins() {
        let mut layout = PageLayout::new();
        let long = "word ".repeat(200);
        layout.write(Face::Regular, BODY_SIZE, &long);
        assert!(layout.y >= MARGIN);
        let tj_count = layout
            .current
            .iter()
            .filter(|op| op.operator == "Tj")
            .count();
        assert!(tj_count > 1);
    }
}
