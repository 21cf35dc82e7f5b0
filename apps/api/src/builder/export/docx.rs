//! Minimal WordprocessingML package: content types, package relationships,
//! the main document part and core properties.

use std::io::{Cursor, Write};

use chrono::{SecondsFormat, Utc};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::builder::export::document::{blocks, Block};
use crate::builder::export::ExportError;
use crate::builder::models::Resume;

const CONTACT_SEPARATOR: &str = "  \u{2022}  ";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

pub fn render_docx(resume: &Resume) -> Result<Vec<u8>, ExportError> {
    let title = resume.personal.name.trim();
    let parts: [(&str, String); 4] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", PACKAGE_RELS.to_string()),
        ("word/document.xml", document_xml(resume)),
        ("docProps/core.xml", core_xml(if title.is_empty() { "Resume" } else { title })),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }
    Ok(zip.finish()?.into_inner())
}

fn document_xml(resume: &Resume) -> String {
    let mut body = String::new();
    for block in blocks(resume) {
        match block {
            Block::Name(name) => body.push_str(&paragraph(&name, Some(36), true)),
            Block::Contact(parts) => body.push_str(&paragraph(&parts.join(CONTACT_SEPARATOR), None, false)),
            Block::Heading(title) => body.push_str(&paragraph(title, Some(26), true)),
            Block::EntryTitle(text) => body.push_str(&paragraph(&text, None, true)),
            Block::Meta(text) | Block::Body(text) => {
                for line in text.lines() {
                    body.push_str(&paragraph(line, None, false));
                }
            }
            Block::Break => {}
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1134" w:right="1134" w:bottom="1134" w:left="1134" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

/// One paragraph with a single run. `half_points` sets the font size (w:sz).
fn paragraph(text: &str, half_points: Option<u32>, bold: bool) -> String {
    let mut run_props = String::new();
    if bold {
        run_props.push_str("<w:b/>");
    }
    if let Some(size) = half_points {
        run_props.push_str(&format!("<w:sz w:val=\"{size}\"/>"));
    }
    let run_props = if run_props.is_empty() {
        run_props
    } else {
        format!("<w:rPr>{run_props}</w:rPr>")
    };
    format!(
        "<w:p><w:r>{run_props}<w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        escape_xml(text)
    )
}

fn core_xml(title: &str) -> String {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>SkillSync</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created></cp:coreProperties>"#,
        escape_xml(title)
    )
}

fn escape_xml(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\t')
        .fold(String::with_capacity(text.len()), |mut out, c| {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&apos;"),
                _ => out.push(c),
            }
            out
        })
}
