// Resume file export: plain text, HTML, DOCX and PDF.
// All formats render the same block sequence from document.rs.

pub mod document;
pub mod docx;
pub mod html;
pub mod metrics;
pub mod pdf;
pub mod text;

use std::str::FromStr;

use bytes::Bytes;
use thiserror::Error;

use crate::builder::models::Resume;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("DOCX packaging error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
    Html,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Html => "html",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Txt => "text/plain; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            "html" => Ok(ExportFormat::Html),
            "txt" => Ok(ExportFormat::Txt),
            other => Err(format!(
                "Unsupported export format '{other}'. Use pdf, docx, html or txt."
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

pub fn export_resume(resume: &Resume, format: ExportFormat) -> Result<ExportedFile, ExportError> {
    let bytes: Vec<u8> = match format {
        ExportFormat::Pdf => pdf::render_pdf(resume)?,
        ExportFormat::Docx => docx::render_docx(resume)?,
        ExportFormat::Html => html::render_html(resume).into_bytes(),
        ExportFormat::Txt => text::render_text(resume).into_bytes(),
    };
    Ok(ExportedFile {
        file_name: file_name(resume, format),
        content_type: format.content_type(),
        bytes: Bytes::from(bytes),
    })
}

/// `{name}-resume.{ext}` with whitespace runs in the name replaced by `-`.
pub fn file_name(resume: &Resume, format: ExportFormat) -> String {
    let name = resume.personal.name.split_whitespace().collect::<Vec<_>>().join("-");
    let stem = if name.is_empty() { "resume" } else { name.as_str() };
    format!("{stem}-resume.{}", format.extension())
}
