//! Resume text extraction from uploaded files.
//!
//! PDF parsing is CPU-bound and `pdf-extract` can panic on malformed input, so it
//! runs on the blocking pool where a panic surfaces as a `JoinError`.

use thiserror::Error;
use tracing::{debug, warn};

const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("File is empty.")]
    Empty,

    #[error("Could not extract text from PDF. The file may be scanned (image-only) or corrupted.")]
    NoText,

    #[error("Could not read file: {0}")]
    Unreadable(String),

    #[error("PDF extraction worker failed: {0}")]
    Worker(String),
}

/// Extracts text from PDF bytes. Whitespace-only output is reported as `NoText`.
pub async fn extract_text_from_pdf(bytes: Vec<u8>) -> Result<String, IngestError> {
    if bytes.is_empty() {
        return Err(IngestError::Empty);
    }

    let size = bytes.len();
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            if e.is_panic() {
                IngestError::Unreadable("PDF parser crashed on this file".to_string())
            } else {
                IngestError::Worker(e.to_string())
            }
        })?
        .map_err(|e| IngestError::Unreadable(e.to_string()))?;

    let text = extracted.trim();
    if text.is_empty() {
        return Err(IngestError::NoText);
    }

    debug!("Extracted {} chars from {size}-byte PDF", text.len());
    Ok(text.to_string())
}

/// Reads a resume upload of unknown kind.
///
/// PDF by content type or `.pdf` extension, plain text by content type or `.txt`.
/// Anything else is tried as PDF first and falls back to lossy UTF-8.
pub async fn extract_text_from_upload(
    file_name: &str,
    content_type: Option<&str>,
    bytes: Vec<u8>,
) -> Result<String, IngestError> {
    if bytes.is_empty() {
        return Err(IngestError::Empty);
    }

    let lower_name = file_name.to_lowercase();
    if content_type == Some(PDF_CONTENT_TYPE) || lower_name.ends_with(".pdf") {
        return extract_text_from_pdf(bytes).await;
    }
    if content_type == Some("text/plain") || lower_name.ends_with(".txt") {
        return non_blank(decode_lossy(&bytes));
    }

    match extract_text_from_pdf(bytes.clone()).await {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!("'{file_name}' is not a readable PDF ({e}), decoding as text");
            non_blank(decode_lossy(&bytes))
        }
    }
}

pub fn is_pdf_content_type(content_type: Option<&str>) -> bool {
    content_type == Some(PDF_CONTENT_TYPE)
}

fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

fn non_blank(text: String) -> Result<String, IngestError> {
    if text.is_empty() {
        Err(IngestError::NoText)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_pdf_rejected() {
        assert!(matches!(
            extract_text_from_pdf(vec![]).await,
            Err(IngestError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_an_error() {
        assert!(extract_text_from_pdf(b"not a pdf at all".to_vec()).await.is_err());
    }

    #[tokio::test]
    async fn test_text_upload_by_extension() {
        let text = extract_text_from_upload("resume.TXT", None, b"  Jane Doe\nRust  ".to_vec())
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nRust");
    }

    #[tokio::test]
    async fn test_text_upload_invalid_utf8_is_lossy() {
        let text = extract_text_from_upload("cv", Some("text/plain"), vec![b'o', b'k', 0xff])
            .await
            .unwrap();
        assert!(text.starts_with("ok"));
    }

    #[tokio::test]
    async fn test_unknown_type_falls_back_to_text() {
        let text = extract_text_from_upload("cv.doc", Some("application/octet-stream"), b"Go developer".to_vec())
            .await
            .unwrap();
        assert_eq!(text, "Go developer");
    }

    #[tokio::test]
    async fn test_blank_text_upload_has_no_text() {
        assert!(matches!(
            extract_text_from_upload("cv.txt", None, b"   \n ".to_vec()).await,
            Err(IngestError::NoText)
        ));
    }

    #[test]
    fn test_pdf_content_type() {
        assert!(is_pdf_content_type(Some("application/pdf")));
        assert!(!is_pdf_content_type(Some("text/plain")));
        assert!(!is_pdf_content_type(None));
    }
}
