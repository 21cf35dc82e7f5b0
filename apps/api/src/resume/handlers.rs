//! Axum route handlers for resume uploads.

use std::collections::HashMap;

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::ingest::{extract_text_from_pdf, is_pdf_content_type};

// ────────────────────────────────────────────────────────────────────────────
// Multipart form reading
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A multipart form split into its `file` part and the remaining text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?.to_vec();
                form.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            } else {
                form.fields.insert(name, field.text().await?);
            }
        }
        Ok(form)
    }

    pub fn take_file(&mut self) -> Result<UploadedFile, AppError> {
        self.file
            .take()
            .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))
    }

    /// Trimmed text field; blank counts as absent.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub text: String,
    pub file_name: String,
    pub file_size: usize,
}

/// POST /api/resume/upload
///
/// Accepts a multipart `file` field holding a PDF and returns its text.
pub async fn handle_upload(multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    let file = UploadForm::read(multipart).await?.take_file()?;

    if !is_pdf_content_type(file.content_type.as_deref()) {
        return Err(AppError::Validation(
            "Invalid file type. Only PDF is supported.".to_string(),
        ));
    }

    let file_size = file.bytes.len();
    let text = extract_text_from_pdf(file.bytes).await?;
    info!("Parsed upload '{}' ({file_size} bytes)", file.file_name);

    Ok(Json(UploadResponse {
        text,
        file_name: file.file_name,
        file_size,
    }))
}
