//! Multipart body builder.
//!
//! Turns resolved multipart fields into a reqwest [`Form`], reading file
//! parts from disk.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use workbench_application::ports::{HttpClientError, MultipartField, MultipartValue};

/// Builds a multipart form from resolved fields.
///
/// File parts are read in full and tagged with their file name and a MIME
/// type guessed from the extension.
///
/// # Errors
///
/// Returns `HttpClientError::File` if a file part cannot be read.
pub async fn build_multipart_form(fields: &[MultipartField]) -> Result<Form, HttpClientError> {
    let mut form = Form::new();

    for field in fields {
        match &field.value {
            MultipartValue::Text(value) => {
                form = form.text(field.name.clone(), value.clone());
            }
            MultipartValue::File(path) => {
                form = form.part(field.name.clone(), file_part(path).await?);
            }
        }
    }

    Ok(form)
}

async fn file_part(path: &Path) -> Result<Part, HttpClientError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| HttpClientError::File {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string();

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Part::bytes(content)
        .file_name(filename)
        .mime_str(&mime_type)
        .map_err(|e| HttpClientError::InvalidBody(format!("Invalid MIME type: {e}")))
}
