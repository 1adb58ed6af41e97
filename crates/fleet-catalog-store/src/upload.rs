// SPDX-License-Identifier: Apache-2.0

use crate::error::{StoreError, StoreErrorCode};
use base64::Engine as _;
use std::path::Path;

/// Best-effort media type from the file extension.
#[must_use]
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[must_use]
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// Reads a local file into a self-contained `data:` URI.
pub async fn read_data_uri(path: &Path) -> Result<String, StoreError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| StoreError::io(&format!("read {}", path.display()), &e))?;
    let mime = mime_from_path(path);
    tracing::debug!(path = %path.display(), mime, bytes = bytes.len(), "upload encoded");
    Ok(encode_data_uri(mime, &bytes))
}

pub async fn read_image_upload(path: &Path) -> Result<String, StoreError> {
    if !mime_from_path(path).starts_with("image/") {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            format!("{} is not an image", path.display()),
        ));
    }
    read_data_uri(path).await
}

/// Technical sheets are PDFs or images.
pub async fn read_technical_sheet_upload(path: &Path) -> Result<String, StoreError> {
    let mime = mime_from_path(path);
    if mime != "application/pdf" && !mime.starts_with("image/") {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            format!("{} is neither a PDF nor an image", path.display()),
        ));
    }
    read_data_uri(path).await
}

pub async fn read_backup_file(path: &Path) -> Result<String, StoreError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::io(&format!("read backup {}", path.display()), &e))
}
