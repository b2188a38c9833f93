use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use tracing::info;

use crate::error::ChatError;
use crate::session::PendingImage;

/// Files above this are rejected before reading.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

pub fn detect_mime_type(data: &[u8]) -> Option<String> {
    if data.len() > 12 {
        let ftyp = &data[4..12];
        if ftyp.starts_with(b"ftyp") {
            let brand = &ftyp[4..8];
            if brand == b"heic" || brand == b"heif" || brand == b"hevc" {
                return Some("image/heic".to_string());
            }
        }
    }

    infer::get(data).map(|kind| kind.mime_type().to_string())
}

/// Validates and reads a user-chosen file into a [`PendingImage`]. On any
/// failure the caller's existing pending image stays untouched.
pub async fn select_image(path: &Path) -> Result<PendingImage, ChatError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|err| ChatError::Validation(format!("Cannot open {}: {err}", path.display())))?;

    if !metadata.is_file() {
        return Err(ChatError::Validation(format!(
            "{} is not a file.",
            path.display()
        )));
    }

    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(ChatError::Validation(
            "The image is too large. Please select an image smaller than 5 MiB.".to_string(),
        ));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| ChatError::Validation(format!("Cannot read {}: {err}", path.display())))?;

    let mime_type = detect_mime_type(&bytes)
        .filter(|mime| mime.starts_with("image/"))
        .ok_or_else(|| {
            ChatError::Validation("Please select a valid image file.".to_string())
        })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let encoded = general_purpose::STANDARD.encode(&bytes);
    let data_url = format!("data:{mime_type};base64,{encoded}");

    info!(
        "Selected image {} ({}, {} bytes)",
        file_name,
        mime_type,
        bytes.len()
    );

    Ok(PendingImage {
        data_url,
        mime_type,
        file_name,
    })
}
