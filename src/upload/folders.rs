//! Folder listing — lets the settings UI offer a folder picker.
//!
//! Not part of the capture pipeline; it lives here because it shares the
//! uploader's endpoint, auth header, and blocking client.

use crate::settings::Settings;

/// Derive the folder-listing endpoint from the configured upload URL.
///
/// Zipline's upload URL ends in `/upload`; everything from that segment on
/// is replaced with the folders API path.
pub fn folders_endpoint(upload_url: &str) -> String {
    let base = upload_url.split("/upload").next().unwrap_or(upload_url);
    format!("{}/user/folders?noincl=true", base)
}

/// Fetch the user's folders from the server.
///
/// Any failure — missing configuration, network error, non-success status,
/// non-JSON body — collapses to an empty array so the settings UI always has
/// something to render.
pub fn fetch_folders(settings: &Settings) -> serde_json::Value {
    let url = settings.upload_url.trim();
    let token = settings.token.trim();
    if url.is_empty() || token.is_empty() {
        return serde_json::Value::Array(Vec::new());
    }

    match request_folders(url, token) {
        Ok(folders) => folders,
        Err(e) => {
            log::error!("[UPLOAD] Folder fetch failed: {}", e);
            serde_json::Value::Array(Vec::new())
        }
    }
}

fn request_folders(upload_url: &str, token: &str) -> Result<serde_json::Value, super::UploadError> {
    let response = super::http_client()?
        .get(folders_endpoint(upload_url))
        .header("Authorization", token)
        .send()?;

    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(super::UploadError::Status { status, body });
    }

    match serde_json::from_str(&body) {
        Ok(value @ serde_json::Value::Array(_)) => Ok(value),
        Ok(other) => Err(super::UploadError::Decode(format!(
            "expected a JSON array, got {}",
            other
        ))),
        Err(e) => Err(super::UploadError::Decode(e.to_string())),
    }
}
