//! The upload request itself — multipart POST plus response decoding.

use super::UploadError;
use crate::report::UploadOutcome;
use crate::settings::Settings;
use std::path::Path;

/// Upload a stabilized screenshot to the configured Zipline endpoint.
///
/// Returns `Ok(None)` when no endpoint or token is configured — uploading is
/// simply disabled, not an error, and no request is made. On success the
/// outcome carries the shareable link the server minted (an empty string if
/// the response listed no files, which still counts as success).
pub fn upload_screenshot(
    path: &Path,
    settings: &Settings,
) -> Result<Option<UploadOutcome>, UploadError> {
    let url = settings.upload_url.trim();
    let token = settings.token.trim();
    if url.is_empty() || token.is_empty() {
        log::debug!(
            "[UPLOAD] Endpoint or token not configured, skipping {}",
            path.display()
        );
        return Ok(None);
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screenshot".to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    let bytes = std::fs::read(path).map_err(|source| UploadError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let byte_count = bytes.len();

    let part = reqwest::blocking::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.as_ref())?;
    let form = reqwest::blocking::multipart::Form::new().part("file", part);

    let mut request = super::http_client()?
        .post(url)
        .header("Authorization", token)
        .header("Format", settings.selected_format.as_str())
        .multipart(form);
    if settings.use_folder && !settings.zipline_folder.is_empty() {
        request = request.header("x-zipline-folder", settings.zipline_folder.as_str());
    }

    let response = request.send()?;
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(UploadError::Status { status, body });
    }

    let parsed = decode_response_body(&body).ok_or(UploadError::Decode(body))?;
    let link = extract_link(&parsed);

    log::info!(
        "[UPLOAD] Uploaded {} ({} bytes) → {}",
        path.display(),
        byte_count,
        link
    );

    Ok(Some(UploadOutcome {
        source_path: path.to_string_lossy().into_owned(),
        shareable_link: link,
    }))
}

/// Parse the response body as JSON, falling back to percent-decoding first.
///
/// Some Zipline deployments double-encode the body under certain error
/// conditions; the decoded text parses where the raw text does not.
fn decode_response_body(body: &str) -> Option<serde_json::Value> {
    if let Ok(value) = serde_json::from_str(body) {
        return Some(value);
    }
    let decoded = urlencoding::decode(body).ok()?;
    serde_json::from_str(&decoded).ok()
}

/// Pull the shareable link out of `files[0].url`.
///
/// An empty `files` array or a missing `url` field yields an empty string —
/// the upload itself still succeeded.
fn extract_link(response: &serde_json::Value) -> String {
    response["files"][0]["url"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}
