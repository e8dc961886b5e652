//! Zipline HTTP client — upload screenshots, list folders.
//!
//! All calls are blocking and run on the watcher's background worker (or
//! inside `spawn_blocking` when invoked from an async command), never on the
//! event loop.

mod folders;
mod zipline;

pub use folders::{fetch_folders, folders_endpoint};
pub use zipline::upload_screenshot;

use std::path::PathBuf;
use std::time::Duration;

/// Bound on every request to the Zipline server. The reference behavior
/// inherited the client default; a slow network now fails the single attempt
/// instead of blocking the worker indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server rejected request: HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Could not decode server response: {0}")]
    Decode(String),

    #[error("Could not read {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Blocking client shared by upload and folder lookup.
fn http_client() -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
}
