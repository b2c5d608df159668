//! Default repository key download

use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{self, Result};

/// Download the key at `url`
///
/// The body is streamed to a temporary file and read back from there. An
/// empty key is an error; anything else is handed to APT unverified.
pub fn fetch_key(url: &str) -> Result<String> {
    info!("Fetching repository key from {}", url);
    let fail = |reason: String| error::packages::key_fetch_failed(url, reason);

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| fail(format!("failed to build HTTP client: {e}")))?;

    let mut response = client
        .get(url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|e| fail(e.to_string()))?;

    let mut file = NamedTempFile::new().map_err(|e| fail(e.to_string()))?;
    response
        .copy_to(file.as_file_mut())
        .map_err(|e| fail(e.to_string()))?;

    let mut key = String::new();
    let handle = file.as_file_mut();
    handle
        .seek(SeekFrom::Start(0))
        .and_then(|_| handle.read_to_string(&mut key))
        .map_err(|e| fail(e.to_string()))?;

    if key.trim().is_empty() {
        return Err(fail("empty key".to_string()));
    }
    Ok(key)
}
