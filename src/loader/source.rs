//! Resolving a source URI to its raw bytes.

use std::fs;
use std::time::Duration;

use reqwest::blocking::Client as HttpClient;

use crate::error::{Result, ThesaurizeError};

/// Timeout applied to remote fetches.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch the content behind `uri`.
///
/// `file://` reads a local path, `http://` and `https://` issue a GET request. A
/// non-success status, an unreadable file, or any other scheme is a fetch error.
pub fn fetch(uri: &str) -> Result<Vec<u8>> {
    let Some((scheme, location)) = uri.split_once("://") else {
        return Err(ThesaurizeError::fetch(format!("no scheme in uri '{uri}'")));
    };

    match scheme.to_ascii_lowercase().as_str() {
        "file" => fetch_file(location),
        "http" | "https" => fetch_http(uri),
        other => Err(ThesaurizeError::fetch(format!("unknown protocol {other}"))),
    }
}

fn fetch_file(path: &str) -> Result<Vec<u8>> {
    log::debug!("Reading {path}");
    fs::read(path).map_err(|e| ThesaurizeError::fetch(format!("cannot read {path}: {e}")))
}

fn fetch_http(url: &str) -> Result<Vec<u8>> {
    log::debug!("Downloading {url}");
    let client = HttpClient::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| ThesaurizeError::fetch(format!("cannot build http client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| ThesaurizeError::fetch(format!("request to {url} failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ThesaurizeError::fetch(format!("{url} answered with {status}")));
    }

    let body = response
        .bytes()
        .map_err(|e| ThesaurizeError::fetch(format!("cannot read body of {url}: {e}")))?;
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_fetch_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"payload").unwrap();

        let uri = format!("file://{}", file.path().display());
        assert_eq!(fetch(&uri).unwrap(), b"payload");
    }

    #[test]
    fn test_missing_file() {
        let result = fetch("file:///nonexistent/th_en_US.zip");
        assert!(matches!(result, Err(ThesaurizeError::Fetch(_))));
    }

    #[test]
    fn test_unknown_scheme() {
        let result = fetch("gopher://example.org/th.zip");
        assert!(matches!(result, Err(ThesaurizeError::Fetch(_))));
    }

    #[test]
    fn test_missing_scheme() {
        let result = fetch("/tmp/th.zip");
        assert!(matches!(result, Err(ThesaurizeError::Fetch(_))));
    }
}
