use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use log::debug;
use tokio::io::AsyncWriteExt;
use xvm_sdk::{HttpContext, XvmError};

use crate::progress::{InstallProgress, InstallReporter};

/// Check that `url` exists before committing to a download. Only a 404 is
/// treated as missing; other statuses are left for the download to judge.
///
/// # Errors
/// Returns [`XvmError::Network`] if the request fails or the server answers
/// 404.
pub async fn probe(http: &HttpContext, url: &str) -> Result<(), XvmError> {
    let response = http
        .client
        .head(url)
        .timeout(http.request_timeout)
        .send()
        .await
        .map_err(|e| XvmError::network_request("probe artifact", url, e))?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(XvmError::network_status(
            "probe artifact",
            url,
            response.status(),
        ));
    }
    Ok(())
}

/// Stream `url` into `dest_dir` and return the written file.
///
/// The file is named after the server's `Content-Disposition` filename, else
/// the last path segment of the URL, else a random name.
///
/// # Errors
/// Returns an error on transport failure, a non-success status, or if the
/// file cannot be written.
pub async fn download(
    http: &HttpContext,
    url: &str,
    dest_dir: &Path,
    reporter: &dyn InstallReporter,
) -> Result<PathBuf, XvmError> {
    let response = http
        .client
        .get(url)
        .timeout(http.download_timeout)
        .send()
        .await
        .map_err(|e| XvmError::network_request("download artifact", url, e))?;

    if !response.status().is_success() {
        return Err(XvmError::network_status(
            "download artifact",
            url,
            response.status(),
        ));
    }

    let file_name = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(content_disposition_filename)
        .or_else(|| url_filename(url))
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let dest = dest_dir.join(&file_name);
    debug!("Saving {url} as {}", dest.display());

    let total = response.content_length();
    let mut downloaded: u64 = 0;
    let mut file = tokio::fs::File::create(&dest)
        .await
        .map_err(|e| XvmError::io("failed to create download file", &dest, &e))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| XvmError::network_request("download artifact", url, e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| XvmError::io("failed to write download data", &dest, &e))?;
        downloaded += chunk.len() as u64;
        reporter.report(InstallProgress::Downloading { downloaded, total });
    }

    file.flush()
        .await
        .map_err(|e| XvmError::io("failed to flush download file", &dest, &e))?;

    debug!("Downloaded {file_name} ({downloaded} bytes)");
    Ok(dest)
}

/// The `filename=` parameter of a `Content-Disposition` header value.
fn content_disposition_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|field| field.strip_prefix("filename="))
        .map(|name| name.trim_matches('"'))
        .and_then(safe_file_name)
}

/// The last path segment of `url` with any query string removed.
fn url_filename(url: &str) -> Option<String> {
    let (_, last) = url.rsplit_once('/')?;
    let name = last.split(['?', '#']).next().unwrap_or_default();
    safe_file_name(name)
}

fn safe_file_name(name: &str) -> Option<String> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty() && *n != "..")
        .map(ToString::to_string)
}
