//! Best-effort existence probes for origin-level files.

use std::time::Duration;

use log::debug;
use reqwest::StatusCode;

use crate::error_handling::{ErrorType, ProcessingStats};

/// Returns `true` when `url` answers a HEAD request with a 2xx status.
///
/// Servers that reject HEAD with 405 get one GET retry. Any timeout, network
/// error or non-success status degrades to `false` and is counted as a probe
/// failure; it never fails the analysis.
pub async fn probe_exists(
    client: &reqwest::Client,
    url: &url::Url,
    timeout: Duration,
    stats: &ProcessingStats,
) -> bool {
    let outcome = match client.head(url.as_str()).timeout(timeout).send().await {
        Ok(response) if response.status() == StatusCode::METHOD_NOT_ALLOWED => {
            debug!("HEAD not allowed for {url}, retrying with GET");
            client.get(url.as_str()).timeout(timeout).send().await
        }
        other => other,
    };

    match outcome {
        Ok(response) if response.status().is_success() => {
            debug!("Probe {} -> {} (present)", url, response.status());
            true
        }
        Ok(response) => {
            debug!("Probe {} -> {} (absent)", url, response.status());
            false
        }
        Err(e) => {
            debug!("Probe {} failed, treating as absent: {}", url, e);
            stats.increment_error(ErrorType::ProbeFailure);
            false
        }
    }
}
