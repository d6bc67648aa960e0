//! Primary page fetch.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use log::{debug, warn};

use super::probe::probe_exists;
use super::types::{ProbeResults, RawDocument};
use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::{fetch_failure, AnalysisError, ErrorType, InfoType, ProcessingStats};

/// Fetches the page at `url` and probes the served origin for robots.txt and
/// sitemap.xml.
///
/// The probes start as soon as the GET's headers arrive, so they target the
/// origin after redirects and overlap with reading the body. Latency is the
/// wall-clock time around the GET (headers and body).
///
/// # Arguments
///
/// * `client` - Shared HTTP client; its timeout bounds the GET
/// * `url` - Validated, normalized page URL
/// * `probe_timeout` - Per-probe timeout for the HEAD requests
/// * `stats` - Counters for fetch failures, probe failures and truncation
///
/// # Returns
///
/// The `RawDocument` with its final URL, headers, body (at most
/// `MAX_RESPONSE_BODY_SIZE` bytes) and probe results.
///
/// # Errors
///
/// Returns `AnalysisError::Fetch` on network failure, timeout or a non-2xx
/// status. Probe failures never produce an error.
pub async fn fetch_document(
    client: &reqwest::Client,
    url: &url::Url,
    probe_timeout: Duration,
    stats: &ProcessingStats,
) -> Result<RawDocument, AnalysisError> {
    let start = Instant::now();
    let response = send_page_request(client, url, stats).await?;

    let served = response.url().clone();
    if url.scheme() == "http" && served.scheme() == "https" {
        stats.increment_info(InfoType::HttpsRedirect);
    }
    let robots_url = origin_file(&served, "/robots.txt")?;
    let sitemap_url = origin_file(&served, "/sitemap.xml")?;

    let (page, robots_txt, sitemap_xml) = tokio::join!(
        read_page(response, url, start, stats),
        probe_exists(client, &robots_url, probe_timeout, stats),
        probe_exists(client, &sitemap_url, probe_timeout, stats),
    );

    let mut document = page?;
    document.probes = ProbeResults {
        robots_txt,
        sitemap_xml,
    };
    debug!(
        "Fetched {} in {}ms (robots.txt: {}, sitemap.xml: {})",
        document.url, document.fetch_latency_ms, robots_txt, sitemap_xml
    );
    Ok(document)
}

fn origin_file(url: &url::Url, path: &str) -> Result<url::Url, AnalysisError> {
    url.join(path)
        .map_err(|e| AnalysisError::InvalidUrl(format!("cannot derive {path} for {url}: {e}")))
}

async fn send_page_request(
    client: &reqwest::Client,
    url: &url::Url,
    stats: &ProcessingStats,
) -> Result<reqwest::Response, AnalysisError> {
    let response = client
        .get(url.as_str())
        .header(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await
        .map_err(|e| fetch_failure(stats, url.as_str(), &e))?;

    let status = response.status();
    if !status.is_success() {
        stats.increment_error(ErrorType::FetchStatus);
        return Err(AnalysisError::from_status(url.as_str(), status.as_u16()));
    }
    Ok(response)
}

async fn read_page(
    response: reqwest::Response,
    url: &url::Url,
    start: Instant,
    stats: &ProcessingStats,
) -> Result<RawDocument, AnalysisError> {
    let final_url = response.url().to_string();
    let headers: BTreeMap<String, String> = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
        })
        .collect();

    let (body, truncated) = read_capped(response, MAX_RESPONSE_BODY_SIZE)
        .await
        .map_err(|e| fetch_failure(stats, url.as_str(), &e))?;
    let fetch_latency_ms = start.elapsed().as_millis() as u64;
    if truncated {
        warn!(
            "Response body for {} exceeds {} bytes, truncated",
            final_url, MAX_RESPONSE_BODY_SIZE
        );
        stats.increment_info(InfoType::BodyTruncated);
    }

    Ok(RawDocument {
        url: final_url,
        requested_url: url.to_string(),
        html: String::from_utf8_lossy(&body).into_owned(),
        headers,
        fetch_latency_ms,
        fetched_at: Utc::now(),
        probes: ProbeResults::default(),
    })
}

/// Streams the body, keeping at most `limit` bytes. The rest is never read.
async fn read_capped(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<(Vec<u8>, bool), reqwest::Error> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - body.len();
        if chunk.len() > room {
            body.extend_from_slice(&chunk[..room]);
            return Ok((body, true));
        }
        body.extend_from_slice(&chunk);
    }
    Ok((body, false))
}
