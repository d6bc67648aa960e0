//! Configuration constants.
//!
//! This module defines the constants used throughout the engine, including
//! timeouts, size limits and the estimator parameters.

use std::time::Duration;

/// Hard timeout for the primary GET of the analyzed page.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
/// Timeout for each best-effort HEAD probe (`/robots.txt`, `/sitemap.xml`).
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);
/// Upper bound accepted for either configurable timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for HTTP requests.
///
/// Identifies the analyzer honestly instead of impersonating a browser, so
/// site operators can recognise (and allow-list) audit traffic.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; seo_analyzer/",
    env!("CARGO_PKG_VERSION"),
    "; site audit)"
);

/// Maximum URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum response body size in bytes (2MB).
/// The body is streamed and reading stops at this limit, so it bounds both
/// memory and analysis input.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Default bind address for the HTTP server.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: u16 = 3000;

/// Number of independent analyzers run per request.
pub const ANALYZER_COUNT: usize = 13;

// Core Web Vitals estimation
/// LCP is estimated as this fraction of the measured fetch latency.
pub const LCP_FETCH_FACTOR: f64 = 0.8;
/// Upper bound applied to the LCP estimate, in milliseconds.
pub const LCP_ESTIMATE_CAP_MS: f64 = 2500.0;
/// Range of the simulated First Input Delay, in milliseconds.
pub const FID_ESTIMATE_RANGE_MS: std::ops::Range<f64> = 10.0..150.0;
/// Range of the simulated Cumulative Layout Shift.
pub const CLS_ESTIMATE_RANGE: std::ops::Range<f64> = 0.0..0.25;

// Core Web Vitals thresholds (good / needs improvement boundaries)
pub const LCP_GOOD_MS: f64 = 2500.0;
pub const LCP_POOR_MS: f64 = 4000.0;
pub const FID_GOOD_MS: f64 = 100.0;
pub const FID_POOR_MS: f64 = 300.0;
pub const CLS_GOOD: f64 = 0.1;
pub const CLS_POOR: f64 = 0.25;

// Length bands for metadata
pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MIN_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// Minimum number of words before a page stops counting as thin content.
pub const MIN_CONTENT_WORDS: usize = 300;
