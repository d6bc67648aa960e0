//! Error categorization.
//!
//! Maps `reqwest` failures of the primary fetch onto `ErrorType` counters and
//! onto the caller-facing `AnalysisError`.

use super::stats::ProcessingStats;
use super::types::{AnalysisError, ErrorType};

/// Categorizes a `reqwest::Error` into an `ErrorType`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::FetchTimeout
    } else if error.is_connect() {
        ErrorType::FetchConnect
    } else if error.is_status() {
        ErrorType::FetchStatus
    } else if error.is_redirect() {
        ErrorType::FetchRedirect
    } else if error.is_body() || error.is_decode() {
        ErrorType::FetchBody
    } else {
        ErrorType::FetchOther
    }
}

/// Converts a failed primary fetch into the caller-facing error and counts it.
pub fn fetch_failure(stats: &ProcessingStats, url: &str, error: &reqwest::Error) -> AnalysisError {
    let error_type = categorize_reqwest_error(error);
    stats.increment_error(error_type);

    let message = match error_type {
        ErrorType::FetchTimeout => "request timed out".to_string(),
        ErrorType::FetchConnect => format!("could not connect: {}", error),
        _ => error.to_string(),
    };
    AnalysisError::Fetch {
        url: url.to_string(),
        status: error.status().map(|s| s.as_u16()),
        message,
    }
}
