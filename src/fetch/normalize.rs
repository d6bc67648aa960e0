//! URL validation and normalization utilities.

use log::warn;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::AnalysisError;

/// Validates and normalizes a URL submitted for analysis.
///
/// Adds an `https://` prefix when no scheme is present, then requires a
/// syntactically valid absolute `http`/`https` URL with a host. URLs longer
/// than `MAX_URL_LENGTH` are rejected.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidUrl` describing why the input was rejected.
pub fn validate_and_normalize_url(input: &str) -> Result<url::Url, AnalysisError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidUrl("URL is empty".to_string()));
    }

    let normalized = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return Err(AnalysisError::InvalidUrl(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    let parsed = url::Url::parse(&normalized)
        .map_err(|e| AnalysisError::InvalidUrl(format!("{trimmed}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AnalysisError::InvalidUrl(format!(
                "unsupported scheme '{other}'"
            )))
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(AnalysisError::InvalidUrl(format!("{trimmed}: missing host")));
    }

    Ok(parsed)
}
