//! Error type definitions.
//!
//! This module defines the errors surfaced to callers and the error, warning
//! and info categories counted while analyzing pages.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Errors that end an analysis request.
///
/// Only these reach the caller. Probe failures, malformed JSON-LD blocks and
/// analyzer panics are recovered inside the pipeline and never appear here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The submitted URL is malformed after normalization.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The target page could not be fetched or answered with a non-2xx status.
    #[error("Failed to fetch {url}: {message}")]
    Fetch {
        url: String,
        /// HTTP status of the target, when one was received
        status: Option<u16>,
        message: String,
    },

    /// Aggregation or engine bug. The only class that maps to a 500.
    #[error("Internal analysis error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Builds a fetch error for a target that answered with a non-success status.
    pub fn from_status(url: &str, status: u16) -> Self {
        AnalysisError::Fetch {
            url: url.to_string(),
            status: Some(status),
            message: format!("target responded with HTTP {}", status),
        }
    }

    /// HTTP status returned to the caller for this error.
    ///
    /// Input problems and target-site unavailability are the caller's concern
    /// (400); engine bugs are ours (500).
    pub fn http_status(&self) -> u16 {
        match self {
            AnalysisError::InvalidUrl(_) | AnalysisError::Fetch { .. } => 400,
            AnalysisError::Internal(_) => 500,
        }
    }
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A configuration value outside its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Types of errors that can occur while analyzing a page.
///
/// Fetch errors fail the request; the remaining categories are recovered
/// locally and only counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Caller input
    InvalidUrl,
    // Primary fetch
    FetchTimeout,
    FetchConnect,
    FetchStatus,
    FetchBody,
    FetchRedirect,
    FetchOther,
    // Recovered locally
    ProbeFailure,
    JsonLdParseError,
    AnalyzerPanic,
    // Fatal engine bug
    InternalError,
}

/// Types of warnings found on analyzed pages.
///
/// Warnings indicate missing optional data that doesn't prevent a report but
/// is worth tracking across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    MissingTitle,
    MissingMetaDescription,
    MissingH1,
    MissingStructuredData,
    MissingViewport,
}

/// Informational events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    AnalysisCompleted,
    HttpsRedirect, // requested over http, landed on https
    BodyTruncated,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidUrl => "Invalid URL",
            ErrorType::FetchTimeout => "Fetch timeout",
            ErrorType::FetchConnect => "Fetch connect error",
            ErrorType::FetchStatus => "Fetch non-success status",
            ErrorType::FetchBody => "Fetch body error",
            ErrorType::FetchRedirect => "Fetch redirect error",
            ErrorType::FetchOther => "Fetch other error",
            ErrorType::ProbeFailure => "Probe failure",
            ErrorType::JsonLdParseError => "JSON-LD parse error",
            ErrorType::AnalyzerPanic => "Analyzer panic",
            ErrorType::InternalError => "Internal error",
        }
    }

    /// Metric-friendly label (`snake_case`).
    pub fn label(&self) -> &'static str {
        match self {
            ErrorType::InvalidUrl => "invalid_url",
            ErrorType::FetchTimeout => "fetch_timeout",
            ErrorType::FetchConnect => "fetch_connect",
            ErrorType::FetchStatus => "fetch_status",
            ErrorType::FetchBody => "fetch_body",
            ErrorType::FetchRedirect => "fetch_redirect",
            ErrorType::FetchOther => "fetch_other",
            ErrorType::ProbeFailure => "probe_failure",
            ErrorType::JsonLdParseError => "json_ld_parse_error",
            ErrorType::AnalyzerPanic => "analyzer_panic",
            ErrorType::InternalError => "internal_error",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingTitle => "Missing title",
            WarningType::MissingMetaDescription => "Missing meta description",
            WarningType::MissingH1 => "Missing h1",
            WarningType::MissingStructuredData => "Missing structured data",
            WarningType::MissingViewport => "Missing viewport",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::AnalysisCompleted => "Analysis completed",
            InfoType::HttpsRedirect => "HTTP to HTTPS redirect",
            InfoType::BodyTruncated => "Response body truncated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_analysis_error_status_mapping() {
        assert_eq!(AnalysisError::InvalidUrl("x".into()).http_status(), 400);
        assert_eq!(
            AnalysisError::from_status("https://example.com", 404).http_status(),
            400
        );
        assert_eq!(AnalysisError::Internal("boom".into()).http_status(), 500);
    }

    #[test]
    fn test_fetch_error_embeds_status() {
        let err = AnalysisError::from_status("https://example.com", 503);
        let msg = err.to_string();
        assert!(msg.contains("503"), "message should embed status: {msg}");
        assert!(msg.contains("https://example.com"));
        match err {
            AnalysisError::Fetch { status, .. } => assert_eq!(status, Some(503)),
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_all_error_types_have_string_representation() {
        for error_type in ErrorType::iter() {
            assert!(
                !error_type.as_str().is_empty(),
                "{:?} should have non-empty string",
                error_type
            );
            assert!(
                error_type
                    .label()
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_'),
                "{:?} label should be snake_case",
                error_type
            );
        }
    }

    #[test]
    fn test_all_warning_types_have_string_representation() {
        for warning_type in WarningType::iter() {
            assert!(!warning_type.as_str().is_empty());
        }
    }

    #[test]
    fn test_all_info_types_have_string_representation() {
        for info_type in InfoType::iter() {
            assert!(!info_type.as_str().is_empty());
        }
    }
}
