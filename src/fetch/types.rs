//! Fetched document types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Results of the best-effort origin probes. `false` means absent or unreachable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeResults {
    pub robots_txt: bool,
    pub sitemap_xml: bool,
}

/// A fetched page, owned by one pipeline invocation and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// Final URL after redirects
    pub url: String,
    /// URL as requested, after normalization
    pub requested_url: String,
    pub html: String,
    /// Response headers keyed by lowercase name
    pub headers: BTreeMap<String, String>,
    /// Wall-clock time around the GET, in milliseconds
    pub fetch_latency_ms: u64,
    pub fetched_at: DateTime<Utc>,
    pub probes: ProbeResults,
}

impl RawDocument {
    /// Creates a document with no headers, zero latency and absent probes.
    ///
    /// Mostly useful for analyzing markup that was not fetched by the engine.
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        let url = url.into();
        RawDocument {
            requested_url: url.clone(),
            url,
            html: html.into(),
            headers: BTreeMap::new(),
            fetch_latency_ms: 0,
            fetched_at: Utc::now(),
            probes: ProbeResults::default(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_latency_ms(mut self, latency: u64) -> Self {
        self.fetch_latency_ms = latency;
        self
    }

    pub fn with_probes(mut self, probes: ProbeResults) -> Self {
        self.probes = probes;
        self
    }

    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    /// Looks up a response header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
