//! Transport and header security.

use serde::Serialize;

use super::{check, clamp_score, SubScore};
use crate::config::{
    HEADER_CONTENT_SECURITY_POLICY, HEADER_STRICT_TRANSPORT_SECURITY,
    HEADER_X_CONTENT_TYPE_OPTIONS, HEADER_X_FRAME_OPTIONS,
};
use crate::parse::ExtractedFacts;

const HTTPS_POINTS: f64 = 35.0;
const HSTS_POINTS: f64 = 15.0;
const CSP_POINTS: f64 = 15.0;
const NOSNIFF_POINTS: f64 = 10.0;
const FRAME_OPTIONS_POINTS: f64 = 10.0;
const NO_MIXED_CONTENT_POINTS: f64 = 15.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub score: u8,
    pub https: SubScore,
    pub hsts: SubScore,
    pub content_security_policy: SubScore,
    pub content_type_options: SubScore,
    pub frame_options: SubScore,
    pub mixed_content: SubScore,
    pub mixed_content_urls: Vec<String>,
    /// `target="_blank"` links without `rel="noopener"`
    pub unsafe_blank_links: Vec<String>,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts) -> SecurityReport {
    let https = check(facts.is_https, "Serve the page over HTTPS");
    // HSTS is ignored by browsers on plain HTTP responses
    let hsts = check(
        facts.is_https && facts.header(HEADER_STRICT_TRANSPORT_SECURITY).is_some(),
        "No Strict-Transport-Security header",
    );
    let csp_value = facts.header(HEADER_CONTENT_SECURITY_POLICY);
    let content_security_policy = check(csp_value.is_some(), "No Content-Security-Policy header");
    let content_type_options = check(
        facts
            .header(HEADER_X_CONTENT_TYPE_OPTIONS)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("nosniff")),
        "X-Content-Type-Options is not set to nosniff",
    );
    let frame_options = check(
        facts.header(HEADER_X_FRAME_OPTIONS).is_some()
            || csp_value.is_some_and(|csp| csp.to_ascii_lowercase().contains("frame-ancestors")),
        "No X-Frame-Options header or frame-ancestors directive",
    );

    let mixed = &facts.resources.mixed_content;
    let mixed_content = if mixed.is_empty() {
        SubScore::new(false, 100.0)
    } else {
        SubScore::new(true, 0.0).with_issue(format!(
            "{} resources are loaded over plain HTTP",
            mixed.len()
        ))
    };

    let mut issues = Vec::new();
    let unsafe_blank_links = facts.accessibility.unsafe_blank_links.clone();
    if !unsafe_blank_links.is_empty() {
        issues.push(format!(
            "{} links open a new tab without rel=\"noopener\"",
            unsafe_blank_links.len()
        ));
    }

    let earned = [
        (https.exists, HTTPS_POINTS),
        (hsts.exists, HSTS_POINTS),
        (content_security_policy.exists, CSP_POINTS),
        (content_type_options.exists, NOSNIFF_POINTS),
        (frame_options.exists, FRAME_OPTIONS_POINTS),
        (mixed.is_empty(), NO_MIXED_CONTENT_POINTS),
    ]
    .iter()
    .filter(|(ok, _)| *ok)
    .map(|(_, points)| points)
    .sum::<f64>();

    SecurityReport {
        score: clamp_score(earned),
        https,
        hsts,
        content_security_policy,
        content_type_options,
        frame_options,
        mixed_content,
        mixed_content_urls: mixed.clone(),
        unsafe_blank_links,
        issues,
        error: None,
    }
}
