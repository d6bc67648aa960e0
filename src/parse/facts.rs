//! The extracted-facts record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use scraper::Html;

use super::accessibility::{extract_accessibility, AccessibilityFacts};
use super::analytics::{detect_analytics, AnalyticsTool};
use super::content::{extract_content, ContentFacts};
use super::html::{
    extract_canonical, extract_deprecated_tags, extract_headings, extract_html_lang,
    extract_images, extract_meta_description, extract_meta_facts, extract_meta_keywords,
    extract_title, has_html_doctype, HeadingFacts, ImageFacts, MetaFacts,
};
use super::resources::{extract_resources, ResourceFacts};
use super::social::{extract_social_media_links, SocialMediaLink};
use super::structured::{extract_structured_data, StructuredData};
use crate::fetch::RawDocument;

/// Every structural signal pulled from one fetched document.
///
/// Each field is derived from the `RawDocument` alone; nothing here depends on
/// analyzer output, so analyzers can run in any order or in parallel.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFacts {
    /// Final URL after redirects
    pub url: String,
    pub is_https: bool,
    pub fetch_latency_ms: u64,
    pub fetched_at: DateTime<Utc>,
    /// Response headers keyed by lowercase name
    pub headers: BTreeMap<String, String>,
    pub robots_txt: bool,
    pub sitemap_xml: bool,

    pub has_doctype: bool,
    pub html_lang: Option<String>,
    /// Trimmed text of the first `<title>`; `None` when absent or empty
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Vec<String>,
    pub meta: MetaFacts,
    pub canonical: Option<String>,
    pub headings: HeadingFacts,
    pub images: ImageFacts,
    /// Distinct deprecated element names, sorted
    pub deprecated_tags: Vec<String>,

    pub structured: StructuredData,
    pub social_links: Vec<SocialMediaLink>,
    pub analytics: Vec<AnalyticsTool>,
    pub resources: ResourceFacts,
    pub content: ContentFacts,
    pub accessibility: AccessibilityFacts,
}

impl ExtractedFacts {
    /// Looks up a response header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Parses the document once and extracts every fact from the resulting tree.
///
/// # Arguments
///
/// * `raw` - The fetched document: final URL, body, headers and probe results
///
/// # Returns
///
/// The facts snapshot shared read-only by every analyzer. Extraction never
/// fails; malformed JSON-LD is recorded in `structured.json_ld_errors`.
pub fn extract_facts(raw: &RawDocument) -> ExtractedFacts {
    let document = Html::parse_document(&raw.html);
    let is_https = url::Url::parse(&raw.url)
        .map(|u| u.scheme() == "https")
        .unwrap_or(false);

    let structured = extract_structured_data(&document);
    let resources = extract_resources(&document, is_https);
    let analytics = detect_analytics(&raw.html, &resources.script_sources);
    let content = extract_content(&document, &structured, raw);

    log::debug!(
        "Extracted facts for {}: {} words, {} JSON-LD items, {} scripts",
        raw.url,
        content.word_count,
        structured.json_ld.len(),
        resources.scripts
    );

    ExtractedFacts {
        url: raw.url.clone(),
        is_https,
        fetch_latency_ms: raw.fetch_latency_ms,
        fetched_at: raw.fetched_at,
        headers: raw.headers.clone(),
        robots_txt: raw.probes.robots_txt,
        sitemap_xml: raw.probes.sitemap_xml,
        has_doctype: has_html_doctype(&document),
        html_lang: extract_html_lang(&document),
        title: extract_title(&document),
        meta_description: extract_meta_description(&document),
        meta_keywords: extract_meta_keywords(&document),
        meta: extract_meta_facts(&document),
        canonical: extract_canonical(&document),
        headings: extract_headings(&document),
        images: extract_images(&document),
        deprecated_tags: extract_deprecated_tags(&document),
        social_links: extract_social_media_links(&document),
        accessibility: extract_accessibility(&document),
        structured,
        analytics,
        resources,
        content,
    }
}
