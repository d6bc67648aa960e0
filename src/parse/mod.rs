//! HTML parsing and fact extraction.
//!
//! Turns a `RawDocument` into `ExtractedFacts`, the flat read-only record every
//! analyzer consumes. The document is parsed once into a DOM with `scraper` and
//! queried with CSS selectors:
//! - Title, meta tags, canonical link, doctype, headings, images
//! - Structured data (JSON-LD, microdata, RDFa) and Open Graph / Twitter tags
//! - Analytics tooling signatures
//! - Social media links
//! - Body text statistics, resources and accessibility signals
//!
//! Extraction never fails: a missing element yields an empty field, and a
//! malformed JSON-LD block is recorded as an error string.

mod accessibility;
mod analytics;
mod content;
mod facts;
mod html;
mod resources;
mod social;
mod structured;

use scraper::Selector;

// Re-export public API
pub use accessibility::AccessibilityFacts;
pub use analytics::{
    detect_analytics, AnalyticsTool, FACEBOOK_PIXEL, GOOGLE_ANALYTICS, GOOGLE_ANALYTICS_4,
    GOOGLE_TAG_MANAGER, KAKAO_PIXEL, NAVER_ANALYTICS,
};
pub use content::{ContentFacts, KeywordCount};
pub use facts::{extract_facts, ExtractedFacts};
pub use html::{HeadingFacts, ImageFacts, MetaFacts};
pub use resources::ResourceFacts;
pub use social::{extract_social_media_links, SocialMediaLink};
pub use structured::{extract_structured_data, StructuredData};
pub(crate) use structured::declared_types;

/// Compiles a static CSS selector. A failure here is a programming error.
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}': {}. This is a programming error.",
            css, e
        )
    })
}

/// Collapses runs of whitespace into single spaces and trims the ends.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive check for a token in a space-separated attribute (`rel`, `role`).
fn has_token(value: &str, token: &str) -> bool {
    value
        .split_ascii_whitespace()
        .any(|t| t.eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
