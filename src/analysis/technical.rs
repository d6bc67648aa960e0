//! Crawlability and transport: SSL, robots.txt, sitemap.xml, canonical URL,
//! doctype and deprecated markup.

use serde::Serialize;

use super::{check, weighted, SubScore};
use crate::parse::ExtractedFacts;

const DEPRECATED_TAG_PENALTY: f64 = 20.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeprecatedTagsReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalReport {
    pub score: u8,
    pub ssl: SubScore,
    pub robots_txt: SubScore,
    pub sitemap: SubScore,
    pub canonical: CanonicalReport,
    /// Informational; not part of the score
    pub doctype: SubScore,
    /// Informational; not part of the score
    pub deprecated_tags: DeprecatedTagsReport,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts) -> TechnicalReport {
    let ssl = check(facts.is_https, "Page is not served over HTTPS");
    let robots_txt = check(facts.robots_txt, "robots.txt not found");
    let sitemap = check(facts.sitemap_xml, "sitemap.xml not found");
    let canonical = CanonicalReport {
        result: check(facts.canonical.is_some(), "No canonical URL declared"),
        url: facts.canonical.clone(),
    };
    let doctype = check(facts.has_doctype, "Missing <!DOCTYPE html> declaration");

    let deprecated_tags = if facts.deprecated_tags.is_empty() {
        DeprecatedTagsReport {
            result: SubScore::new(false, 100.0),
            tags: Vec::new(),
        }
    } else {
        let count = facts.deprecated_tags.len() as f64;
        DeprecatedTagsReport {
            result: SubScore::new(true, 100.0 - DEPRECATED_TAG_PENALTY * count).with_issue(
                format!(
                    "Deprecated HTML elements in use: {}",
                    facts.deprecated_tags.join(", ")
                ),
            ),
            tags: facts.deprecated_tags.clone(),
        }
    };

    let mut issues = Vec::new();
    if facts
        .meta
        .robots
        .as_deref()
        .is_some_and(|r| r.to_ascii_lowercase().contains("noindex"))
    {
        issues.push("Robots meta tag blocks indexing (noindex)".to_string());
    }
    if !facts.meta.has_charset {
        issues.push("No character encoding declared".to_string());
    }

    TechnicalReport {
        score: weighted(&[
            (ssl.score, 0.4),
            (robots_txt.score, 0.25),
            (sitemap.score, 0.25),
            (canonical.result.score, 0.1),
        ]),
        ssl,
        robots_txt,
        sitemap,
        canonical,
        doctype,
        deprecated_tags,
        issues,
        error: None,
    }
}
