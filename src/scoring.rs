//! Two-level scoring: analyzer sub-scores roll up into five weighted
//! categories, and the categories into one overall score.

use serde::Serialize;

use crate::analysis::{clamp_score, mean, weighted, AnalyzerResults};

/// One top-level scoring category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedCategory {
    pub label: &'static str,
    pub score: u8,
    /// Share of the overall score, in percent
    pub weight: u8,
    pub description: &'static str,
}

pub const CONTENT_QUALITY: &str = "Content Quality";
pub const TECHNICAL_SEO: &str = "Technical SEO";
pub const USER_EXPERIENCE: &str = "User Experience";
pub const METADATA_AND_STRUCTURE: &str = "Metadata & Structure";
pub const SOCIAL_AND_OTHER: &str = "Social & Other";

/// Category weights. They sum to 100.
pub const CATEGORY_WEIGHTS: [(&str, u8); 5] = [
    (CONTENT_QUALITY, 30),
    (TECHNICAL_SEO, 25),
    (USER_EXPERIENCE, 20),
    (METADATA_AND_STRUCTURE, 15),
    (SOCIAL_AND_OTHER, 10),
];

/// Computes the five categories, in fixed order.
///
/// # Arguments
///
/// * `results` - The joined output of all thirteen analyzers
///
/// # Returns
///
/// Content Quality, Technical SEO, User Experience, Metadata & Structure and
/// Social & Other, each with its label, weight and 0-100 score.
pub fn score_categories(results: &AnalyzerResults) -> Vec<WeightedCategory> {
    let technical = &results.technical;
    let metadata = &results.metadata;
    let social = &results.social;

    let scores = [
        mean(&results.content_quality.sub_scores()),
        weighted(&[
            (technical.ssl.score, 0.4),
            (technical.robots_txt.score, 0.25),
            (technical.sitemap.score, 0.25),
            (technical.canonical.result.score, 0.1),
        ]),
        weighted(&[(results.performance.score, 0.6), (results.mobile.score, 0.4)]),
        weighted(&[
            (metadata.title.result.score, 0.4),
            (metadata.description.result.score, 0.3),
            (results.headings.h1.result.score, 0.2),
            (results.images.score, 0.1),
        ]),
        weighted(&[
            (social.open_graph.result.score, 0.3),
            (social.twitter.result.score, 0.2),
            (results.structured_data.score, 0.3),
            (results.security.score, 0.1),
            (results.accessibility.score, 0.1),
        ]),
    ];
    let descriptions = [
        "Readability, keyword density, structure, multimedia and freshness",
        "HTTPS, robots.txt, sitemap.xml and canonical URL",
        "Estimated performance and mobile friendliness",
        "Title, meta description, h1 and image alt text",
        "Open Graph, Twitter Cards, structured data, security and accessibility",
    ];

    CATEGORY_WEIGHTS
        .iter()
        .zip(scores)
        .zip(descriptions)
        .map(|((&(label, weight), score), description)| WeightedCategory {
            label,
            score,
            weight,
            description,
        })
        .collect()
}

/// Σ(score × weight / 100), rounded and clamped.
///
/// # Arguments
///
/// * `categories` - Output of [`score_categories`]
///
/// # Returns
///
/// The overall score in `0..=100`. An empty slice scores 0.
pub fn overall_score(categories: &[WeightedCategory]) -> u8 {
    clamp_score(
        categories
            .iter()
            .map(|c| f64::from(c.score) * f64::from(c.weight) / 100.0)
            .sum(),
    )
}
