//! Image alt-text coverage.

use serde::Serialize;

use super::clamp_score;
use crate::parse::ExtractedFacts;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesReport {
    pub score: u8,
    pub total: usize,
    pub with_alt: usize,
    pub missing_alt: usize,
    /// Percent of images carrying `alt`; absent when there are no images
    pub alt_coverage: Option<f64>,
    pub responsive: usize,
    pub without_dimensions: usize,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts) -> ImagesReport {
    let images = facts.images;
    let coverage = images.alt_coverage();
    let missing_alt = images.total - images.with_alt;

    let mut issues = Vec::new();
    if missing_alt > 0 {
        issues.push(format!("{} of {} images lack alt text", missing_alt, images.total));
    }
    if images.without_dimensions > 0 {
        issues.push(format!(
            "{} images have no explicit width and height",
            images.without_dimensions
        ));
    }

    ImagesReport {
        score: coverage.map_or(100, alt_coverage_score),
        total: images.total,
        with_alt: images.with_alt,
        missing_alt,
        alt_coverage: coverage.map(|c| (c * 10.0).round() / 10.0),
        responsive: images.with_srcset,
        without_dimensions: images.without_dimensions,
        issues,
        error: None,
    }
}

/// Step function over alt coverage percent. A page without images is vacuously compliant.
pub(crate) fn alt_coverage_score(coverage: f64) -> u8 {
    let score = if coverage >= 90.0 {
        100.0
    } else if coverage >= 70.0 {
        70.0
    } else if coverage >= 50.0 {
        50.0
    } else {
        20.0
    };
    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RawDocument;
    use crate::parse::extract_facts;

    fn images_html(with_alt: usize, without_alt: usize) -> String {
        let mut body = String::new();
        for i in 0..with_alt {
            body.push_str(&format!(r#"<img src="{}.png" alt="image {}">"#, i, i));
        }
        for i in 0..without_alt {
            body.push_str(&format!(r#"<img src="x{}.png">"#, i));
        }
        format!("<html><body>{}</body></html>", body)
    }

    fn score(with_alt: usize, without_alt: usize) -> u8 {
        let raw = RawDocument::from_html("https://example.com/", images_html(with_alt, without_alt));
        analyze(&extract_facts(&raw)).score
    }

    #[test]
    fn test_no_images_is_compliant() {
        assert_eq!(score(0, 0), 100);
    }

    #[test]
    fn test_coverage_steps() {
        assert_eq!(score(9, 1), 100);
        assert_eq!(score(7, 3), 70);
        assert_eq!(score(5, 5), 50);
        assert_eq!(score(4, 6), 20);
        assert_eq!(score(0, 3), 20);
    }

    #[test]
    fn test_alt_coverage_score_thresholds() {
        assert_eq!(alt_coverage_score(100.0), 100);
        assert_eq!(alt_coverage_score(89.9), 70);
        assert_eq!(alt_coverage_score(69.9), 50);
        assert_eq!(alt_coverage_score(49.9), 20);
    }

    #[test]
    fn test_missing_alt_issue() {
        let raw = RawDocument::from_html("https://example.com/", images_html(1, 2));
        let report = analyze(&extract_facts(&raw));
        assert_eq!(report.missing_alt, 2);
        assert!(report.issues[0].contains("2 of 3 images lack alt text"));
    }
}
