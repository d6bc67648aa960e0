//! Accessibility basics.

use serde::Serialize;

use super::{check, mean, SubScore};
use crate::parse::ExtractedFacts;

/// A ratio check. Zero eligible elements count as fully compliant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub passing: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    pub score: u8,
    pub image_alt: RatioReport,
    pub language: SubScore,
    pub form_labels: RatioReport,
    pub link_text: RatioReport,
    pub landmarks: SubScore,
    pub landmark_elements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts) -> AccessibilityReport {
    let a11y = &facts.accessibility;

    let image_alt = ratio(
        facts.images.with_alt,
        facts.images.total,
        "images lack alt text",
    );

    let language = check(
        facts.html_lang.is_some(),
        "Declare the page language with <html lang>",
    );
    let form_labels = ratio(
        a11y.labelled_controls,
        a11y.form_controls,
        "form controls have no label",
    );
    let link_text = ratio(
        a11y.links_with_text,
        a11y.links,
        "links have no discernible text",
    );

    let has_main = a11y.has_landmark("main");
    let has_nav = a11y.has_landmark("nav");
    let landmarks = match (has_main, has_nav) {
        (true, true) => SubScore::new(true, 100.0),
        (true, false) => SubScore::new(true, 50.0).with_issue("No <nav> landmark"),
        (false, true) => SubScore::new(true, 50.0).with_issue("No <main> landmark"),
        (false, false) => SubScore::absent().with_issue("No <main> or <nav> landmarks"),
    };

    AccessibilityReport {
        score: mean(&[
            image_alt.result.score,
            language.score,
            form_labels.result.score,
            link_text.result.score,
            landmarks.score,
        ]),
        image_alt,
        language,
        form_labels,
        link_text,
        landmarks,
        landmark_elements: a11y.landmarks.clone(),
        error: None,
    }
}

fn ratio(passing: usize, total: usize, issue: &str) -> RatioReport {
    let mut result = if total == 0 {
        SubScore::new(false, 100.0)
    } else {
        SubScore::new(true, passing as f64 * 100.0 / total as f64)
    };
    if passing < total {
        result
            .issues
            .push(format!("{} of {} {}", total - passing, total, issue));
    }
    RatioReport {
        result,
        passing,
        total,
    }
}
