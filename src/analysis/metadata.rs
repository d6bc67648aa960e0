//! Title, meta description and meta keywords.

use serde::Serialize;

use super::{weighted, SubScore};
use crate::config::{DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS};
use crate::parse::ExtractedFacts;

const EXISTENCE_POINTS: f64 = 40.0;
const OPTIMAL_LENGTH_POINTS: f64 = 50.0;
const SHORT_LENGTH_POINTS: f64 = 25.0;
const LONG_LENGTH_POINTS: f64 = 10.0;
const KEYWORD_BONUS_POINTS: f64 = 10.0;

/// Body keywords consulted when the page declares no meta keywords.
const BODY_KEYWORD_FALLBACK: usize = 3;

/// A scored text tag (title or description).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTagReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub content: Option<String>,
    /// Length in characters
    pub length: usize,
    pub has_keyword: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataReport {
    pub score: u8,
    pub title: TextTagReport,
    pub description: TextTagReport,
    pub keywords: KeywordsReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts) -> MetadataReport {
    let keywords = target_keywords(facts);

    let title = score_text_tag(
        "Title",
        facts.title.as_deref(),
        TITLE_MIN_CHARS,
        TITLE_MAX_CHARS,
        &keywords,
    );
    let description = score_text_tag(
        "Meta description",
        facts.meta_description.as_deref(),
        DESCRIPTION_MIN_CHARS,
        DESCRIPTION_MAX_CHARS,
        &keywords,
    );
    let keywords = score_keywords(&facts.meta_keywords);

    MetadataReport {
        score: weighted(&[
            (title.result.score, 0.5),
            (description.result.score, 0.4),
            (keywords.result.score, 0.1),
        ]),
        title,
        description,
        keywords,
        error: None,
    }
}

/// Keywords a title or description should mention: the declared meta
/// keywords, or the most frequent body words when none are declared.
fn target_keywords(facts: &ExtractedFacts) -> Vec<String> {
    if !facts.meta_keywords.is_empty() {
        return facts.meta_keywords.clone();
    }
    facts
        .content
        .top_keywords
        .iter()
        .take(BODY_KEYWORD_FALLBACK)
        .map(|k| k.word.clone())
        .collect()
}

/// Scores a text tag: existence, length band, keyword bonus; capped at 100.
///
/// Both band ends are inclusive.
pub(crate) fn score_text_tag(
    label: &str,
    text: Option<&str>,
    min_chars: usize,
    max_chars: usize,
    keywords: &[String],
) -> TextTagReport {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return TextTagReport {
            result: SubScore::absent().with_issue(format!("{} is missing", label)),
            ..Default::default()
        };
    };

    let length = text.chars().count();
    let mut issues = Vec::new();
    let length_points = if length < min_chars {
        issues.push(format!(
            "{} is {} characters; aim for {}-{}",
            label, length, min_chars, max_chars
        ));
        SHORT_LENGTH_POINTS
    } else if length > max_chars {
        issues.push(format!(
            "{} is {} characters; keep it under {}",
            label, length, max_chars
        ));
        LONG_LENGTH_POINTS
    } else {
        OPTIMAL_LENGTH_POINTS
    };

    let lowered = text.to_lowercase();
    let has_keyword = keywords
        .iter()
        .any(|k| !k.is_empty() && lowered.contains(k.as_str()));
    let bonus = if has_keyword { KEYWORD_BONUS_POINTS } else { 0.0 };

    let mut result = SubScore::new(true, EXISTENCE_POINTS + length_points + bonus);
    result.issues = issues;
    TextTagReport {
        result,
        content: Some(text.to_string()),
        length,
        has_keyword,
    }
}

fn score_keywords(keywords: &[String]) -> KeywordsReport {
    let result = match keywords.len() {
        0 => SubScore::absent().with_issue("No meta keywords declared"),
        3..=10 => SubScore::new(true, 100.0),
        n => SubScore::new(true, 50.0)
            .with_issue(format!("{} meta keywords declared; 3-10 is typical", n)),
    };
    KeywordsReport {
        result,
        keywords: keywords.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RawDocument;
    use crate::parse::extract_facts;

    fn title_of_len(n: usize) -> String {
        "a".repeat(n)
    }

    #[test]
    fn test_title_band_boundaries_inclusive() {
        let none: Vec<String> = Vec::new();
        for (len, expected) in [(29, 65), (30, 90), (45, 90), (60, 90), (61, 50)] {
            let report = score_text_tag("Title", Some(&title_of_len(len)), 30, 60, &none);
            assert_eq!(report.result.score, expected, "length {}", len);
            assert_eq!(report.length, len);
        }
    }

    #[test]
    fn test_missing_or_blank_title_scores_zero() {
        let none: Vec<String> = Vec::new();
        let missing = score_text_tag("Title", None, 30, 60, &none);
        assert_eq!(missing.result.score, 0);
        assert!(!missing.result.exists);
        assert_eq!(missing.result.issues, vec!["Title is missing"]);

        let blank = score_text_tag("Title", Some("   "), 30, 60, &none);
        assert_eq!(blank.result.score, 0);
    }

    #[test]
    fn test_keyword_bonus_caps_at_100() {
        let keywords = vec!["rust".to_string()];
        let report = score_text_tag(
            "Title",
            Some("Rust tooling for auditing search optimization"),
            30,
            60,
            &keywords,
        );
        assert!(report.has_keyword);
        assert_eq!(report.result.score, 100);
    }

    #[test]
    fn test_keywords_sub_score() {
        let kw = |n: usize| (0..n).map(|i| format!("k{}", i)).collect::<Vec<_>>();
        assert_eq!(score_keywords(&kw(0)).result.score, 0);
        assert_eq!(score_keywords(&kw(2)).result.score, 50);
        assert_eq!(score_keywords(&kw(3)).result.score, 100);
        assert_eq!(score_keywords(&kw(10)).result.score, 100);
        assert_eq!(score_keywords(&kw(11)).result.score, 50);
    }

    #[test]
    fn test_analyze_uses_body_keywords_when_none_declared() {
        let html = r#"<html><head>
            <title>Espresso brewing guide for beginners at home</title>
            <meta name="description" content="Short description.">
        </head><body><p>Espresso espresso espresso needs fine grounds.</p></body></html>"#;
        let facts = extract_facts(&RawDocument::from_html("https://example.com/", html));
        let report = analyze(&facts);
        assert!(report.title.has_keyword);
        assert_eq!(report.title.result.score, 100);
        assert_eq!(report.description.result.score, 65);
        assert_eq!(report.keywords.result.score, 0);
        // 100*0.5 + 65*0.4 + 0*0.1
        assert_eq!(report.score, 76);
    }
}
