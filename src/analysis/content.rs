//! Content quality: readability, keyword density, structure, multimedia and
//! freshness.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{mean, SubScore};
use crate::config::MIN_CONTENT_WORDS;
use crate::parse::{ExtractedFacts, KeywordCount};

const EASY_SENTENCE_WORDS: f64 = 15.0;
const HARD_SENTENCE_WORDS: f64 = 25.0;
const FRESH_DAYS: i64 = 180;
const AGING_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadingLevel {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub average_sentence_length: Option<f64>,
    pub level: Option<ReadingLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityReport {
    #[serde(flatten)]
    pub result: SubScore,
    /// Top keyword share of the body, in percent
    pub density_percent: Option<f64>,
    pub top_keywords: Vec<KeywordCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub word_count: usize,
    pub paragraphs: usize,
    pub lists: usize,
    pub has_subheadings: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultimediaReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub images: usize,
    pub videos: usize,
    pub audios: usize,
    pub iframes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub latest_date: Option<DateTime<Utc>>,
    /// Days between the newest content date and the fetch
    pub age_days: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQualityReport {
    pub score: u8,
    pub readability: ReadabilityReport,
    pub keyword_density: DensityReport,
    pub structure: StructureReport,
    pub multimedia: MultimediaReport,
    pub freshness: FreshnessReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContentQualityReport {
    /// The five sub-scores in fixed order.
    pub fn sub_scores(&self) -> [u8; 5] {
        [
            self.readability.result.score,
            self.keyword_density.result.score,
            self.structure.result.score,
            self.multimedia.result.score,
            self.freshness.result.score,
        ]
    }
}

pub fn analyze(facts: &ExtractedFacts) -> ContentQualityReport {
    let mut report = ContentQualityReport {
        readability: score_readability(facts.content.average_sentence_length()),
        keyword_density: score_density(facts),
        structure: score_structure(facts),
        multimedia: score_multimedia(facts),
        freshness: score_freshness(facts.content.latest_date, facts.fetched_at),
        ..Default::default()
    };
    report.score = mean(&report.sub_scores());
    report
}

/// Average sentence length bands: under 15 words easy, over 25 hard.
pub(crate) fn score_readability(average: Option<f64>) -> ReadabilityReport {
    let Some(average) = average else {
        return ReadabilityReport {
            result: SubScore::absent().with_issue("No readable sentences found"),
            ..Default::default()
        };
    };
    let (level, score) = if average < EASY_SENTENCE_WORDS {
        (ReadingLevel::Easy, 90.0)
    } else if average > HARD_SENTENCE_WORDS {
        (ReadingLevel::Hard, 50.0)
    } else {
        (ReadingLevel::Medium, 70.0)
    };
    let mut result = SubScore::new(true, score);
    if level == ReadingLevel::Hard {
        result.issues.push(format!(
            "Sentences average {:.1} words; aim for under {}",
            average, HARD_SENTENCE_WORDS
        ));
    }
    ReadabilityReport {
        result,
        average_sentence_length: Some((average * 10.0).round() / 10.0),
        level: Some(level),
    }
}

fn score_density(facts: &ExtractedFacts) -> DensityReport {
    let top_keywords = facts.content.top_keywords.clone();
    let Some(density) = facts.content.top_keyword_density() else {
        return DensityReport {
            result: SubScore::absent().with_issue("No body text to measure keyword density"),
            density_percent: None,
            top_keywords,
        };
    };
    let score = if (1.0..=3.0).contains(&density) {
        100.0
    } else if (0.5..1.0).contains(&density) || (3.0..=5.0).contains(&density) {
        70.0
    } else {
        40.0
    };
    let mut result = SubScore::new(true, score);
    if density > 5.0 {
        result.issues.push(format!(
            "Top keyword makes up {:.1}% of the text; this reads as keyword stuffing",
            density
        ));
    }
    DensityReport {
        result,
        density_percent: Some((density * 100.0).round() / 100.0),
        top_keywords,
    }
}

fn score_structure(facts: &ExtractedFacts) -> StructureReport {
    let content = &facts.content;
    let has_subheadings = facts.headings.count(2) > 0;
    let checks = [
        (content.paragraph_count >= 3, "Fewer than 3 paragraphs"),
        (has_subheadings, "No h2 subheadings"),
        (content.list_count > 0, "No lists"),
        (content.word_count >= MIN_CONTENT_WORDS, "Thin content (under 300 words)"),
    ];
    let passed = checks.iter().filter(|(ok, _)| *ok).count();
    let mut result = SubScore::new(content.word_count > 0, passed as f64 * 25.0);
    result.issues = checks
        .iter()
        .filter(|(ok, _)| !*ok)
        .map(|(_, issue)| issue.to_string())
        .collect();
    StructureReport {
        result,
        word_count: content.word_count,
        paragraphs: content.paragraph_count,
        lists: content.list_count,
        has_subheadings,
    }
}

fn score_multimedia(facts: &ExtractedFacts) -> MultimediaReport {
    let content = &facts.content;
    let images = facts.images.total;
    let has_media = content.videos + content.audios + content.iframes > 0;
    let mut score = 0.0;
    if images > 0 {
        score += 50.0;
    }
    if has_media {
        score += 50.0;
    }
    let mut result = SubScore::new(images > 0 || has_media, score);
    if images == 0 {
        result.issues.push("No images in the content".to_string());
    }
    MultimediaReport {
        result,
        images,
        videos: content.videos,
        audios: content.audios,
        iframes: content.iframes,
    }
}

/// Age of the newest content date relative to the fetch time.
pub(crate) fn score_freshness(
    latest: Option<DateTime<Utc>>,
    fetched_at: DateTime<Utc>,
) -> FreshnessReport {
    let Some(latest) = latest else {
        return FreshnessReport {
            result: SubScore::absent().with_issue("No publication or modification date found"),
            ..Default::default()
        };
    };
    let age_days = (fetched_at - latest).num_days().max(0);
    let score = if age_days <= FRESH_DAYS {
        100.0
    } else if age_days <= AGING_DAYS {
        70.0
    } else {
        40.0
    };
    let mut result = SubScore::new(true, score);
    if age_days > AGING_DAYS {
        result
            .issues
            .push(format!("Content was last updated {} days ago", age_days));
    }
    FreshnessReport {
        result,
        latest_date: Some(latest),
        age_days: Some(age_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RawDocument;
    use crate::parse::extract_facts;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_readability_bands() {
        assert_eq!(score_readability(None).result.score, 0);
        assert_eq!(score_readability(Some(8.0)).level, Some(ReadingLevel::Easy));
        assert_eq!(score_readability(Some(8.0)).result.score, 90);
        assert_eq!(score_readability(Some(15.0)).result.score, 70);
        assert_eq!(score_readability(Some(25.0)).result.score, 70);
        assert_eq!(score_readability(Some(25.1)).result.score, 50);
    }

    #[test]
    fn test_freshness_relative_to_fetch_time() {
        let fetched = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let days = |n: i64| Some(fetched - Duration::days(n));
        assert_eq!(score_freshness(days(10), fetched).result.score, 100);
        assert_eq!(score_freshness(days(180), fetched).result.score, 100);
        assert_eq!(score_freshness(days(200), fetched).result.score, 70);
        assert_eq!(score_freshness(days(400), fetched).result.score, 40);
        assert_eq!(score_freshness(None, fetched).result.score, 0);
        // future dates count as fresh
        assert_eq!(score_freshness(days(-3), fetched).age_days, Some(0));
    }

    #[test]
    fn test_structure_and_multimedia() {
        let html = r#"<html><body>
            <h1>Title</h1><h2>Part</h2>
            <p>One.</p><p>Two.</p><p>Three.</p>
            <ul><li>item</li></ul>
            <img src="a.png" alt="a"><video src="v.mp4"></video>
        </body></html>"#;
        let facts = extract_facts(&RawDocument::from_html("https://example.com/", html));
        let report = analyze(&facts);
        // all but the word-count check
        assert_eq!(report.structure.result.score, 75);
        assert_eq!(report.structure.result.issues, vec!["Thin content (under 300 words)"]);
        assert_eq!(report.multimedia.result.score, 100);
    }

    #[test]
    fn test_empty_page_scores_zero() {
        let facts = extract_facts(&RawDocument::from_html("https://example.com/", "<html></html>"));
        let report = analyze(&facts);
        assert_eq!(report.sub_scores(), [0, 0, 0, 0, 0]);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn test_keyword_density_bands() {
        // 2 of 100 words: 2%
        let mut words: Vec<String> = (0..98).map(|i| format!("w{}x", i)).collect();
        words.push("rust".into());
        words.push("rust".into());
        let html = format!("<html><body><p>{}</p></body></html>", words.join(" "));
        let facts = extract_facts(&RawDocument::from_html("https://example.com/", html));
        let density = score_density(&facts);
        assert_eq!(density.density_percent, Some(2.0));
        assert_eq!(density.result.score, 100);
    }
}
