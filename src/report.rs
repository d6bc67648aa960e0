//! The analysis report returned to callers.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::analysis::AnalyzerResults;
use crate::improvements::ImprovementTip;
use crate::scoring::WeightedCategory;

/// Coarse band over the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Grade::Excellent,
            60..=79 => Grade::Good,
            40..=59 => Grade::NeedsImprovement,
            _ => Grade::Poor,
        }
    }
}

/// Root aggregate of one analysis. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub url: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub overall_score: u8,
    pub grade: Grade,
    pub categories: Vec<WeightedCategory>,
    #[serde(flatten)]
    pub results: AnalyzerResults,
    pub improvements: Vec<ImprovementTip>,
}

impl AnalysisReport {
    /// Looks up a category by label.
    pub fn category(&self, label: &str) -> Option<&WeightedCategory> {
        self.categories.iter().find(|c| c.label == label)
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn empty_report() -> AnalysisReport {
        AnalysisReport {
            url: "https://example.com/".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            overall_score: 0,
            grade: Grade::Poor,
            categories: Vec::new(),
            results: AnalyzerResults::default(),
            improvements: Vec::new(),
        }
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_score(100), Grade::Excellent);
        assert_eq!(Grade::from_score(80), Grade::Excellent);
        assert_eq!(Grade::from_score(79), Grade::Good);
        assert_eq!(Grade::from_score(60), Grade::Good);
        assert_eq!(Grade::from_score(59), Grade::NeedsImprovement);
        assert_eq!(Grade::from_score(40), Grade::NeedsImprovement);
        assert_eq!(Grade::from_score(39), Grade::Poor);
        assert_eq!(Grade::from_score(0), Grade::Poor);
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(empty_report()).unwrap();
        assert_eq!(value["url"], "https://example.com/");
        assert_eq!(value["timestamp"], "2025-03-01T12:00:00.000Z");
        assert_eq!(value["overallScore"], 0);
        assert_eq!(value["grade"], "poor");
        for key in [
            "metadata",
            "headings",
            "images",
            "technical",
            "social",
            "analytics",
            "performance",
            "mobile",
            "contentQuality",
            "regionalOptimization",
            "structuredData",
            "security",
            "accessibility",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value["improvements"].as_array().unwrap().is_empty());
    }
}
