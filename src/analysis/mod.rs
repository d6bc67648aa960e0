//! Analyzers.
//!
//! Thirteen independent analyzers, each a pure function of `ExtractedFacts`
//! (Performance also reads the Core-Web-Vitals estimate, sampled once per
//! analysis). They are dispatched through `AnalyzerKind`, fanned out onto a
//! bounded blocking pool by `run_analyzers` and joined before scoring.
//!
//! Every score is clamped to `0..=100`. An analyzer that panics yields its
//! empty report with the panic message in `error`.

mod accessibility;
mod analytics;
mod content;
mod headings;
mod images;
mod metadata;
mod mobile;
mod performance;
mod regional;
mod runner;
mod security;
mod social;
mod structured;
mod technical;
mod types;
mod vitals;

pub use accessibility::{AccessibilityReport, RatioReport};
pub use analytics::AnalyticsReport;
pub use content::{
    ContentQualityReport, DensityReport, FreshnessReport, MultimediaReport, ReadabilityReport,
    ReadingLevel, StructureReport,
};
pub use headings::{HeadingLevelReport, HeadingsReport};
pub use images::ImagesReport;
pub use metadata::{KeywordsReport, MetadataReport, TextTagReport};
pub use mobile::{MobileReport, ViewportReport};
pub use performance::{
    CachingReport, CompressionReport, CoreWebVitalsReport, PerformanceReport, ResourceCountReport,
    ServerTimingReport, VitalRating,
};
pub use regional::RegionalReport;
pub use runner::run_analyzers;
pub use security::SecurityReport;
pub use social::{ProfilesReport, SocialReport, TagSetReport};
pub use structured::{SchemaReport, StructuredDataReport};
pub use technical::{CanonicalReport, DeprecatedTagsReport, TechnicalReport};
pub use types::{AnalyzerKind, AnalyzerOutput, AnalyzerResults, SubScore};
pub use vitals::{RandomEstimator, SeededEstimator, VitalsEstimate, VitalsEstimator};

/// Rounds and clamps a raw score into `0..=100`. NaN maps to 0.
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Presence flag: 100 when `present`, otherwise 0 carrying `issue`.
pub(crate) fn check(present: bool, issue: &str) -> SubScore {
    if present {
        SubScore::flag(true)
    } else {
        SubScore::flag(false).with_issue(issue)
    }
}

/// Weighted sum of `(score, weight)` pairs, clamped.
pub(crate) fn weighted(parts: &[(u8, f64)]) -> u8 {
    clamp_score(
        parts
            .iter()
            .map(|(score, weight)| f64::from(*score) * weight)
            .sum(),
    )
}

/// Arithmetic mean of sub-scores, clamped. Empty input scores 0.
pub(crate) fn mean(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let total: u32 = scores.iter().map(|s| u32::from(*s)).sum();
    clamp_score(f64::from(total) / scores.len() as f64)
}
