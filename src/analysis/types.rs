use serde::Serialize;
use strum_macros::EnumIter;

use super::accessibility::{self, AccessibilityReport};
use super::analytics::{self, AnalyticsReport};
use super::content::{self, ContentQualityReport};
use super::headings::{self, HeadingsReport};
use super::images::{self, ImagesReport};
use super::metadata::{self, MetadataReport};
use super::mobile::{self, MobileReport};
use super::performance::{self, PerformanceReport};
use super::regional::{self, RegionalReport};
use super::security::{self, SecurityReport};
use super::social::{self, SocialReport};
use super::structured::{self, StructuredDataReport};
use super::technical::{self, TechnicalReport};
use super::vitals::VitalsEstimate;
use super::clamp_score;
use crate::error_handling::AnalysisError;
use crate::parse::ExtractedFacts;

/// A 0-100 rating of one facet of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScore {
    pub exists: bool,
    pub score: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl SubScore {
    pub fn new(exists: bool, score: f64) -> Self {
        SubScore {
            exists,
            score: clamp_score(score),
            issues: Vec::new(),
        }
    }

    /// Absent facet: `exists: false`, score 0.
    pub fn absent() -> Self {
        SubScore::default()
    }

    /// 100 when `present`, 0 otherwise.
    pub fn flag(present: bool) -> Self {
        SubScore::new(present, if present { 100.0 } else { 0.0 })
    }

    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issues.push(issue.into());
        self
    }
}

/// The analyzers, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum AnalyzerKind {
    Metadata,
    Headings,
    Images,
    Technical,
    Social,
    Analytics,
    Performance,
    Mobile,
    ContentQuality,
    Regional,
    StructuredData,
    Security,
    Accessibility,
}

impl AnalyzerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerKind::Metadata => "metadata",
            AnalyzerKind::Headings => "headings",
            AnalyzerKind::Images => "images",
            AnalyzerKind::Technical => "technical",
            AnalyzerKind::Social => "social",
            AnalyzerKind::Analytics => "analytics",
            AnalyzerKind::Performance => "performance",
            AnalyzerKind::Mobile => "mobile",
            AnalyzerKind::ContentQuality => "contentQuality",
            AnalyzerKind::Regional => "regionalOptimization",
            AnalyzerKind::StructuredData => "structuredData",
            AnalyzerKind::Security => "security",
            AnalyzerKind::Accessibility => "accessibility",
        }
    }

    /// Runs this analyzer over the facts.
    pub fn run(self, facts: &ExtractedFacts, vitals: &VitalsEstimate) -> AnalyzerOutput {
        match self {
            AnalyzerKind::Metadata => AnalyzerOutput::Metadata(metadata::analyze(facts)),
            AnalyzerKind::Headings => AnalyzerOutput::Headings(headings::analyze(facts)),
            AnalyzerKind::Images => AnalyzerOutput::Images(images::analyze(facts)),
            AnalyzerKind::Technical => AnalyzerOutput::Technical(technical::analyze(facts)),
            AnalyzerKind::Social => AnalyzerOutput::Social(social::analyze(facts)),
            AnalyzerKind::Analytics => AnalyzerOutput::Analytics(analytics::analyze(facts)),
            AnalyzerKind::Performance => {
                AnalyzerOutput::Performance(performance::analyze(facts, vitals))
            }
            AnalyzerKind::Mobile => AnalyzerOutput::Mobile(mobile::analyze(facts)),
            AnalyzerKind::ContentQuality => AnalyzerOutput::ContentQuality(content::analyze(facts)),
            AnalyzerKind::Regional => AnalyzerOutput::Regional(regional::analyze(facts)),
            AnalyzerKind::StructuredData => {
                AnalyzerOutput::StructuredData(structured::analyze(facts))
            }
            AnalyzerKind::Security => AnalyzerOutput::Security(security::analyze(facts)),
            AnalyzerKind::Accessibility => {
                AnalyzerOutput::Accessibility(accessibility::analyze(facts))
            }
        }
    }
}

impl std::fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One analyzer's typed result.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzerOutput {
    Metadata(MetadataReport),
    Headings(HeadingsReport),
    Images(ImagesReport),
    Technical(TechnicalReport),
    Social(SocialReport),
    Analytics(AnalyticsReport),
    Performance(PerformanceReport),
    Mobile(MobileReport),
    ContentQuality(ContentQualityReport),
    Regional(RegionalReport),
    StructuredData(StructuredDataReport),
    Security(SecurityReport),
    Accessibility(AccessibilityReport),
}

impl AnalyzerOutput {
    /// The empty report of `kind` with `message` attached, used when the analyzer failed.
    pub fn failed(kind: AnalyzerKind, message: impl Into<String>) -> Self {
        let error = Some(message.into());
        match kind {
            AnalyzerKind::Metadata => AnalyzerOutput::Metadata(MetadataReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::Headings => AnalyzerOutput::Headings(HeadingsReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::Images => AnalyzerOutput::Images(ImagesReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::Technical => AnalyzerOutput::Technical(TechnicalReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::Social => AnalyzerOutput::Social(SocialReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::Analytics => AnalyzerOutput::Analytics(AnalyticsReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::Performance => AnalyzerOutput::Performance(PerformanceReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::Mobile => AnalyzerOutput::Mobile(MobileReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::ContentQuality => AnalyzerOutput::ContentQuality(ContentQualityReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::Regional => AnalyzerOutput::Regional(RegionalReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::StructuredData => {
                AnalyzerOutput::StructuredData(StructuredDataReport {
                    error,
                    ..Default::default()
                })
            }
            AnalyzerKind::Security => AnalyzerOutput::Security(SecurityReport {
                error,
                ..Default::default()
            }),
            AnalyzerKind::Accessibility => AnalyzerOutput::Accessibility(AccessibilityReport {
                error,
                ..Default::default()
            }),
        }
    }

    pub fn kind(&self) -> AnalyzerKind {
        match self {
            AnalyzerOutput::Metadata(_) => AnalyzerKind::Metadata,
            AnalyzerOutput::Headings(_) => AnalyzerKind::Headings,
            AnalyzerOutput::Images(_) => AnalyzerKind::Images,
            AnalyzerOutput::Technical(_) => AnalyzerKind::Technical,
            AnalyzerOutput::Social(_) => AnalyzerKind::Social,
            AnalyzerOutput::Analytics(_) => AnalyzerKind::Analytics,
            AnalyzerOutput::Performance(_) => AnalyzerKind::Performance,
            AnalyzerOutput::Mobile(_) => AnalyzerKind::Mobile,
            AnalyzerOutput::ContentQuality(_) => AnalyzerKind::ContentQuality,
            AnalyzerOutput::Regional(_) => AnalyzerKind::Regional,
            AnalyzerOutput::StructuredData(_) => AnalyzerKind::StructuredData,
            AnalyzerOutput::Security(_) => AnalyzerKind::Security,
            AnalyzerOutput::Accessibility(_) => AnalyzerKind::Accessibility,
        }
    }

    /// The analyzer's overall 0-100 score.
    pub fn score(&self) -> u8 {
        match self {
            AnalyzerOutput::Metadata(r) => r.score,
            AnalyzerOutput::Headings(r) => r.score,
            AnalyzerOutput::Images(r) => r.score,
            AnalyzerOutput::Technical(r) => r.score,
            AnalyzerOutput::Social(r) => r.score,
            AnalyzerOutput::Analytics(r) => r.score,
            AnalyzerOutput::Performance(r) => r.score,
            AnalyzerOutput::Mobile(r) => r.score,
            AnalyzerOutput::ContentQuality(r) => r.score,
            AnalyzerOutput::Regional(r) => r.score,
            AnalyzerOutput::StructuredData(r) => r.score,
            AnalyzerOutput::Security(r) => r.score,
            AnalyzerOutput::Accessibility(r) => r.score,
        }
    }
}

/// Every analyzer's report, joined after the fan-out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerResults {
    pub metadata: MetadataReport,
    pub headings: HeadingsReport,
    pub images: ImagesReport,
    pub technical: TechnicalReport,
    pub social: SocialReport,
    pub analytics: AnalyticsReport,
    pub performance: PerformanceReport,
    pub mobile: MobileReport,
    pub content_quality: ContentQualityReport,
    pub regional_optimization: RegionalReport,
    pub structured_data: StructuredDataReport,
    pub security: SecurityReport,
    pub accessibility: AccessibilityReport,
}

impl AnalyzerResults {
    /// Assembles the results from one output per analyzer.
    ///
    /// A missing or duplicated analyzer output is an engine bug and yields
    /// `AnalysisError::Internal`.
    pub fn from_outputs(
        outputs: impl IntoIterator<Item = AnalyzerOutput>,
    ) -> Result<Self, AnalysisError> {
        use strum::IntoEnumIterator;

        let mut results = AnalyzerResults::default();
        let mut seen = std::collections::HashSet::new();
        for output in outputs {
            let kind = output.kind();
            if !seen.insert(kind) {
                return Err(AnalysisError::Internal(format!(
                    "analyzer {} produced more than one result",
                    kind
                )));
            }
            results.set(output);
        }

        if let Some(missing) = AnalyzerKind::iter().find(|kind| !seen.contains(kind)) {
            return Err(AnalysisError::Internal(format!(
                "analyzer {} produced no result",
                missing
            )));
        }
        Ok(results)
    }

    /// Runs every analyzer sequentially on the current thread.
    pub fn run_inline(facts: &ExtractedFacts, vitals: &VitalsEstimate) -> Self {
        use strum::IntoEnumIterator;

        let mut results = AnalyzerResults::default();
        for kind in AnalyzerKind::iter() {
            results.set(kind.run(facts, vitals));
        }
        results
    }

    fn set(&mut self, output: AnalyzerOutput) {
        match output {
            AnalyzerOutput::Metadata(r) => self.metadata = r,
            AnalyzerOutput::Headings(r) => self.headings = r,
            AnalyzerOutput::Images(r) => self.images = r,
            AnalyzerOutput::Technical(r) => self.technical = r,
            AnalyzerOutput::Social(r) => self.social = r,
            AnalyzerOutput::Analytics(r) => self.analytics = r,
            AnalyzerOutput::Performance(r) => self.performance = r,
            AnalyzerOutput::Mobile(r) => self.mobile = r,
            AnalyzerOutput::ContentQuality(r) => self.content_quality = r,
            AnalyzerOutput::Regional(r) => self.regional_optimization = r,
            AnalyzerOutput::StructuredData(r) => self.structured_data = r,
            AnalyzerOutput::Security(r) => self.security = r,
            AnalyzerOutput::Accessibility(r) => self.accessibility = r,
        }
    }
}
