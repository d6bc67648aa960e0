//! Analytics tooling detection.

use serde::Serialize;

use super::SubScore;
use crate::parse::{AnalyticsTool, ExtractedFacts};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub score: u8,
    pub exists: bool,
    pub tools: Vec<AnalyticsTool>,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyticsReport {
    pub fn has_provider(&self, provider: &str) -> bool {
        self.tools.iter().any(|t| t.provider == provider)
    }
}

pub fn analyze(facts: &ExtractedFacts) -> AnalyticsReport {
    let result = match facts.analytics.len() {
        0 => SubScore::absent().with_issue("No analytics tooling detected"),
        1 => SubScore::new(true, 70.0),
        _ => SubScore::new(true, 100.0),
    };
    AnalyticsReport {
        score: result.score,
        exists: result.exists,
        tools: facts.analytics.clone(),
        issues: result.issues,
        error: None,
    }
}
