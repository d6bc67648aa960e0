use serde::Serialize;

/// Presentation priority. Declaration order is sort order: high first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Area of the report a tip belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TipCategory {
    Metadata,
    Headings,
    Images,
    Technical,
    Social,
    Analytics,
    Performance,
    Mobile,
    Content,
    Regional,
    StructuredData,
    Security,
    Accessibility,
}

/// One actionable recommendation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementTip {
    pub category: TipCategory,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Estimated effect on ranking, 1 (minor) to 5 (major)
    pub impact: u8,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
