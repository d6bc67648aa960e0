//! Structured data validation.
//!
//! Each JSON-LD item with a known `@type` is checked for required properties
//! (missing ones are errors) and for the JSON type of well-known properties
//! (mismatches are warnings).

use serde::Serialize;
use serde_json::Value;

use crate::parse::ExtractedFacts;

const EXISTENCE_POINTS: u8 = 30;
const ANALYZED_POINTS: u8 = 20;
const NO_ERRORS_POINTS: u8 = 30;
const NO_WARNINGS_POINTS: u8 = 20;

pub(crate) const NO_STRUCTURED_DATA: &str = "No structured data found";

/// Required properties per schema.org type.
const REQUIRED_PROPERTIES: &[(&str, &[&str])] = &[
    ("Organization", &["name"]),
    ("WebSite", &["name", "url"]),
    ("WebPage", &["name"]),
    ("Article", &["headline", "author", "datePublished"]),
    ("NewsArticle", &["headline", "author", "datePublished"]),
    ("BlogPosting", &["headline", "author", "datePublished"]),
    ("Product", &["name"]),
    ("LocalBusiness", &["name", "address"]),
    ("Person", &["name"]),
    ("Event", &["name", "startDate", "location"]),
    ("BreadcrumbList", &["itemListElement"]),
    ("FAQPage", &["mainEntity"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expected {
    String,
    StringOrObject,
    ArrayOrObject,
}

impl Expected {
    fn matches(self, value: &Value) -> bool {
        match self {
            Expected::String => value.is_string(),
            Expected::StringOrObject => value.is_string() || value.is_object(),
            Expected::ArrayOrObject => value.is_array() || value.is_object(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Expected::String => "a string",
            Expected::StringOrObject => "a string or an object",
            Expected::ArrayOrObject => "an array or an object",
        }
    }
}

/// Expected JSON types of well-known properties, for any type.
const PROPERTY_TYPES: &[(&str, Expected)] = &[
    ("name", Expected::String),
    ("url", Expected::String),
    ("headline", Expected::String),
    ("description", Expected::String),
    ("datePublished", Expected::String),
    ("dateModified", Expected::String),
    ("logo", Expected::StringOrObject),
    ("image", Expected::StringOrObject),
    ("itemListElement", Expected::ArrayOrObject),
    ("mainEntity", Expected::ArrayOrObject),
    ("offers", Expected::ArrayOrObject),
    ("address", Expected::StringOrObject),
];

/// Validation outcome for one JSON-LD item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReport {
    pub schema_type: String,
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDataReport {
    pub score: u8,
    pub exists: bool,
    pub json_ld_blocks: usize,
    pub schema_types: Vec<String>,
    pub microdata_types: Vec<String>,
    pub rdfa_types: Vec<String>,
    pub schemas: Vec<SchemaReport>,
    /// Parse failures and missing required properties
    pub errors: Vec<String>,
    /// Property type mismatches and untyped items
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts) -> StructuredDataReport {
    let data = &facts.structured;
    let mut report = StructuredDataReport {
        exists: data.has_schema(),
        json_ld_blocks: data.json_ld_blocks,
        schema_types: data.schema_types.clone(),
        microdata_types: data.microdata_types.clone(),
        rdfa_types: data.rdfa_types.clone(),
        errors: data.json_ld_errors.clone(),
        ..Default::default()
    };

    if !report.exists {
        report.errors.push(NO_STRUCTURED_DATA.to_string());
        return report;
    }

    for (index, item) in data.json_ld.iter().enumerate() {
        let types = crate::parse::declared_types(item);
        if types.is_empty() {
            report
                .warnings
                .push(format!("JSON-LD item {} declares no @type", index + 1));
            continue;
        }
        for schema_type in types {
            let schema = validate_item(&schema_type, item);
            report.errors.extend(schema.errors.iter().cloned());
            report.warnings.extend(schema.warnings.iter().cloned());
            report.schemas.push(schema);
        }
    }

    let mut score = EXISTENCE_POINTS;
    if !report.schemas.is_empty() {
        score += ANALYZED_POINTS;
    }
    if report.errors.is_empty() {
        score += NO_ERRORS_POINTS;
    }
    if report.warnings.is_empty() {
        score += NO_WARNINGS_POINTS;
    }
    report.score = score;
    report
}

fn validate_item(schema_type: &str, item: &Value) -> SchemaReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let required = REQUIRED_PROPERTIES
        .iter()
        .find(|(name, _)| *name == schema_type)
        .map(|(_, props)| *props)
        .unwrap_or_default();
    for property in required {
        let missing = match item.get(*property) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        };
        if missing {
            errors.push(format!(
                "{} is missing required property '{}'",
                schema_type, property
            ));
        }
    }

    for (property, expected) in PROPERTY_TYPES {
        if let Some(value) = item.get(*property) {
            if !value.is_null() && !expected.matches(value) {
                warnings.push(format!(
                    "{}.{} should be {}",
                    schema_type,
                    property,
                    expected.describe()
                ));
            }
        }
    }

    SchemaReport {
        schema_type: schema_type.to_string(),
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}
