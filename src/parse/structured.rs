//! Structured data extraction.
//!
//! This module extracts structured data from HTML documents including:
//! - JSON-LD (`<script type="application/ld+json">`), with `@graph` flattened
//! - Microdata (`itemtype`) and RDFa (`typeof`) types
//! - Open Graph meta tags (og:*)
//! - Twitter Card meta tags (twitter:*)

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use super::selector;

static SCRIPT_TYPED_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("script[type]"));
static ITEMTYPE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("[itemtype]"));
static TYPEOF_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("[typeof]"));
static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("meta[content]"));

const JSON_LD_MIME: &str = "application/ld+json";

/// Structured data extracted from HTML
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredData {
    /// JSON-LD items: top-level objects, array members and `@graph` members
    pub json_ld: Vec<Value>,
    /// One entry per JSON-LD block that failed to parse
    pub json_ld_errors: Vec<String>,
    /// Number of `<script type="application/ld+json">` blocks seen
    pub json_ld_blocks: usize,
    /// Schema.org types declared by JSON-LD `@type`
    pub schema_types: Vec<String>,
    /// Types declared by microdata `itemtype`
    pub microdata_types: Vec<String>,
    /// Types declared by RDFa `typeof`
    pub rdfa_types: Vec<String>,
    /// Open Graph meta tags (og:*)
    pub open_graph: BTreeMap<String, String>,
    /// Twitter Card meta tags (twitter:*)
    pub twitter_cards: BTreeMap<String, String>,
}

impl StructuredData {
    /// `true` when any JSON-LD, microdata or RDFa markup was found.
    pub fn has_schema(&self) -> bool {
        self.json_ld_blocks > 0 || !self.microdata_types.is_empty() || !self.rdfa_types.is_empty()
    }
}

/// Extracts structured data from an HTML document.
pub fn extract_structured_data(document: &Html) -> StructuredData {
    let mut data = StructuredData::default();

    let blocks = document.select(&SCRIPT_TYPED_SELECTOR).filter(|el| {
        el.value()
            .attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(JSON_LD_MIME))
    });
    for (index, element) in blocks.enumerate() {
        data.json_ld_blocks += 1;
        let raw = element.text().collect::<String>();
        match parse_json_ld_block(raw.trim()) {
            Ok(items) => data.json_ld.extend(items),
            Err(e) => {
                log::debug!("Skipping malformed JSON-LD block {}: {}", index + 1, e);
                data.json_ld_errors
                    .push(format!("JSON-LD block {} is not valid JSON: {}", index + 1, e));
            }
        }
    }

    data.schema_types = data.json_ld.iter().flat_map(declared_types).collect();
    data.microdata_types = collect_type_attr(document, &ITEMTYPE_SELECTOR, "itemtype");
    data.rdfa_types = collect_type_attr(document, &TYPEOF_SELECTOR, "typeof");

    for element in document.select(&META_SELECTOR) {
        let attrs = element.value();
        let key = attrs.attr("property").or_else(|| attrs.attr("name"));
        let (Some(key), Some(content)) = (key, attrs.attr("content")) else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let target = if key.starts_with("og:") {
            &mut data.open_graph
        } else if key.starts_with("twitter:") {
            &mut data.twitter_cards
        } else {
            continue;
        };
        // First declaration wins, as crawlers read it
        target
            .entry(key)
            .or_insert_with(|| content.trim().to_string());
    }

    data
}

/// Parses one JSON-LD block into its items.
///
/// Arrays contribute each member; an object carrying `@graph` contributes the
/// graph members (and itself, when it also declares a `@type`).
fn parse_json_ld_block(text: &str) -> Result<Vec<Value>, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    let mut items = Vec::new();
    flatten_json_ld(value, &mut items);
    Ok(items)
}

fn flatten_json_ld(value: Value, items: &mut Vec<Value>) {
    match value {
        Value::Array(members) => {
            for member in members {
                flatten_json_ld(member, items);
            }
        }
        Value::Object(mut map) => {
            if let Some(graph) = map.remove("@graph") {
                if map.contains_key("@type") {
                    items.push(Value::Object(map));
                }
                flatten_json_ld(graph, items);
            } else {
                items.push(Value::Object(map));
            }
        }
        // Scalars carry no schema
        _ => {}
    }
}

/// Reads `@type` as a string or an array of strings.
pub(crate) fn declared_types(item: &Value) -> Vec<String> {
    match item.get("@type") {
        Some(Value::String(t)) => vec![t.clone()],
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(|t| t.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Collects type names from a space-separated type attribute, keeping the last
/// path or prefix segment (`https://schema.org/Product` and `schema:Product` both give `Product`).
fn collect_type_attr(document: &Html, sel: &Selector, attr: &str) -> Vec<String> {
    document
        .select(sel)
        .filter_map(|el| el.value().attr(attr))
        .flat_map(|value| value.split_ascii_whitespace())
        .filter_map(|t| {
            t.rsplit(['/', ':', '#'])
                .find(|segment| !segment.is_empty())
                .map(str::to_string)
        })
        .collect()
}
