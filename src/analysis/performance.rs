//! Performance: estimated Core Web Vitals, caching, compression, resource
//! count and server response time.

use serde::Serialize;

use super::vitals::VitalsEstimate;
use super::{check, mean, weighted, SubScore};
use crate::config::{
    CLS_GOOD, CLS_POOR, COMPRESSED_ENCODINGS, FID_GOOD_MS, FID_POOR_MS, HEADER_CACHE_CONTROL,
    HEADER_CONTENT_ENCODING, HEADER_ETAG, HEADER_EXPIRES, HEADER_LAST_MODIFIED,
    HEADER_SERVER_TIMING, LCP_GOOD_MS, LCP_POOR_MS,
};
use crate::parse::ExtractedFacts;

/// Rating of one Core Web Vital against its good / poor thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VitalRating {
    Good,
    NeedsImprovement,
    #[default]
    Poor,
}

impl VitalRating {
    fn rate(value: f64, good: f64, poor: f64) -> Self {
        if value <= good {
            VitalRating::Good
        } else if value <= poor {
            VitalRating::NeedsImprovement
        } else {
            VitalRating::Poor
        }
    }

    pub fn points(self) -> u8 {
        match self {
            VitalRating::Good => 100,
            VitalRating::NeedsImprovement => 60,
            VitalRating::Poor => 20,
        }
    }
}

/// Estimated, never measured: `estimated` is always `true` when populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreWebVitalsReport {
    pub score: u8,
    pub lcp_ms: f64,
    pub lcp_rating: VitalRating,
    pub fid_ms: f64,
    pub fid_rating: VitalRating,
    pub cls: f64,
    pub cls_rating: VitalRating,
    pub estimated: bool,
    pub method: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachingReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub cache_control: Option<String>,
    pub has_validator: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub encoding: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCountReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub scripts: usize,
    pub stylesheets: usize,
    pub images: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTimingReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub latency_ms: u64,
    /// Duration announced by the `Server-Timing` header, when present
    pub reported_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub score: u8,
    pub core_web_vitals: CoreWebVitalsReport,
    pub caching: CachingReport,
    pub compression: CompressionReport,
    pub resources: ResourceCountReport,
    pub server_timing: ServerTimingReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts, vitals: &VitalsEstimate) -> PerformanceReport {
    let core_web_vitals = rate_vitals(vitals);
    let caching = score_caching(facts);
    let compression = score_compression(facts);
    let resources = score_resources(facts);
    let server_timing = score_server_timing(facts);

    PerformanceReport {
        score: weighted(&[
            (core_web_vitals.score, 0.4),
            (caching.result.score, 0.15),
            (compression.result.score, 0.15),
            (resources.result.score, 0.15),
            (server_timing.result.score, 0.15),
        ]),
        core_web_vitals,
        caching,
        compression,
        resources,
        server_timing,
        error: None,
    }
}

pub(crate) fn rate_vitals(vitals: &VitalsEstimate) -> CoreWebVitalsReport {
    let lcp_rating = VitalRating::rate(vitals.lcp_ms, LCP_GOOD_MS, LCP_POOR_MS);
    let fid_rating = VitalRating::rate(vitals.fid_ms, FID_GOOD_MS, FID_POOR_MS);
    let cls_rating = VitalRating::rate(vitals.cls, CLS_GOOD, CLS_POOR);
    CoreWebVitalsReport {
        score: mean(&[lcp_rating.points(), fid_rating.points(), cls_rating.points()]),
        lcp_ms: vitals.lcp_ms,
        lcp_rating,
        fid_ms: vitals.fid_ms,
        fid_rating,
        cls: vitals.cls,
        cls_rating,
        estimated: true,
        method: vitals.method.to_string(),
    }
}

/// Cache directive and validator: both 100, either 50, neither 0.
fn score_caching(facts: &ExtractedFacts) -> CachingReport {
    let cache_control = facts.header(HEADER_CACHE_CONTROL).map(str::to_string);
    let cacheable = match cache_control.as_deref() {
        Some(value) => !value.to_ascii_lowercase().contains("no-store"),
        None => facts.header(HEADER_EXPIRES).is_some(),
    };
    let has_validator =
        facts.header(HEADER_ETAG).is_some() || facts.header(HEADER_LAST_MODIFIED).is_some();

    let result = match (cacheable, has_validator) {
        (true, true) => SubScore::new(true, 100.0),
        (true, false) => SubScore::new(true, 50.0).with_issue("No ETag or Last-Modified validator"),
        (false, true) => SubScore::new(true, 50.0).with_issue("No Cache-Control or Expires policy"),
        (false, false) => SubScore::absent().with_issue("Response declares no caching policy"),
    };
    CachingReport {
        result,
        cache_control,
        has_validator,
    }
}

fn score_compression(facts: &ExtractedFacts) -> CompressionReport {
    let encoding = facts.header(HEADER_CONTENT_ENCODING).map(str::to_string);
    let compressed = encoding.as_deref().is_some_and(|value| {
        let value = value.to_ascii_lowercase();
        COMPRESSED_ENCODINGS.iter().any(|e| value.contains(e))
    });
    let result = check(compressed, "Response is not compressed");
    CompressionReport { result, encoding }
}

fn score_resources(facts: &ExtractedFacts) -> ResourceCountReport {
    let scripts = facts.resources.scripts;
    let stylesheets = facts.resources.stylesheets;
    let images = facts.images.total;
    let total = scripts + stylesheets + images;
    let score = match total {
        0..=30 => 100.0,
        31..=60 => 70.0,
        61..=100 => 40.0,
        _ => 20.0,
    };
    let mut result = SubScore::new(true, score);
    if total > 30 {
        result
            .issues
            .push(format!("{} scripts, stylesheets and images requested", total));
    }
    ResourceCountReport {
        result,
        scripts,
        stylesheets,
        images,
        total,
    }
}

/// Scores the server's own `Server-Timing` figure when it sends one, the
/// observed fetch latency otherwise.
fn score_server_timing(facts: &ExtractedFacts) -> ServerTimingReport {
    let reported_ms = facts
        .header(HEADER_SERVER_TIMING)
        .and_then(reported_duration_ms);
    let elapsed = reported_ms.unwrap_or(facts.fetch_latency_ms);
    let mut result = SubScore::new(true, response_time_points(elapsed));
    if elapsed > 500 {
        result
            .issues
            .push(format!("Server responded in {} ms", elapsed));
    }
    ServerTimingReport {
        result,
        latency_ms: facts.fetch_latency_ms,
        reported_ms,
    }
}

fn response_time_points(elapsed_ms: u64) -> f64 {
    match elapsed_ms {
        0..=200 => 100.0,
        201..=500 => 80.0,
        501..=1000 => 60.0,
        1001..=2000 => 40.0,
        _ => 20.0,
    }
}

/// `total;dur=123.4, db;dur=53` → the `total` metric, else the longest one.
fn reported_duration_ms(header: &str) -> Option<u64> {
    let mut total = None;
    let mut longest: Option<f64> = None;
    for metric in header.split(',') {
        let mut parts = metric.split(';').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let Some(dur) = parts
            .filter_map(|p| p.strip_prefix("dur="))
            .find_map(|v| v.trim_matches('"').parse::<f64>().ok())
            .filter(|d| d.is_finite() && *d >= 0.0)
        else {
            continue;
        };
        if name.eq_ignore_ascii_case("total") {
            total = Some(dur);
        }
        longest = Some(longest.map_or(dur, |l| l.max(dur)));
    }
    total.or(longest).map(|ms| ms.round() as u64)
}
