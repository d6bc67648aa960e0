//! End-to-end scenarios through the full pipeline.
//!
//! The well-formed page is analyzed from an HTTPS `RawDocument` (the mock
//! server only speaks plain HTTP); everything else goes through a wiremock
//! target so the fetch and probe path is exercised too.

mod helpers;

use chrono::{TimeZone, Utc};
use seo_analyzer::fetch::ProbeResults;
use seo_analyzer::improvements::{Difficulty, Priority};
use seo_analyzer::scoring::TECHNICAL_SEO;
use seo_analyzer::{Grade, RawDocument};
use wiremock::MockServer;

use helpers::{bare_page, good_page, mount_site, test_engine, GOOD_TITLE};

const SITE: &str = "https://acme.example/";

fn good_document() -> RawDocument {
    RawDocument::from_html(SITE, good_page(SITE))
        .with_header("Content-Encoding", "gzip")
        .with_header("Cache-Control", "public, max-age=3600")
        .with_header("ETag", "\"v1\"")
        .with_header("Strict-Transport-Security", "max-age=31536000")
        .with_header("Content-Security-Policy", "default-src 'self'")
        .with_header("X-Content-Type-Options", "nosniff")
        .with_header("X-Frame-Options", "SAMEORIGIN")
        .with_latency_ms(150)
        .with_fetched_at(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        .with_probes(ProbeResults {
            robots_txt: true,
            sitemap_xml: true,
        })
}

#[tokio::test]
async fn test_well_formed_https_page_scores_high() {
    assert_eq!(GOOD_TITLE.chars().count(), 45);
    let engine = test_engine();
    let report = engine.analyze_document(good_document()).await.unwrap();
    let results = &report.results;

    let technical = report.category(TECHNICAL_SEO).unwrap();
    assert_eq!(technical.score, 100);
    assert_eq!(results.images.total, 10);
    assert_eq!(results.images.score, 100);
    assert_eq!(results.headings.h1.result.score, 100);
    assert!(results.structured_data.score >= 80, "{:?}", results.structured_data);
    assert_eq!(results.metadata.title.length, 45);
    assert_eq!(results.metadata.title.result.score, 100);
    assert!(
        report.overall_score >= 80,
        "overall {} categories {:?}",
        report.overall_score,
        report.categories
    );
    assert_eq!(report.grade, Grade::Excellent);
    assert!(!report
        .improvements
        .iter()
        .any(|t| t.priority == Priority::High));
}

#[tokio::test]
async fn test_bare_http_page_scores_low_with_title_tip() {
    let server = MockServer::start().await;
    mount_site(&server, bare_page(), false, false).await;

    let engine = test_engine();
    let report = engine.analyze_url(&server.uri()).await.unwrap();
    let results = &report.results;

    assert_eq!(results.metadata.title.result.score, 0);
    assert!(!results.metadata.title.result.exists);
    assert_eq!(results.technical.ssl.score, 0);
    assert_eq!(results.headings.h1.result.score, 0);
    assert!(!results.structured_data.exists);
    assert!(report.overall_score < 50, "overall {}", report.overall_score);

    let tips = &report.improvements;
    assert!(!tips.is_empty());
    let title_tip = tips
        .iter()
        .find(|t| t.title == "Add a title tag")
        .expect("missing title tip");
    assert_eq!(title_tip.priority, Priority::High);
    assert_eq!(title_tip.impact, 5);
    assert_eq!(title_tip.difficulty, Difficulty::Easy);

    assert_eq!(tips[0].priority, Priority::High);
    for pair in tips.windows(2) {
        assert!(pair[0].priority <= pair[1].priority);
        if pair[0].priority == pair[1].priority {
            assert!(pair[0].impact >= pair[1].impact);
        }
    }
}

#[tokio::test]
async fn test_probes_feed_technical_score() {
    let server = MockServer::start().await;
    let url = format!("{}/", server.uri());
    mount_site(&server, good_page(&url), true, true).await;

    let report = test_engine().analyze_url(&server.uri()).await.unwrap();
    let technical = &report.results.technical;
    assert_eq!(technical.robots_txt.score, 100);
    assert_eq!(technical.sitemap.score, 100);
    assert_eq!(technical.ssl.score, 0);
    // robots 25 + sitemap 25 + canonical 10
    assert_eq!(report.category(TECHNICAL_SEO).unwrap().score, 60);
}

#[tokio::test]
async fn test_same_document_same_report_under_seeded_estimator() {
    let engine = seo_analyzer::SeoEngine::new(&helpers::test_config()).unwrap();
    let first = engine.analyze_document(good_document()).await.unwrap();
    let second = engine.analyze_document(good_document()).await.unwrap();

    let mut a = serde_json::to_value(&first).unwrap();
    let mut b = serde_json::to_value(&second).unwrap();
    a.as_object_mut().unwrap().remove("timestamp");
    b.as_object_mut().unwrap().remove("timestamp");
    assert_eq!(a, b);
    assert!(first.results.performance.core_web_vitals.estimated);
}

#[tokio::test]
async fn test_report_json_contract() {
    let report = test_engine().analyze_document(good_document()).await.unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["url"], SITE);
    assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    assert!(value["overallScore"].as_u64().unwrap() <= 100);
    assert_eq!(value["categories"].as_array().unwrap().len(), 5);
    assert_eq!(value["performance"]["coreWebVitals"]["estimated"], true);
    assert!(value["improvements"].is_array());
}
