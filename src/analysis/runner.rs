//! Bounded parallel fan-out of the analyzers.

use std::any::Any;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use strum::IntoEnumIterator;
use tokio::sync::Semaphore;

use super::types::{AnalyzerKind, AnalyzerOutput, AnalyzerResults};
use super::vitals::VitalsEstimate;
use crate::error_handling::{AnalysisError, ErrorType, ProcessingStats};
use crate::parse::ExtractedFacts;

/// Runs every analyzer on the blocking pool, at most `semaphore` permits at a
/// time, and joins them.
///
/// A panicking analyzer is replaced by its empty report carrying the panic
/// message; the rest of the analysis continues. Only a closed semaphore or a
/// cancelled task is fatal.
pub async fn run_analyzers(
    facts: Arc<ExtractedFacts>,
    vitals: VitalsEstimate,
    semaphore: Arc<Semaphore>,
    stats: &ProcessingStats,
) -> Result<AnalyzerResults, AnalysisError> {
    run_with(facts, vitals, semaphore, stats, AnalyzerKind::run).await
}

type AnalyzerFn = fn(AnalyzerKind, &ExtractedFacts, &VitalsEstimate) -> AnalyzerOutput;

async fn run_with(
    facts: Arc<ExtractedFacts>,
    vitals: VitalsEstimate,
    semaphore: Arc<Semaphore>,
    stats: &ProcessingStats,
    analyze: AnalyzerFn,
) -> Result<AnalyzerResults, AnalysisError> {
    let mut tasks = FuturesUnordered::new();

    for kind in AnalyzerKind::iter() {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|_| AnalysisError::Internal("analyzer pool is closed".to_string()))?;
        let facts = Arc::clone(&facts);
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            analyze(kind, &facts, &vitals)
        });
        tasks.push(async move { (kind, handle.await) });
    }

    let mut outputs = Vec::with_capacity(crate::config::ANALYZER_COUNT);
    while let Some((kind, joined)) = tasks.next().await {
        match joined {
            Ok(output) => outputs.push(output),
            Err(e) if e.is_panic() => {
                let message = panic_message(e.into_panic());
                log::warn!("Analyzer {} failed: {}", kind, message);
                stats.increment_error(ErrorType::AnalyzerPanic);
                outputs.push(AnalyzerOutput::failed(
                    kind,
                    format!("analyzer failed: {}", message),
                ));
            }
            Err(e) => {
                log::error!("Analyzer {} task was cancelled: {}", kind, e);
                return Err(AnalysisError::Internal(format!(
                    "analyzer {} did not complete",
                    kind
                )));
            }
        }
    }

    AnalyzerResults::from_outputs(outputs)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RawDocument;
    use crate::initialization::init_semaphore;
    use crate::parse::extract_facts;

    fn facts() -> Arc<ExtractedFacts> {
        let html = r#"<!DOCTYPE html><html lang="en"><head><title>Parallel analysis of a small page</title></head>
            <body><h1>Heading</h1><img src="a.png" alt="a"></body></html>"#;
        Arc::new(extract_facts(&RawDocument::from_html("https://example.com/", html)))
    }

    fn vitals() -> VitalsEstimate {
        VitalsEstimate::from_latency(100, 50.0, 0.05, "fixed")
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let facts = facts();
        let stats = ProcessingStats::new();
        let parallel = run_analyzers(Arc::clone(&facts), vitals(), init_semaphore(4), &stats)
            .await
            .unwrap();
        let sequential = AnalyzerResults::run_inline(&facts, &vitals());
        assert_eq!(parallel, sequential);
        assert_eq!(stats.get_error_count(ErrorType::AnalyzerPanic), 0);
    }

    #[tokio::test]
    async fn test_single_permit_still_completes() {
        let stats = ProcessingStats::new();
        let results = run_analyzers(facts(), vitals(), init_semaphore(1), &stats)
            .await
            .unwrap();
        assert_eq!(results.headings.h1.result.score, 100);
        assert_eq!(results.images.score, 100);
    }

    #[tokio::test]
    async fn test_closed_pool_is_internal_error() {
        let semaphore = init_semaphore(2);
        semaphore.close();
        let stats = ProcessingStats::new();
        let err = run_analyzers(facts(), vitals(), semaphore, &stats)
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 500);
    }

    #[tokio::test]
    async fn test_panicking_analyzer_degrades_to_empty_report() {
        fn flaky(kind: AnalyzerKind, facts: &ExtractedFacts, vitals: &VitalsEstimate) -> AnalyzerOutput {
            if kind == AnalyzerKind::Social {
                panic!("social exploded");
            }
            kind.run(facts, vitals)
        }

        let stats = ProcessingStats::new();
        let results = run_with(facts(), vitals(), init_semaphore(3), &stats, flaky)
            .await
            .unwrap();
        assert_eq!(results.social.score, 0);
        assert_eq!(
            results.social.error.as_deref(),
            Some("analyzer failed: social exploded")
        );
        assert_eq!(results.headings.h1.result.score, 100);
        assert_eq!(stats.get_error_count(ErrorType::AnalyzerPanic), 1);
    }

    #[test]
    fn test_panic_message_extraction() {
        assert_eq!(panic_message(Box::new("static")), "static");
        assert_eq!(panic_message(Box::new(String::from("owned"))), "owned");
        assert_eq!(panic_message(Box::new(7_u32)), "unknown panic");
    }
}
