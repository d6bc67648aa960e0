//! Pipeline orchestration.
//!
//! `SeoEngine` wires Fetcher → Extractor → Analyzers → Scorer →
//! ImprovementEngine. It holds only shared, request-independent resources
//! (HTTP client, analyzer pool, estimator, counters); every call builds its
//! report from scratch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::Semaphore;

use crate::analysis::{run_analyzers, RandomEstimator, SeededEstimator, VitalsEstimator};
use crate::config::{Config, MAX_TIMEOUT_SECS};
use crate::error_handling::{
    AnalysisError, ErrorType, InfoType, InitializationError, ProcessingStats, WarningType,
};
use crate::fetch::{fetch_document, validate_and_normalize_url, RawDocument};
use crate::improvements::generate_improvements;
use crate::initialization::{init_client, init_semaphore};
use crate::parse::{extract_facts, ExtractedFacts};
use crate::report::{AnalysisReport, Grade};
use crate::scoring::{overall_score, score_categories};

/// The analysis engine. Cheap to share behind an `Arc`.
pub struct SeoEngine {
    client: Arc<reqwest::Client>,
    semaphore: Arc<Semaphore>,
    estimator: Arc<dyn VitalsEstimator>,
    stats: Arc<ProcessingStats>,
    probe_timeout: Duration,
}

impl SeoEngine {
    /// Builds an engine from configuration.
    ///
    /// A configured `vitals_seed` selects the seeded estimator, otherwise the
    /// vitals are sampled at random.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidConfig` if a timeout is zero or
    /// above `MAX_TIMEOUT_SECS`, and `InitializationError::HttpClientError` if
    /// the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        check_timeouts(config)?;
        let client = init_client(config)?;
        let estimator: Arc<dyn VitalsEstimator> = match config.vitals_seed {
            Some(seed) => Arc::new(SeededEstimator::new(seed)),
            None => Arc::new(RandomEstimator),
        };
        Ok(SeoEngine {
            client,
            semaphore: init_semaphore(config.max_parallel_analyzers),
            estimator,
            stats: Arc::new(ProcessingStats::new()),
            probe_timeout: Duration::from_secs(config.probe_timeout_seconds),
        })
    }

    /// Replaces the Core Web Vitals estimator.
    pub fn with_estimator(mut self, estimator: Arc<dyn VitalsEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    /// Counters shared by every request served by this engine.
    pub fn stats(&self) -> Arc<ProcessingStats> {
        Arc::clone(&self.stats)
    }

    /// Fetches `input` and analyzes it.
    ///
    /// # Arguments
    ///
    /// * `input` - The caller's URL; a scheme-less input is treated as `https://`
    ///
    /// # Returns
    ///
    /// A complete `AnalysisReport`. Partial reports are never returned.
    ///
    /// # Errors
    ///
    /// `InvalidUrl` for malformed input, `Fetch` when the page cannot be
    /// retrieved, `Internal` for engine faults.
    pub async fn analyze_url(&self, input: &str) -> Result<AnalysisReport, AnalysisError> {
        let start = Instant::now();
        let url = validate_and_normalize_url(input).inspect_err(|e| {
            warn!("Rejected URL {:?}: {}", input, e);
            self.stats.increment_error(ErrorType::InvalidUrl);
        })?;
        info!("Analyzing {}", url);

        let document = fetch_document(&self.client, &url, self.probe_timeout, &self.stats)
            .await
            .inspect_err(|e| warn!("{}", e))?;

        let report = self.analyze_document(document).await?;
        info!(
            "Analyzed {} in {:.2}s: score {} ({} improvements)",
            report.url,
            start.elapsed().as_secs_f64(),
            report.overall_score,
            report.improvements.len()
        );
        Ok(report)
    }

    /// Analyzes an already fetched document.
    ///
    /// Results depend only on the document and the estimator, so the same
    /// document under a seeded estimator always yields the same scores.
    ///
    /// # Arguments
    ///
    /// * `document` - A fetched page, or one built with `RawDocument::from_html`
    ///
    /// # Returns
    ///
    /// The report with categories, overall score, grade, every analyzer's
    /// sub-report and the sorted improvement tips.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Internal` if extraction or the analyzer fan-out
    /// fails to complete.
    pub async fn analyze_document(
        &self,
        document: RawDocument,
    ) -> Result<AnalysisReport, AnalysisError> {
        let vitals = self.estimator.estimate(document.fetch_latency_ms);

        // scraper's DOM is !Send, so parsing stays on one blocking thread.
        let facts = tokio::task::spawn_blocking(move || extract_facts(&document))
            .await
            .map_err(|e| self.internal(format!("extraction did not complete: {}", e)))?;
        self.record_findings(&facts);

        let facts = Arc::new(facts);
        let results = run_analyzers(
            Arc::clone(&facts),
            vitals,
            Arc::clone(&self.semaphore),
            &self.stats,
        )
        .await
        .inspect_err(|_| self.stats.increment_error(ErrorType::InternalError))?;

        let categories = score_categories(&results);
        let overall = overall_score(&categories);
        let improvements = generate_improvements(&facts, &results);
        debug!(
            "{}: categories {:?}",
            facts.url,
            categories.iter().map(|c| c.score).collect::<Vec<_>>()
        );

        self.stats.increment_info(InfoType::AnalysisCompleted);
        Ok(AnalysisReport {
            url: facts.url.clone(),
            timestamp: Utc::now(),
            overall_score: overall,
            grade: Grade::from_score(overall),
            categories,
            results,
            improvements,
        })
    }

    fn record_findings(&self, facts: &ExtractedFacts) {
        for _ in &facts.structured.json_ld_errors {
            self.stats.increment_error(ErrorType::JsonLdParseError);
        }
        let missing = [
            (facts.title.is_none(), WarningType::MissingTitle),
            (facts.meta_description.is_none(), WarningType::MissingMetaDescription),
            (facts.headings.count(1) == 0, WarningType::MissingH1),
            (!facts.structured.has_schema(), WarningType::MissingStructuredData),
            (facts.meta.viewport.is_none(), WarningType::MissingViewport),
        ];
        for (absent, warning) in missing {
            if absent {
                self.stats.increment_warning(warning);
            }
        }
    }

    fn internal(&self, message: String) -> AnalysisError {
        log::error!("{}", message);
        self.stats.increment_error(ErrorType::InternalError);
        AnalysisError::Internal(message)
    }
}

fn check_timeouts(config: &Config) -> Result<(), InitializationError> {
    for (name, secs) in [
        ("timeout_seconds", config.timeout_seconds),
        ("probe_timeout_seconds", config.probe_timeout_seconds),
    ] {
        if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
            return Err(InitializationError::InvalidConfig(format!(
                "{} must be between 1 and {}, got {}",
                name, MAX_TIMEOUT_SECS, secs
            )));
        }
    }
    Ok(())
}
