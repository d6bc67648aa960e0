//! Error handling and processing statistics.
//!
//! This module provides:
//! - The caller-facing `AnalysisError` taxonomy
//! - Processing statistics tracking (errors, warnings, info metrics)
//! - Error type extraction from `reqwest` failures
//!
//! Error types are categorized into:
//! - **Errors**: fetch failures plus faults recovered inside the pipeline
//! - **Warnings**: SEO essentials missing from an analyzed page
//! - **Info**: informational metrics (completed analyses, redirects, truncation)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, fetch_failure};
pub use stats::ProcessingStats;
pub use types::{AnalysisError, ErrorType, InfoType, InitializationError, WarningType};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for warning_type in WarningType::iter() {
            assert_eq!(stats.get_warning_count(warning_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::ProbeFailure);
        assert_eq!(stats.get_error_count(ErrorType::ProbeFailure), 1);

        stats.increment_warning(WarningType::MissingMetaDescription);
        assert_eq!(
            stats.get_warning_count(WarningType::MissingMetaDescription),
            1
        );

        stats.increment_info(InfoType::AnalysisCompleted);
        assert_eq!(stats.get_info_count(InfoType::AnalysisCompleted), 1);
    }

    #[test]
    fn test_processing_stats_totals() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::ProbeFailure);
        stats.increment_error(ErrorType::FetchTimeout);
        stats.increment_error(ErrorType::FetchTimeout);
        stats.increment_warning(WarningType::MissingTitle);
        stats.increment_info(InfoType::HttpsRedirect);

        assert_eq!(stats.get_error_count(ErrorType::FetchTimeout), 2);
        assert_eq!(stats.total_errors(), 3);
        assert_eq!(stats.total_warnings(), 1);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_processing_stats_concurrent_increments() {
        let stats = std::sync::Arc::new(ProcessingStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = std::sync::Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.increment_error(ErrorType::AnalyzerPanic);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }
        assert_eq!(stats.get_error_count(ErrorType::AnalyzerPanic), 800);
    }
}
