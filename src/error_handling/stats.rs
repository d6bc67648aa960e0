//! Processing statistics tracking.
//!
//! Thread-safe counters for errors, warnings and informational events seen
//! across analysis requests. Read by the `/metrics` endpoint.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// One atomic counter per variant of a strum-iterable enum.
struct CounterMap<K: Eq + Hash> {
    counters: HashMap<K, AtomicUsize>,
}

impl<K> CounterMap<K>
where
    K: IntoEnumIterator + Eq + Hash + Copy + std::fmt::Debug,
{
    fn new() -> Self {
        Self {
            counters: K::iter().map(|k| (k, AtomicUsize::new(0))).collect(),
        }
    }

    fn increment(&self, key: K) {
        match self.counters.get(&key) {
            Some(counter) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            // Every variant is inserted in new(); log instead of panicking
            None => log::error!("No counter registered for {:?}", key),
        }
    }

    fn get(&self, key: K) -> usize {
        self.counters
            .get(&key)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    fn total(&self) -> usize {
        K::iter().map(|k| self.get(k)).sum()
    }
}

/// Thread-safe processing statistics tracker.
///
/// # Categories
///
/// - **Errors**: fetch failures and locally recovered faults
/// - **Warnings**: SEO essentials missing on analyzed pages
/// - **Info**: notable events that aren't errors or warnings
///
/// Shared across requests behind an `Arc`.
pub struct ProcessingStats {
    errors: CounterMap<ErrorType>,
    warnings: CounterMap<WarningType>,
    info: CounterMap<InfoType>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        ProcessingStats {
            errors: CounterMap::new(),
            warnings: CounterMap::new(),
            info: CounterMap::new(),
        }
    }

    pub fn increment_error(&self, error: ErrorType) {
        self.errors.increment(error);
    }

    pub fn increment_warning(&self, warning: WarningType) {
        self.warnings.increment(warning);
    }

    pub fn increment_info(&self, info_type: InfoType) {
        self.info.increment(info_type);
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors.get(error)
    }

    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings.get(warning)
    }

    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info.get(info_type)
    }

    /// Get total error count across all error types.
    pub fn total_errors(&self) -> usize {
        self.errors.total()
    }

    /// Get total warning count across all warning types.
    pub fn total_warnings(&self) -> usize {
        self.warnings.total()
    }

    /// Get total info count across all info types.
    pub fn total_info(&self) -> usize {
        self.info.total()
    }
}
