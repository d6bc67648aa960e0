//! Core Web Vitals estimation.
//!
//! Pages are never rendered, so LCP, FID and CLS are estimated: LCP from the
//! fetch latency, FID and CLS drawn from realistic ranges. The random part
//! sits behind `VitalsEstimator` so callers can pin it with a seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{
    CLS_ESTIMATE_RANGE, FID_ESTIMATE_RANGE_MS, LCP_ESTIMATE_CAP_MS, LCP_FETCH_FACTOR,
};

/// Estimated Core Web Vitals for one analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VitalsEstimate {
    pub lcp_ms: f64,
    pub fid_ms: f64,
    pub cls: f64,
    /// How the values were produced, reported to callers
    pub method: &'static str,
}

impl VitalsEstimate {
    /// Builds an estimate from a fetch latency and the random FID/CLS components.
    pub fn from_latency(fetch_latency_ms: u64, fid_ms: f64, cls: f64, method: &'static str) -> Self {
        VitalsEstimate {
            lcp_ms: (fetch_latency_ms as f64 * LCP_FETCH_FACTOR).min(LCP_ESTIMATE_CAP_MS),
            fid_ms: (fid_ms * 10.0).round() / 10.0,
            cls: (cls * 1000.0).round() / 1000.0,
            method,
        }
    }
}

/// Source of Core Web Vitals estimates.
pub trait VitalsEstimator: Send + Sync {
    fn estimate(&self, fetch_latency_ms: u64) -> VitalsEstimate;
}

/// Draws FID and CLS from the thread-local RNG. Output varies between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEstimator;

impl VitalsEstimator for RandomEstimator {
    fn estimate(&self, fetch_latency_ms: u64) -> VitalsEstimate {
        let mut rng = rand::rng();
        VitalsEstimate::from_latency(
            fetch_latency_ms,
            rng.random_range(FID_ESTIMATE_RANGE_MS),
            rng.random_range(CLS_ESTIMATE_RANGE),
            "lcp from fetch latency; fid and cls sampled at random",
        )
    }
}

/// Reproducible estimator: every call reseeds, so the same latency always
/// yields the same estimate.
#[derive(Debug, Clone, Copy)]
pub struct SeededEstimator {
    seed: u64,
}

impl SeededEstimator {
    pub fn new(seed: u64) -> Self {
        SeededEstimator { seed }
    }
}

impl VitalsEstimator for SeededEstimator {
    fn estimate(&self, fetch_latency_ms: u64) -> VitalsEstimate {
        let mut rng = StdRng::seed_from_u64(self.seed);
        VitalsEstimate::from_latency(
            fetch_latency_ms,
            rng.random_range(FID_ESTIMATE_RANGE_MS),
            rng.random_range(CLS_ESTIMATE_RANGE),
            "lcp from fetch latency; fid and cls sampled from a seeded generator",
        )
    }
}
