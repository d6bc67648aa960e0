//! Server HTTP handlers.

mod analyze;
mod metrics;

pub use analyze::analyze_handler;
pub use metrics::metrics_handler;
