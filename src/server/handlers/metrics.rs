//! Prometheus metrics handler.

use std::fmt::Write;
use std::sync::atomic::Ordering;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strum::IntoEnumIterator;

use super::super::types::ServerState;
use crate::error_handling::{ErrorType, InfoType, ProcessingStats};

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<ServerState>) -> Response {
    let completed = state.completed.load(Ordering::SeqCst);
    let failed = state.failed.load(Ordering::SeqCst);
    let uptime = state.start_time.elapsed().as_secs_f64();
    let stats = state.engine.stats();

    let body = render_metrics(completed, failed, uptime, &stats);
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}

pub(crate) fn render_metrics(
    completed: usize,
    failed: usize,
    uptime_seconds: f64,
    stats: &ProcessingStats,
) -> String {
    let mut metrics = format!(
        r#"# HELP seo_analyzer_analyses_completed Analysis requests answered with a report
# TYPE seo_analyzer_analyses_completed counter
seo_analyzer_analyses_completed {}

# HELP seo_analyzer_analyses_failed Analysis requests answered with an error
# TYPE seo_analyzer_analyses_failed counter
seo_analyzer_analyses_failed {}

# HELP seo_analyzer_uptime_seconds Seconds since the server started
# TYPE seo_analyzer_uptime_seconds gauge
seo_analyzer_uptime_seconds {:.3}

# HELP seo_analyzer_documents_analyzed Documents that went through the full pipeline
# TYPE seo_analyzer_documents_analyzed counter
seo_analyzer_documents_analyzed {}

# HELP seo_analyzer_warnings_total Missing SEO essentials seen on analyzed pages
# TYPE seo_analyzer_warnings_total counter
seo_analyzer_warnings_total {}

# HELP seo_analyzer_errors Errors by type
# TYPE seo_analyzer_errors counter
"#,
        completed,
        failed,
        uptime_seconds,
        stats.get_info_count(InfoType::AnalysisCompleted),
        stats.total_warnings(),
    );
    for error_type in ErrorType::iter() {
        // writing to a String cannot fail
        let _ = writeln!(
            metrics,
            "seo_analyzer_errors{{type=\"{}\"}} {}",
            error_type.label(),
            stats.get_error_count(error_type)
        );
    }
    metrics
}
