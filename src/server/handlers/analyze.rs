//! Analysis handler.

use std::sync::atomic::Ordering;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AnalyzeRequest, ErrorBody, ServerState};
use crate::error_handling::AnalysisError;

/// `POST /seo-analysis`: `{"url": "..."}` in, `AnalysisReport` out.
///
/// Malformed bodies and analysis errors are answered with `{"error": "..."}`
/// and the status mapped from the error class.
pub async fn analyze_handler(
    State(state): State<ServerState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            log::debug!("Rejected request body: {}", rejection.body_text());
            state.failed.fetch_add(1, Ordering::SeqCst);
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    log::info!("Received analysis request for {}", request.url);
    match state.engine.analyze_url(&request.url).await {
        Ok(report) => {
            state.completed.fetch_add(1, Ordering::SeqCst);
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            state.failed.fetch_add(1, Ordering::SeqCst);
            error_response(status_for(&e), e.to_string())
        }
    }
}

fn status_for(error: &AnalysisError) -> StatusCode {
    StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&AnalysisError::InvalidUrl("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AnalysisError::from_status("https://example.com/", 502)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AnalysisError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
