//! Server request, response and state types.

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::engine::SeoEngine;

/// Shared state for the handlers.
#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<SeoEngine>,
    pub completed: Arc<AtomicUsize>,
    pub failed: Arc<AtomicUsize>,
    pub start_time: Arc<Instant>,
}

impl ServerState {
    pub fn new(engine: Arc<SeoEngine>) -> Self {
        ServerState {
            engine,
            completed: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// Body of `POST /seo-analysis`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Body of every non-200 response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
