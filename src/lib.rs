//! seo_analyzer library: fetch a page, score its SEO signals, suggest fixes
//!
//! The pipeline is one-way: the page is fetched (plus best-effort
//! `robots.txt`/`sitemap.xml` probes), parsed once into `ExtractedFacts`,
//! handed to thirteen independent analyzers that run in parallel, rolled up
//! into five weighted categories and an overall score, and finally run through
//! a rule table that produces prioritized improvement tips.
//!
//! # Example
//!
//! ```no_run
//! use seo_analyzer::{Config, SeoEngine};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = SeoEngine::new(&Config::default())?;
//! let report = engine.analyze_url("example.com").await?;
//! println!("{}: {}/100", report.url, report.overall_score);
//! for tip in &report.improvements {
//!     println!("[{:?}] {}", tip.priority, tip.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Extraction and the analyzers run on
//! the blocking thread pool.

pub mod analysis;
pub mod config;
mod engine;
pub mod error_handling;
pub mod fetch;
pub mod improvements;
pub mod initialization;
pub mod parse;
mod report;
pub mod scoring;
pub mod server;

// Re-export public API
pub use analysis::{AnalyzerResults, SubScore, VitalsEstimate, VitalsEstimator};
pub use config::{Config, LogFormat, LogLevel};
pub use engine::SeoEngine;
pub use error_handling::{AnalysisError, ProcessingStats};
pub use fetch::RawDocument;
pub use improvements::{generate_improvements, ImprovementTip};
pub use parse::{extract_facts, ExtractedFacts};
pub use report::{AnalysisReport, Grade};
pub use scoring::WeightedCategory;
