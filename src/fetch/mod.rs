//! Page fetching.
//!
//! One GET for the analyzed page plus two best-effort HEAD probes against the
//! same origin (`/robots.txt`, `/sitemap.xml`). The three requests run
//! concurrently; only the GET can fail the analysis.

mod normalize;
mod probe;
mod request;
mod types;

pub use normalize::validate_and_normalize_url;
pub use probe::probe_exists;
pub use request::fetch_document;
pub use types::{ProbeResults, RawDocument};
