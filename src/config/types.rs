//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    ANALYZER_COUNT, DEFAULT_BIND_ADDRESS, DEFAULT_PORT, DEFAULT_USER_AGENT, FETCH_TIMEOUT,
    MAX_TIMEOUT_SECS, PROBE_TIMEOUT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Engine and server configuration.
///
/// Parsed from the command line by the binary, or constructed programmatically
/// through `Default` when the crate is used as a library.
///
/// # Examples
///
/// ```no_run
/// use seo_analyzer::Config;
///
/// let config = Config {
///     timeout_seconds: 10,
///     vitals_seed: Some(7),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "seo_analyzer", version, about)]
pub struct Config {
    /// Analyze this URL once, print the JSON report and exit (server mode if omitted)
    pub url: Option<String>,

    /// Address the HTTP server binds to
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    /// Port the HTTP server listens on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Hard timeout of the page fetch in seconds
    #[arg(
        long,
        default_value_t = FETCH_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub timeout_seconds: u64,

    /// Timeout of each robots.txt / sitemap.xml probe in seconds
    #[arg(
        long,
        default_value_t = PROBE_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub probe_timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Maximum number of analyzers running at the same time
    #[arg(
        long,
        default_value_t = ANALYZER_COUNT,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_parallel_analyzers: usize,

    /// Seed for the Core Web Vitals estimator (reproducible reports)
    #[arg(long)]
    pub vitals_seed: Option<u64>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Pretty-print the JSON report in one-shot mode
    #[arg(long)]
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            bind: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            timeout_seconds: FETCH_TIMEOUT.as_secs(),
            probe_timeout_seconds: PROBE_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_parallel_analyzers: ANALYZER_COUNT,
            vitals_seed: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            pretty: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_cli_defaults_match_programmatic_defaults() {
        let parsed = Config::parse_from(["seo_analyzer"]);
        let default = Config::default();
        assert_eq!(parsed.url, default.url);
        assert_eq!(parsed.bind, default.bind);
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.timeout_seconds, default.timeout_seconds);
        assert_eq!(parsed.probe_timeout_seconds, default.probe_timeout_seconds);
        assert_eq!(parsed.user_agent, default.user_agent);
        assert_eq!(parsed.max_parallel_analyzers, default.max_parallel_analyzers);
        assert_eq!(parsed.vitals_seed, None);
        assert!(!parsed.pretty);
    }

    #[test]
    fn test_cli_one_shot_mode() {
        let parsed = Config::parse_from([
            "seo_analyzer",
            "example.com",
            "--vitals-seed",
            "42",
            "--log-format",
            "json",
            "--pretty",
        ]);
        assert_eq!(parsed.url.as_deref(), Some("example.com"));
        assert_eq!(parsed.vitals_seed, Some(42));
        assert!(matches!(parsed.log_format, LogFormat::Json));
        assert!(parsed.pretty);
    }

    #[test]
    fn test_default_timeouts_are_bounded() {
        let config = Config::default();
        // primary fetch 10-15s, probes 2-3s
        assert!((10..=15).contains(&config.timeout_seconds));
        assert!((2..=3).contains(&config.probe_timeout_seconds));
    }

    #[test]
    fn test_cli_rejects_zero_and_oversized_limits() {
        for args in [
            ["seo_analyzer", "--timeout-seconds", "0"],
            ["seo_analyzer", "--probe-timeout-seconds", "0"],
            ["seo_analyzer", "--timeout-seconds", "301"],
            ["seo_analyzer", "--max-parallel-analyzers", "0"],
        ] {
            assert!(Config::try_parse_from(args).is_err(), "{:?} accepted", args);
        }
        let parsed = Config::try_parse_from(["seo_analyzer", "--timeout-seconds", "1"]).unwrap();
        assert_eq!(parsed.timeout_seconds, 1);
    }
}
