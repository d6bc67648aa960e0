//! Analytics and tracking tool detection.
//!
//! Tools are recognized two ways: by tracking IDs inside inline script calls
//! (`gtag('config', ...)`, `fbq('init', ...)`) and by loader signatures in the
//! page source or script URLs. Each provider is reported once; the first ID
//! seen for it is kept.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const GOOGLE_ANALYTICS: &str = "Google Analytics";
pub const GOOGLE_ANALYTICS_4: &str = "Google Analytics 4";
pub const GOOGLE_TAG_MANAGER: &str = "Google Tag Manager";
pub const FACEBOOK_PIXEL: &str = "Facebook Pixel";
pub const NAVER_ANALYTICS: &str = "Naver Analytics";
pub const KAKAO_PIXEL: &str = "Kakao Pixel";

/// One detected analytics/tracking tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsTool {
    /// Provider name, e.g. "Google Analytics 4" or "Naver Analytics"
    pub provider: String,
    /// Tracking ID when one could be read from the markup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

fn compile_regex(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static GA_UA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r#"(?i)ga\s*\(\s*['"]create['"]\s*,\s*['"](UA-\d+-\d+)['"]"#,
        "GA_UA_PATTERN",
    )
});
static GA4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r#"(?i)(?:gtag\s*\(\s*['"]config['"]\s*,\s*['"]|gtag/js\?id=)(G-[A-Z0-9]+)"#,
        "GA4_PATTERN",
    )
});
static GTM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r#"\b(GTM-[A-Z0-9]{4,})\b"#, "GTM_PATTERN"));
static FB_PIXEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r#"(?i)fbq\s*\(\s*['"]init['"]\s*,\s*['"](\d+)['"]"#,
        "FB_PIXEL_PATTERN",
    )
});
static NAVER_WCS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r#"(?i)wcs_add\s*\[\s*['"]wa['"]\s*\]\s*=\s*['"]([a-z0-9]+)['"]"#,
        "NAVER_WCS_PATTERN",
    )
});
static KAKAO_PIXEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r#"(?i)kakaoPixel\s*\(\s*['"](\d+)['"]\s*\)"#,
        "KAKAO_PIXEL_PATTERN",
    )
});

/// Providers that expose a tracking ID through a capture group.
static ID_PATTERNS: LazyLock<Vec<(&'static LazyLock<Regex>, &'static str)>> = LazyLock::new(|| {
    vec![
        (&GA_UA_PATTERN, GOOGLE_ANALYTICS),
        (&GA4_PATTERN, GOOGLE_ANALYTICS_4),
        (&GTM_PATTERN, GOOGLE_TAG_MANAGER),
        (&FB_PIXEL_PATTERN, FACEBOOK_PIXEL),
        (&NAVER_WCS_PATTERN, NAVER_ANALYTICS),
        (&KAKAO_PIXEL_PATTERN, KAKAO_PIXEL),
    ]
});

/// Loader signatures (lowercase) matched against script URLs and page source.
const SIGNATURES: &[(&str, &str)] = &[
    ("google-analytics.com/analytics.js", GOOGLE_ANALYTICS),
    ("google-analytics.com/ga.js", GOOGLE_ANALYTICS),
    ("googletagmanager.com/gtag/js", GOOGLE_ANALYTICS_4),
    ("googletagmanager.com/gtm.js", GOOGLE_TAG_MANAGER),
    ("connect.facebook.net", FACEBOOK_PIXEL),
    ("wcs.naver.net/wcslog.js", NAVER_ANALYTICS),
    ("t1.daumcdn.net/kas/static/kp.js", KAKAO_PIXEL),
    ("static.hotjar.com", "Hotjar"),
    ("clarity.ms/tag", "Microsoft Clarity"),
    ("mc.yandex.ru/metrika", "Yandex Metrica"),
    ("cdn.amplitude.com", "Amplitude"),
    ("cdn.segment.com/analytics.js", "Segment"),
    ("cdn.mxpnl.com", "Mixpanel"),
];

/// Detects analytics tooling from the raw page source and external script URLs.
///
/// ID-bearing calls are scanned first so a provider found both ways keeps its ID.
pub fn detect_analytics(html: &str, script_sources: &[String]) -> Vec<AnalyticsTool> {
    let mut tools = Vec::new();
    let mut seen = HashSet::new();

    for (pattern, provider) in ID_PATTERNS.iter() {
        if let Some(id) = pattern.captures(html).and_then(|caps| caps.get(1)) {
            if seen.insert(*provider) {
                tools.push(AnalyticsTool {
                    provider: provider.to_string(),
                    id: Some(id.as_str().to_string()),
                });
            }
        }
    }

    let lowered = html.to_ascii_lowercase();
    for (signature, provider) in SIGNATURES {
        let found = lowered.contains(signature)
            || script_sources
                .iter()
                .any(|src| src.to_ascii_lowercase().contains(signature));
        if found && seen.insert(*provider) {
            tools.push(AnalyticsTool {
                provider: provider.to_string(),
                id: None,
            });
        }
    }

    tools
}

#[cfg(test)]
mod tests {
    use super::*;

    fn providers(tools: &[AnalyticsTool]) -> Vec<&str> {
        tools.iter().map(|t| t.provider.as_str()).collect()
    }

    #[test]
    fn test_detect_ga4_with_id() {
        let html = r#"
            <script async src="https://www.googletagmanager.com/gtag/js?id=G-ABC123XYZ"></script>
            <script>gtag('config', 'G-ABC123XYZ');</script>
        "#;
        let tools = detect_analytics(html, &[]);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].provider, GOOGLE_ANALYTICS_4);
        assert_eq!(tools[0].id.as_deref(), Some("G-ABC123XYZ"));
    }

    #[test]
    fn test_detect_universal_analytics_and_pixel() {
        let html = r#"<script>
            ga('create', 'UA-12345-1', 'auto');
            fbq("init", "987654321");
        </script>"#;
        let tools = detect_analytics(html, &[]);
        assert_eq!(providers(&tools), vec![GOOGLE_ANALYTICS, FACEBOOK_PIXEL]);
        assert_eq!(tools[1].id.as_deref(), Some("987654321"));
    }

    #[test]
    fn test_detect_naver_analytics() {
        let html = r#"
            <script type="text/javascript" src="//wcs.naver.net/wcslog.js"></script>
            <script>if(!wcs_add) var wcs_add = {}; wcs_add["wa"] = "abc123def";</script>
        "#;
        let tools = detect_analytics(html, &[]);
        assert_eq!(providers(&tools), vec![NAVER_ANALYTICS]);
        assert_eq!(tools[0].id.as_deref(), Some("abc123def"));
    }

    #[test]
    fn test_detect_from_script_sources_only() {
        let sources = vec!["https://static.hotjar.com/c/hotjar-1.js".to_string()];
        let tools = detect_analytics("<html></html>", &sources);
        assert_eq!(providers(&tools), vec!["Hotjar"]);
        assert!(tools[0].id.is_none());
    }

    #[test]
    fn test_gtm_id() {
        let html = r#"<script>(function(w,d,s,l,i){})(window,document,'script','dataLayer','GTM-K9X2ZQ');</script>"#;
        let tools = detect_analytics(html, &[]);
        assert_eq!(tools[0].provider, GOOGLE_TAG_MANAGER);
        assert_eq!(tools[0].id.as_deref(), Some("GTM-K9X2ZQ"));
    }

    #[test]
    fn test_no_analytics() {
        assert!(detect_analytics("<html><body>plain</body></html>", &[]).is_empty());
    }
}
