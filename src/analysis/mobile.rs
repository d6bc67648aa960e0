//! Mobile friendliness from static markup.

use serde::Serialize;

use super::{check, weighted, SubScore};
use crate::parse::ExtractedFacts;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileReport {
    pub score: u8,
    pub viewport: ViewportReport,
    /// Responsive images or CSS media queries
    pub responsive: SubScore,
    pub touch_icon: SubScore,
    pub theme_color: SubScore,
    /// Absence of `<object>`, `<embed>` and `<applet>`
    pub no_plugins: SubScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts) -> MobileReport {
    let viewport = score_viewport(facts.meta.viewport.as_deref());

    let responsive_signals = facts.images.with_srcset > 0 || facts.resources.has_media_queries;
    let responsive = check(responsive_signals, "No responsive images or media queries found");
    let touch_icon = check(facts.resources.touch_icon, "No apple-touch-icon declared");
    let theme_color = check(facts.meta.theme_color.is_some(), "No theme-color meta tag");

    let plugins = facts.resources.plugins;
    let no_plugins = if plugins == 0 {
        SubScore::new(false, 100.0)
    } else {
        SubScore::new(true, 0.0).with_issue(format!(
            "{} plugin elements (object/embed/applet) will not run on mobile",
            plugins
        ))
    };

    MobileReport {
        score: weighted(&[
            (viewport.result.score, 0.4),
            (responsive.score, 0.2),
            (touch_icon.score, 0.15),
            (theme_color.score, 0.1),
            (no_plugins.score, 0.15),
        ]),
        viewport,
        responsive,
        touch_icon,
        theme_color,
        no_plugins,
        error: None,
    }
}

/// `width=device-width` scores 100, any other viewport 50, none 0.
fn score_viewport(content: Option<&str>) -> ViewportReport {
    let Some(content) = content else {
        return ViewportReport {
            result: SubScore::absent().with_issue("No viewport meta tag"),
            content: None,
        };
    };

    let normalized: String = content
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    let mut result = if normalized.contains("width=device-width") {
        SubScore::new(true, 100.0)
    } else {
        SubScore::new(true, 50.0).with_issue("Viewport does not set width=device-width")
    };
    if disables_zoom(&normalized) {
        result.issues.push("Viewport disables zooming".to_string());
    }
    ViewportReport {
        result,
        content: Some(content.to_string()),
    }
}

/// `user-scalable=no|0` or a `maximum-scale` of at most 1.
fn disables_zoom(normalized: &str) -> bool {
    normalized
        .split([',', ';'])
        .filter_map(|directive| directive.split_once('='))
        .any(|(key, value)| match key {
            "user-scalable" => value == "no" || value == "0",
            "maximum-scale" => value.parse::<f64>().is_ok_and(|scale| scale <= 1.0),
            _ => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RawDocument;
    use crate::parse::extract_facts;

    fn report(html: &str) -> MobileReport {
        analyze(&extract_facts(&RawDocument::from_html("https://example.com/", html)))
    }

    #[test]
    fn test_fully_mobile_ready() {
        let html = r##"<html><head>
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <meta name="theme-color" content="#123456">
            <link rel="apple-touch-icon" href="/icon.png">
            <style>@media (max-width: 600px) { main { padding: 0 } }</style>
        </head><body></body></html>"##;
        let r = report(html);
        assert_eq!(r.score, 100);
        assert!(r.viewport.result.issues.is_empty());
    }

    #[test]
    fn test_viewport_steps() {
        assert_eq!(score_viewport(None).result.score, 0);
        assert_eq!(score_viewport(Some("initial-scale=1")).result.score, 50);
        assert_eq!(score_viewport(Some("width = device-width")).result.score, 100);
        let locked = score_viewport(Some("width=device-width, user-scalable=no"));
        assert_eq!(locked.result.score, 100);
        assert_eq!(locked.result.issues, vec!["Viewport disables zooming"]);
    }

    #[test]
    fn test_zoom_lock_detection() {
        for content in [
            "width=device-width, maximum-scale=1",
            "width=device-width, maximum-scale=1.0",
            "width=device-width,maximum-scale=1.00,initial-scale=1",
            "width=device-width; maximum-scale=0.5",
            "width=device-width, user-scalable=0",
        ] {
            let viewport = score_viewport(Some(content));
            assert_eq!(viewport.result.issues, vec!["Viewport disables zooming"], "{}", content);
        }
        for content in [
            "width=device-width, initial-scale=1",
            "width=device-width, maximum-scale=5",
            "width=device-width, maximum-scale=1.5, user-scalable=yes",
        ] {
            assert!(score_viewport(Some(content)).result.issues.is_empty(), "{}", content);
        }
    }

    #[test]
    fn test_bare_page_only_scores_plugin_absence() {
        let r = report("<html><body><p>text</p></body></html>");
        // only the no-plugins term (15%) is earned
        assert_eq!(r.score, 15);
        let with_plugin = report(r#"<html><body><embed src="a.swf"></body></html>"#);
        assert_eq!(with_plugin.score, 0);
        assert!(with_plugin.no_plugins.exists);
    }
}
