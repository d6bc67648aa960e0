//! Script, stylesheet and embedded resource inventory.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{has_token, selector};

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("script"));
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("link[rel]"));
static STYLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("style"));
static PLUGIN_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("object, embed, applet"));
static SUBRESOURCE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    selector("script[src], img[src], iframe[src], video[src], audio[src], source[src], embed[src], link[rel][href]")
});

const KAKAO_SDK_SIGNATURES: &[&str] = &["developers.kakao.com/sdk", "kakao_js_sdk", "kakao.min.js"];

/// Resources the page pulls in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFacts {
    /// External scripts (`<script src>`)
    pub scripts: usize,
    pub inline_scripts: usize,
    /// `<link rel="stylesheet">` elements
    pub stylesheets: usize,
    /// `src` of every external script, in document order
    pub script_sources: Vec<String>,
    /// `http://` subresources referenced from an `https` page
    pub mixed_content: Vec<String>,
    /// Media queries in `<style>` blocks or `<link media>`
    pub has_media_queries: bool,
    /// `<object>`, `<embed>` and `<applet>` elements
    pub plugins: usize,
    pub touch_icon: bool,
    pub kakao_sdk: bool,
}

pub(crate) fn extract_resources(document: &Html, is_https: bool) -> ResourceFacts {
    let mut facts = ResourceFacts::default();

    for script in document.select(&SCRIPT_SELECTOR) {
        match script.value().attr("src").map(str::trim) {
            Some(src) if !src.is_empty() => {
                facts.scripts += 1;
                facts.script_sources.push(src.to_string());
            }
            _ => facts.inline_scripts += 1,
        }
    }
    facts.kakao_sdk = facts.script_sources.iter().any(|src| {
        let src = src.to_ascii_lowercase();
        KAKAO_SDK_SIGNATURES.iter().any(|sig| src.contains(sig))
    });

    for link in document.select(&LINK_SELECTOR) {
        let attrs = link.value();
        let rel = attrs.attr("rel").unwrap_or_default();
        if has_token(rel, "stylesheet") {
            facts.stylesheets += 1;
            let media = attrs.attr("media").unwrap_or("all").trim();
            if !media.eq_ignore_ascii_case("all") && !media.eq_ignore_ascii_case("screen") {
                facts.has_media_queries = true;
            }
        }
        if has_token(rel, "apple-touch-icon") || has_token(rel, "apple-touch-icon-precomposed") {
            facts.touch_icon = true;
        }
    }

    if !facts.has_media_queries {
        facts.has_media_queries = document
            .select(&STYLE_SELECTOR)
            .any(|style| style.text().any(|t| t.contains("@media")));
    }

    facts.plugins = document.select(&PLUGIN_SELECTOR).count();

    if is_https {
        facts.mixed_content = document
            .select(&SUBRESOURCE_SELECTOR)
            .filter_map(|el| {
                let attrs = el.value();
                if attrs.name() == "link" {
                    // Only links the browser loads as subresources
                    let rel = attrs.attr("rel").unwrap_or_default();
                    if !has_token(rel, "stylesheet") && !has_token(rel, "preload") {
                        return None;
                    }
                    return attrs.attr("href");
                }
                attrs.attr("src")
            })
            .map(str::trim)
            .filter(|url| {
                url.get(..7)
                    .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http://"))
            })
            .map(str::to_string)
            .collect();
    }

    facts
}
