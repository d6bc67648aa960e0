//! Social profile link extraction.
//!
//! Finds anchors pointing at known social platforms and records the platform,
//! absolute URL and the handle captured from the path.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;

use super::selector;

const FACEBOOK_URL_PATTERN: &str = r"^(?:https?:)?//(?:www\.|m\.)?facebook\.com/([^/?#]+)";
const TWITTER_URL_PATTERN: &str = r"^(?:https?:)?//(?:www\.|mobile\.)?(?:twitter\.com|x\.com)/([^/?#]+)";
const INSTAGRAM_URL_PATTERN: &str = r"^(?:https?:)?//(?:www\.)?instagram\.com/([^/?#]+)";
const LINKEDIN_URL_PATTERN: &str = r"^(?:https?:)?//(?:[a-z]{2,3}\.|www\.)?linkedin\.com/(?:company|in|school)/([^/?#]+)";
const YOUTUBE_URL_PATTERN: &str = r"^(?:https?:)?//(?:www\.|m\.)?youtube\.com/(?:channel/|c/|user/)?(@?[^/?#]+)";
const TIKTOK_URL_PATTERN: &str = r"^(?:https?:)?//(?:www\.)?tiktok\.com/@([^/?#]+)";
const PINTEREST_URL_PATTERN: &str = r"^(?:https?:)?//(?:www\.|[a-z]{2}\.)?pinterest\.(?:com|co\.kr|co\.uk)/([^/?#]+)";
const GITHUB_URL_PATTERN: &str = r"^(?:https?:)?//(?:www\.)?github\.com/([^/?#]+)";
const NAVER_BLOG_URL_PATTERN: &str = r"^(?:https?:)?//(?:m\.)?blog\.naver\.com/([^/?#]+)";
const KAKAO_CHANNEL_URL_PATTERN: &str = r"^(?:https?:)?//pf\.kakao\.com/([^/?#]+)";

/// Social media link information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaLink {
    pub platform: String,
    pub url: String,
    /// Username, handle, or ID extracted from URL
    pub identifier: Option<String>,
}

fn compile_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}': {}. This is a programming error.",
            pattern, e
        )
    })
}

/// Platform table in match order.
static PLATFORMS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (FACEBOOK_URL_PATTERN, "Facebook"),
        (TWITTER_URL_PATTERN, "Twitter"),
        (INSTAGRAM_URL_PATTERN, "Instagram"),
        (LINKEDIN_URL_PATTERN, "LinkedIn"),
        (YOUTUBE_URL_PATTERN, "YouTube"),
        (TIKTOK_URL_PATTERN, "TikTok"),
        (PINTEREST_URL_PATTERN, "Pinterest"),
        (GITHUB_URL_PATTERN, "GitHub"),
        (NAVER_BLOG_URL_PATTERN, "Naver Blog"),
        (KAKAO_CHANNEL_URL_PATTERN, "KakaoTalk"),
    ]
    .into_iter()
    .map(|(pattern, name)| (compile_regex(pattern), name))
    .collect()
});

// Share/intent endpoints are not profiles
const NON_PROFILE_SEGMENTS: &[&str] = &["sharer", "sharer.php", "share", "intent", "home", "hashtag"];

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

/// Extracts social profile links from an HTML document.
///
/// Relative links are ignored. Protocol-relative links are upgraded to
/// `https:`. Each distinct URL is reported once, in document order.
pub fn extract_social_media_links(document: &Html) -> Vec<SocialMediaLink> {
    let mut links = Vec::new();
    let mut seen_urls = HashSet::new();

    for element in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        if seen_urls.contains(href) {
            continue;
        }

        for (re, platform_name) in PLATFORMS.iter() {
            let Some(caps) = re.captures(href) else {
                continue;
            };
            let identifier = caps.get(1).map(|m| m.as_str().to_string());
            if identifier
                .as_deref()
                .is_some_and(|id| NON_PROFILE_SEGMENTS.contains(&id))
            {
                break;
            }
            let full_url = if href.starts_with("//") {
                format!("https:{}", href)
            } else {
                href.to_string()
            };

            seen_urls.insert(href.to_string());
            links.push(SocialMediaLink {
                platform: platform_name.to_string(),
                url: full_url,
                identifier,
            });
            break;
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_social_media_links_profiles() {
        let html = r#"
            <html><body>
                <a href="https://www.facebook.com/acme">Facebook</a>
                <a href="https://x.com/acme_kr">X</a>
                <a href="https://www.linkedin.com/company/acme-corp">LinkedIn</a>
                <a href="https://www.youtube.com/@acmetv">YouTube</a>
            </body></html>
        "#;
        let links = extract_social_media_links(&Html::parse_document(html));
        let platforms: Vec<_> = links.iter().map(|l| l.platform.as_str()).collect();
        assert_eq!(platforms, vec!["Facebook", "Twitter", "LinkedIn", "YouTube"]);
        assert_eq!(links[1].identifier.as_deref(), Some("acme_kr"));
        assert_eq!(links[3].identifier.as_deref(), Some("@acmetv"));
    }

    #[test]
    fn test_extract_korean_platforms() {
        let html = r#"
            <a href="https://blog.naver.com/acmeblog">블로그</a>
            <a href="https://pf.kakao.com/_xabcd">카카오톡 채널</a>
        "#;
        let links = extract_social_media_links(&Html::parse_document(html));
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].platform, "Naver Blog");
        assert_eq!(links[0].identifier.as_deref(), Some("acmeblog"));
        assert_eq!(links[1].platform, "KakaoTalk");
    }

    #[test]
    fn test_duplicates_and_share_links_skipped() {
        let html = r#"
            <a href="https://instagram.com/acme">1</a>
            <a href="https://instagram.com/acme">2</a>
            <a href="https://www.facebook.com/sharer/sharer.php?u=x">share</a>
            <a href="/about">About</a>
        "#;
        let links = extract_social_media_links(&Html::parse_document(html));
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].platform, "Instagram");
    }

    #[test]
    fn test_protocol_relative_link_upgraded() {
        let html = r#"<a href="//github.com/acme">GitHub</a>"#;
        let links = extract_social_media_links(&Html::parse_document(html));
        assert_eq!(links[0].url, "https://github.com/acme");
    }

    #[test]
    fn test_lookalike_domain_not_matched() {
        let html = r#"<a href="https://notfacebook.com/acme">x</a><a href="https://example.com/?r=https://facebook.com/acme">y</a>"#;
        assert!(extract_social_media_links(&Html::parse_document(html)).is_empty());
    }
}
