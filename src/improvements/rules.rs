//! The rule table.
//!
//! Each rule pairs a predicate over the facts and analyzer results with a tip
//! template. Rules are independent of each other; order here only breaks
//! ties after sorting.

use super::types::{Difficulty, Priority, TipCategory};
use crate::analysis::{AnalyzerResults, ReadingLevel};
use crate::config::{
    CLS_GOOD, DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, FID_GOOD_MS, LCP_GOOD_MS,
    MIN_CONTENT_WORDS, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
use crate::parse::{ExtractedFacts, NAVER_ANALYTICS};

/// What a rule may look at.
pub struct RuleContext<'a> {
    pub facts: &'a ExtractedFacts,
    pub results: &'a AnalyzerResults,
}

/// Predicate plus tip template.
pub struct Rule {
    pub id: &'static str,
    pub category: TipCategory,
    pub title: &'static str,
    pub priority: Priority,
    pub impact: u8,
    pub difficulty: Difficulty,
    pub applies: fn(&RuleContext<'_>) -> bool,
    pub describe: fn(&RuleContext<'_>) -> String,
    pub code: Option<fn(&RuleContext<'_>) -> String>,
}

pub static RULES: &[Rule] = &[
    // Metadata
    Rule {
        id: "missing-title",
        category: TipCategory::Metadata,
        title: "Add a title tag",
        priority: Priority::High,
        impact: 5,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.title.is_none(),
        describe: |_| {
            format!(
                "The page has no <title>. Search engines show it as the headline of the result; write {}-{} characters leading with the main keyword.",
                TITLE_MIN_CHARS, TITLE_MAX_CHARS
            )
        },
        code: Some(|_| "<title>Primary keyword - Secondary keyword | Brand</title>".to_string()),
    },
    Rule {
        id: "title-length",
        category: TipCategory::Metadata,
        title: "Adjust the title length",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Easy,
        applies: |c| {
            let title = &c.results.metadata.title;
            title.result.exists && !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title.length)
        },
        describe: |c| {
            format!(
                "The title is {} characters long. Titles between {} and {} characters display in full and carry enough context.",
                c.results.metadata.title.length, TITLE_MIN_CHARS, TITLE_MAX_CHARS
            )
        },
        code: None,
    },
    Rule {
        id: "title-keyword",
        category: TipCategory::Metadata,
        title: "Put a target keyword in the title",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| {
            let title = &c.results.metadata.title;
            title.result.exists && !title.has_keyword && !c.facts.content.top_keywords.is_empty()
        },
        describe: |c| {
            let keywords: Vec<&str> = c
                .facts
                .content
                .top_keywords
                .iter()
                .take(3)
                .map(|k| k.word.as_str())
                .collect();
            format!(
                "The title mentions none of the page's main keywords ({}).",
                keywords.join(", ")
            )
        },
        code: None,
    },
    Rule {
        id: "missing-description",
        category: TipCategory::Metadata,
        title: "Add a meta description",
        priority: Priority::High,
        impact: 4,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.meta_description.is_none(),
        describe: |_| {
            format!(
                "Without a meta description search engines pick an arbitrary snippet. Summarize the page in {}-{} characters.",
                DESCRIPTION_MIN_CHARS, DESCRIPTION_MAX_CHARS
            )
        },
        code: Some(|_| {
            r#"<meta name="description" content="A concise summary of the page that invites the click.">"#
                .to_string()
        }),
    },
    Rule {
        id: "description-length",
        category: TipCategory::Metadata,
        title: "Adjust the meta description length",
        priority: Priority::Medium,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| {
            let description = &c.results.metadata.description;
            description.result.exists
                && !(DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&description.length)
        },
        describe: |c| {
            format!(
                "The meta description is {} characters long; {}-{} characters avoids truncation.",
                c.results.metadata.description.length, DESCRIPTION_MIN_CHARS, DESCRIPTION_MAX_CHARS
            )
        },
        code: None,
    },
    // Headings
    Rule {
        id: "missing-h1",
        category: TipCategory::Headings,
        title: "Add an h1 heading",
        priority: Priority::High,
        impact: 4,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.headings.count(1) == 0,
        describe: |_| "The page has no <h1>. Give it one heading that states the topic.".to_string(),
        code: Some(|_| "<h1>Main topic of the page</h1>".to_string()),
    },
    Rule {
        id: "multiple-h1",
        category: TipCategory::Headings,
        title: "Use a single h1 heading",
        priority: Priority::Medium,
        impact: 4,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.headings.count(1) > 1,
        describe: |c| {
            format!(
                "The page has {} <h1> elements. Keep one and demote the rest to <h2>.",
                c.facts.headings.count(1)
            )
        },
        code: None,
    },
    Rule {
        id: "missing-h2",
        category: TipCategory::Headings,
        title: "Structure the content with h2 subheadings",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.headings.count(2) == 0 && c.facts.content.word_count > 0,
        describe: |_| "Subheadings help readers scan and help crawlers understand sections.".to_string(),
        code: None,
    },
    Rule {
        id: "skipped-heading-level",
        category: TipCategory::Headings,
        title: "Keep the heading hierarchy sequential",
        priority: Priority::Low,
        impact: 1,
        difficulty: Difficulty::Easy,
        applies: |c| !c.results.headings.issues.is_empty(),
        describe: |c| c.results.headings.issues.join("; "),
        code: None,
    },
    // Images
    Rule {
        id: "image-alt",
        category: TipCategory::Images,
        title: "Describe images with alt text",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Easy,
        applies: |c| c.results.images.missing_alt > 0,
        describe: |c| {
            format!(
                "{} of {} images have no alt attribute. Alt text is read by screen readers and used by image search.",
                c.results.images.missing_alt, c.results.images.total
            )
        },
        code: Some(|_| r#"<img src="product.jpg" alt="Short description of the image">"#.to_string()),
    },
    Rule {
        id: "image-dimensions",
        category: TipCategory::Images,
        title: "Set image width and height",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.images.without_dimensions > 0,
        describe: |c| {
            format!(
                "{} images have no explicit dimensions, which shifts the layout while they load.",
                c.facts.images.without_dimensions
            )
        },
        code: None,
    },
    // Technical
    Rule {
        id: "https",
        category: TipCategory::Technical,
        title: "Serve the site over HTTPS",
        priority: Priority::High,
        impact: 5,
        difficulty: Difficulty::Medium,
        applies: |c| !c.facts.is_https,
        describe: |_| "HTTPS is a ranking signal and browsers flag plain HTTP pages as not secure. Install a certificate and redirect HTTP to HTTPS.".to_string(),
        code: None,
    },
    Rule {
        id: "noindex",
        category: TipCategory::Technical,
        title: "Remove noindex from the robots meta tag",
        priority: Priority::High,
        impact: 5,
        difficulty: Difficulty::Easy,
        applies: |c| {
            c.facts
                .meta
                .robots
                .as_deref()
                .is_some_and(|r| r.to_ascii_lowercase().contains("noindex"))
        },
        describe: |_| "The robots meta tag tells search engines not to index this page.".to_string(),
        code: None,
    },
    Rule {
        id: "sitemap",
        category: TipCategory::Technical,
        title: "Publish a sitemap.xml",
        priority: Priority::Medium,
        impact: 4,
        difficulty: Difficulty::Easy,
        applies: |c| !c.facts.sitemap_xml,
        describe: |_| "No /sitemap.xml was found. A sitemap lists the URLs you want crawled.".to_string(),
        code: Some(|c| {
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n  <url><loc>{}</loc></url>\n</urlset>",
                c.facts.url
            )
        }),
    },
    Rule {
        id: "robots-txt",
        category: TipCategory::Technical,
        title: "Add a robots.txt file",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Easy,
        applies: |c| !c.facts.robots_txt,
        describe: |_| "No /robots.txt was found. It tells crawlers what to skip and where the sitemap is.".to_string(),
        code: Some(|c| {
            let origin = url::Url::parse(&c.facts.url)
                .map(|u| u.origin().ascii_serialization())
                .unwrap_or_default();
            format!("User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml", origin)
        }),
    },
    Rule {
        id: "canonical",
        category: TipCategory::Technical,
        title: "Declare a canonical URL",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.canonical.is_none(),
        describe: |_| "A canonical link consolidates ranking signals from duplicate URLs.".to_string(),
        code: Some(|c| format!(r#"<link rel="canonical" href="{}">"#, c.facts.url)),
    },
    Rule {
        id: "doctype",
        category: TipCategory::Technical,
        title: "Add the HTML5 doctype",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| !c.facts.has_doctype,
        describe: |_| "Without <!DOCTYPE html> browsers render in quirks mode.".to_string(),
        code: Some(|_| "<!DOCTYPE html>".to_string()),
    },
    Rule {
        id: "deprecated-tags",
        category: TipCategory::Technical,
        title: "Replace deprecated HTML elements",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Medium,
        applies: |c| !c.facts.deprecated_tags.is_empty(),
        describe: |c| {
            format!(
                "Obsolete elements in use: {}. Use CSS and semantic HTML instead.",
                c.facts.deprecated_tags.join(", ")
            )
        },
        code: None,
    },
    // Social
    Rule {
        id: "open-graph",
        category: TipCategory::Social,
        title: "Complete the Open Graph tags",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Easy,
        applies: |c| !c.results.social.open_graph.missing.is_empty(),
        describe: |c| {
            format!(
                "Missing Open Graph tags: {}. They control how shared links look on Facebook, KakaoTalk and messengers.",
                c.results.social.open_graph.missing.join(", ")
            )
        },
        code: Some(|c| {
            c.results
                .social
                .open_graph
                .missing
                .iter()
                .map(|tag| format!(r#"<meta property="{}" content="...">"#, tag))
                .collect::<Vec<_>>()
                .join("\n")
        }),
    },
    Rule {
        id: "twitter-card",
        category: TipCategory::Social,
        title: "Complete the Twitter Card tags",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| !c.results.social.twitter.missing.is_empty(),
        describe: |c| {
            format!(
                "Missing Twitter Card tags: {}.",
                c.results.social.twitter.missing.join(", ")
            )
        },
        code: Some(|c| {
            c.results
                .social
                .twitter
                .missing
                .iter()
                .map(|tag| format!(r#"<meta name="{}" content="...">"#, tag))
                .collect::<Vec<_>>()
                .join("\n")
        }),
    },
    Rule {
        id: "social-profiles",
        category: TipCategory::Social,
        title: "Link your social profiles",
        priority: Priority::Low,
        impact: 1,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.social_links.is_empty(),
        describe: |_| "No links to social profiles were found on the page.".to_string(),
        code: None,
    },
    // Analytics
    Rule {
        id: "analytics",
        category: TipCategory::Analytics,
        title: "Install an analytics tool",
        priority: Priority::Medium,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.analytics.is_empty(),
        describe: |_| "No analytics tooling was detected, so traffic and search performance cannot be measured.".to_string(),
        code: Some(|_| {
            "<script async src=\"https://www.googletagmanager.com/gtag/js?id=G-XXXXXXXXXX\"></script>\n<script>\n  window.dataLayer = window.dataLayer || [];\n  function gtag(){dataLayer.push(arguments);}\n  gtag('js', new Date());\n  gtag('config', 'G-XXXXXXXXXX');\n</script>"
                .to_string()
        }),
    },
    // Performance
    Rule {
        id: "lcp",
        category: TipCategory::Performance,
        title: "Improve Largest Contentful Paint",
        priority: Priority::High,
        impact: 4,
        difficulty: Difficulty::Hard,
        applies: |c| c.results.performance.core_web_vitals.lcp_ms > LCP_GOOD_MS,
        describe: |c| {
            format!(
                "Estimated LCP is {:.0} ms. Optimize the hero image, preload key resources and reduce server time.",
                c.results.performance.core_web_vitals.lcp_ms
            )
        },
        code: None,
    },
    Rule {
        id: "fid",
        category: TipCategory::Performance,
        title: "Reduce input delay",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Hard,
        applies: |c| c.results.performance.core_web_vitals.fid_ms > FID_GOOD_MS,
        describe: |c| {
            format!(
                "Estimated FID is {:.0} ms. Split long JavaScript tasks and defer non-critical scripts.",
                c.results.performance.core_web_vitals.fid_ms
            )
        },
        code: None,
    },
    Rule {
        id: "cls",
        category: TipCategory::Performance,
        title: "Reduce layout shift",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Medium,
        applies: |c| c.results.performance.core_web_vitals.cls > CLS_GOOD,
        describe: |c| {
            format!(
                "Estimated CLS is {:.2}. Reserve space for images, ads and embeds.",
                c.results.performance.core_web_vitals.cls
            )
        },
        code: None,
    },
    Rule {
        id: "slow-server",
        category: TipCategory::Performance,
        title: "Speed up the server response",
        priority: Priority::High,
        impact: 4,
        difficulty: Difficulty::Hard,
        applies: |c| c.facts.fetch_latency_ms > 1000,
        describe: |c| {
            format!(
                "The page took {} ms to load. Add caching or a CDN in front of the origin.",
                c.facts.fetch_latency_ms
            )
        },
        code: None,
    },
    Rule {
        id: "compression",
        category: TipCategory::Performance,
        title: "Enable response compression",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Medium,
        applies: |c| !c.results.performance.compression.result.exists,
        describe: |_| "The HTML was served without gzip or Brotli compression.".to_string(),
        code: Some(|_| "gzip on;\ngzip_types text/html text/css application/javascript;".to_string()),
    },
    Rule {
        id: "caching",
        category: TipCategory::Performance,
        title: "Set a caching policy",
        priority: Priority::Medium,
        impact: 2,
        difficulty: Difficulty::Medium,
        applies: |c| c.results.performance.caching.result.score < 100,
        describe: |c| c.results.performance.caching.result.issues.join("; "),
        code: Some(|_| "Cache-Control: public, max-age=3600\nETag: \"<content hash>\"".to_string()),
    },
    Rule {
        id: "resource-count",
        category: TipCategory::Performance,
        title: "Reduce the number of requested resources",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Medium,
        applies: |c| c.results.performance.resources.total > 60,
        describe: |c| {
            format!(
                "The page references {} scripts, stylesheets and images. Bundle, lazy-load or remove what is not needed.",
                c.results.performance.resources.total
            )
        },
        code: None,
    },
    // Mobile
    Rule {
        id: "viewport",
        category: TipCategory::Mobile,
        title: "Add a responsive viewport",
        priority: Priority::High,
        impact: 5,
        difficulty: Difficulty::Easy,
        applies: |c| c.results.mobile.viewport.result.score < 100,
        describe: |_| "Without width=device-width mobile browsers render the page zoomed out.".to_string(),
        code: Some(|_| r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#.to_string()),
    },
    Rule {
        id: "plugins",
        category: TipCategory::Mobile,
        title: "Remove plugin content",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Medium,
        applies: |c| c.facts.resources.plugins > 0,
        describe: |_| "<object>, <embed> and <applet> content does not run on mobile browsers. Use HTML5 video or images.".to_string(),
        code: None,
    },
    Rule {
        id: "responsive",
        category: TipCategory::Mobile,
        title: "Serve responsive images or media queries",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Medium,
        applies: |c| !c.results.mobile.responsive.exists,
        describe: |_| "No srcset images or CSS media queries were found.".to_string(),
        code: None,
    },
    Rule {
        id: "touch-icon",
        category: TipCategory::Mobile,
        title: "Add an apple-touch-icon",
        priority: Priority::Low,
        impact: 1,
        difficulty: Difficulty::Easy,
        applies: |c| !c.facts.resources.touch_icon,
        describe: |_| "A touch icon is shown when the page is saved to a home screen.".to_string(),
        code: Some(|_| r#"<link rel="apple-touch-icon" href="/apple-touch-icon.png">"#.to_string()),
    },
    // Content
    Rule {
        id: "thin-content",
        category: TipCategory::Content,
        title: "Expand thin content",
        priority: Priority::High,
        impact: 4,
        difficulty: Difficulty::Medium,
        applies: |c| c.facts.content.word_count < MIN_CONTENT_WORDS,
        describe: |c| {
            format!(
                "The page has {} words of visible text. Pages under {} words rarely rank for competitive queries.",
                c.facts.content.word_count, MIN_CONTENT_WORDS
            )
        },
        code: None,
    },
    Rule {
        id: "readability",
        category: TipCategory::Content,
        title: "Shorten long sentences",
        priority: Priority::Medium,
        impact: 2,
        difficulty: Difficulty::Medium,
        applies: |c| c.results.content_quality.readability.level == Some(ReadingLevel::Hard),
        describe: |c| {
            format!(
                "Sentences average {:.1} words. Aim for fewer than 25.",
                c.results
                    .content_quality
                    .readability
                    .average_sentence_length
                    .unwrap_or_default()
            )
        },
        code: None,
    },
    Rule {
        id: "keyword-stuffing",
        category: TipCategory::Content,
        title: "Reduce keyword repetition",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Easy,
        applies: |c| {
            c.results
                .content_quality
                .keyword_density
                .density_percent
                .is_some_and(|d| d > 5.0)
        },
        describe: |c| c.results.content_quality.keyword_density.result.issues.join("; "),
        code: None,
    },
    Rule {
        id: "freshness",
        category: TipCategory::Content,
        title: "Show when the content was updated",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| c.results.content_quality.freshness.result.score < 100,
        describe: |c| match c.results.content_quality.freshness.age_days {
            Some(days) => format!("The newest content date is {} days old. Refresh the page and update dateModified.", days),
            None => "No publication or modification date was found.".to_string(),
        },
        code: Some(|_| r#"<time datetime="2025-01-01">January 1, 2025</time>"#.to_string()),
    },
    Rule {
        id: "multimedia",
        category: TipCategory::Content,
        title: "Add images or video",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Medium,
        applies: |c| c.results.content_quality.multimedia.result.score < 50,
        describe: |_| "The page has no images or embedded media.".to_string(),
        code: None,
    },
    // Regional
    Rule {
        id: "naver-verification",
        category: TipCategory::Regional,
        title: "Register with Naver Search Advisor",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Easy,
        applies: |c| !c.results.regional_optimization.naver_verification.exists,
        describe: |_| "Naver is the leading search engine in Korea. Verify the site in Naver Search Advisor and submit the sitemap.".to_string(),
        code: Some(|_| r#"<meta name="naver-site-verification" content="your-verification-code">"#.to_string()),
    },
    Rule {
        id: "html-lang",
        category: TipCategory::Regional,
        title: "Declare the page language",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.html_lang.is_none(),
        describe: |_| "The <html> element has no lang attribute, so search engines must guess the language.".to_string(),
        code: Some(|_| r#"<html lang="ko">"#.to_string()),
    },
    Rule {
        id: "naver-analytics",
        category: TipCategory::Regional,
        title: "Install Naver Analytics",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| !c.results.analytics.has_provider(NAVER_ANALYTICS),
        describe: |_| "Naver Analytics reports Naver search traffic that other tools miss.".to_string(),
        code: Some(|_| {
            "<script src=\"//wcs.naver.net/wcslog.js\"></script>\n<script>\n  if (!wcs_add) var wcs_add = {};\n  wcs_add[\"wa\"] = \"your-site-id\";\n  if (window.wcs) { wcs_do(); }\n</script>"
                .to_string()
        }),
    },
    // Structured data
    Rule {
        id: "structured-data",
        category: TipCategory::StructuredData,
        title: "Add structured data",
        priority: Priority::High,
        impact: 4,
        difficulty: Difficulty::Medium,
        applies: |c| !c.results.structured_data.exists,
        describe: |_| "No JSON-LD, microdata or RDFa was found. Structured data enables rich results.".to_string(),
        code: Some(|c| {
            format!(
                "<script type=\"application/ld+json\">\n{{\n  \"@context\": \"https://schema.org\",\n  \"@type\": \"Organization\",\n  \"name\": \"Your organization\",\n  \"url\": \"{}\"\n}}\n</script>",
                c.facts.url
            )
        }),
    },
    Rule {
        id: "structured-data-errors",
        category: TipCategory::StructuredData,
        title: "Fix structured data errors",
        priority: Priority::Medium,
        impact: 3,
        difficulty: Difficulty::Easy,
        applies: |c| {
            let data = &c.results.structured_data;
            data.exists && (!data.errors.is_empty() || !data.warnings.is_empty())
        },
        describe: |c| {
            let data = &c.results.structured_data;
            data.errors
                .iter()
                .chain(data.warnings.iter())
                .cloned()
                .collect::<Vec<_>>()
                .join("; ")
        },
        code: None,
    },
    // Security
    Rule {
        id: "mixed-content",
        category: TipCategory::Security,
        title: "Load every resource over HTTPS",
        priority: Priority::High,
        impact: 4,
        difficulty: Difficulty::Medium,
        applies: |c| !c.facts.resources.mixed_content.is_empty(),
        describe: |c| {
            format!(
                "{} resources are loaded over plain HTTP from a secure page; browsers block or warn about them.",
                c.facts.resources.mixed_content.len()
            )
        },
        code: None,
    },
    Rule {
        id: "hsts",
        category: TipCategory::Security,
        title: "Enable HTTP Strict Transport Security",
        priority: Priority::Medium,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.is_https && !c.results.security.hsts.exists,
        describe: |_| "HSTS stops browsers from ever requesting the site over plain HTTP.".to_string(),
        code: Some(|_| "Strict-Transport-Security: max-age=31536000; includeSubDomains".to_string()),
    },
    Rule {
        id: "security-headers",
        category: TipCategory::Security,
        title: "Add security headers",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Medium,
        applies: |c| {
            let s = &c.results.security;
            !s.content_security_policy.exists || !s.content_type_options.exists || !s.frame_options.exists
        },
        describe: |c| {
            let s = &c.results.security;
            [&s.content_security_policy, &s.content_type_options, &s.frame_options]
                .iter()
                .flat_map(|sub| sub.issues.iter().cloned())
                .collect::<Vec<_>>()
                .join("; ")
        },
        code: Some(|_| {
            "Content-Security-Policy: default-src 'self'\nX-Content-Type-Options: nosniff\nX-Frame-Options: SAMEORIGIN"
                .to_string()
        }),
    },
    Rule {
        id: "noopener",
        category: TipCategory::Security,
        title: "Add rel=\"noopener\" to new-tab links",
        priority: Priority::Low,
        impact: 1,
        difficulty: Difficulty::Easy,
        applies: |c| !c.facts.accessibility.unsafe_blank_links.is_empty(),
        describe: |c| {
            format!(
                "{} links use target=\"_blank\" without rel=\"noopener\".",
                c.facts.accessibility.unsafe_blank_links.len()
            )
        },
        code: Some(|_| r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">"#.to_string()),
    },
    // Accessibility
    Rule {
        id: "form-labels",
        category: TipCategory::Accessibility,
        title: "Label every form control",
        priority: Priority::Medium,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.accessibility.labelled_controls < c.facts.accessibility.form_controls,
        describe: |c| c.results.accessibility.form_labels.result.issues.join("; "),
        code: Some(|_| "<label for=\"email\">Email</label>\n<input id=\"email\" type=\"email\">".to_string()),
    },
    Rule {
        id: "link-text",
        category: TipCategory::Accessibility,
        title: "Give every link descriptive text",
        priority: Priority::Low,
        impact: 2,
        difficulty: Difficulty::Easy,
        applies: |c| c.facts.accessibility.links_with_text < c.facts.accessibility.links,
        describe: |c| c.results.accessibility.link_text.result.issues.join("; "),
        code: None,
    },
    Rule {
        id: "landmarks",
        category: TipCategory::Accessibility,
        title: "Use main and nav landmarks",
        priority: Priority::Low,
        impact: 1,
        difficulty: Difficulty::Easy,
        applies: |c| c.results.accessibility.landmarks.score < 100,
        describe: |c| c.results.accessibility.landmarks.issues.join("; "),
        code: None,
    },
];
