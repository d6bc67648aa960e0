//! Document-level HTML extraction.
//!
//! Title, meta tags, canonical link, doctype, language, headings, images and
//! deprecated elements.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use scraper::{Html, Node, Selector};

use super::{has_token, normalize_whitespace, selector};

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static META_NAMED_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("meta[name]"));
static META_CHARSET_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector("meta[charset], meta[http-equiv]"));
static HTML_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("html"));
static LINK_REL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("link[rel][href]"));
static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector("h1, h2, h3, h4, h5, h6"));
static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("img"));

/// Elements removed from or obsolete in HTML5.
const DEPRECATED_TAGS: &[&str] = &[
    "acronym", "applet", "basefont", "big", "blink", "center", "dir", "font", "frame",
    "frameset", "marquee", "noframes", "spacer", "strike", "tt", "xmp",
];

static DEPRECATED_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector(&DEPRECATED_TAGS.join(", ")));

/// Meta tags that verify site ownership with search platforms.
pub const VERIFICATION_META_NAMES: &[&str] = &[
    "google-site-verification",
    "naver-site-verification",
    "msvalidate.01",
    "yandex-verification",
];

/// Selected `<meta name=...>` values used by the mobile, technical and regional analyzers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaFacts {
    pub viewport: Option<String>,
    pub theme_color: Option<String>,
    pub robots: Option<String>,
    pub has_charset: bool,
    /// Verification meta name -> token
    pub site_verifications: BTreeMap<String, String>,
}

/// Heading texts by level, plus the levels in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadingFacts {
    /// `levels[0]` holds the `<h1>` texts, `levels[5]` the `<h6>` texts
    pub levels: [Vec<String>; 6],
    pub outline: Vec<u8>,
}

impl HeadingFacts {
    /// Texts of the headings at `level` (1-6). Duplicates are kept.
    pub fn texts(&self, level: usize) -> &[String] {
        match level {
            1..=6 => &self.levels[level - 1],
            _ => &[],
        }
    }

    pub fn count(&self, level: usize) -> usize {
        self.texts(level).len()
    }

    /// Pairs of consecutive headings that skip a level going deeper (h1 -> h3).
    pub fn skipped_levels(&self) -> Vec<(u8, u8)> {
        self.outline
            .windows(2)
            .filter(|w| w[1] > w[0] + 1)
            .map(|w| (w[0], w[1]))
            .collect()
    }
}

/// Image alt-coverage and responsiveness counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageFacts {
    pub total: usize,
    /// Images carrying an `alt` attribute (an empty `alt=""` marks a decorative image)
    pub with_alt: usize,
    pub with_srcset: usize,
    pub without_dimensions: usize,
}

impl ImageFacts {
    /// Alt coverage in percent; `None` when the page has no images.
    pub fn alt_coverage(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.with_alt as f64 / self.total as f64 * 100.0)
        }
    }
}

/// Extracts the trimmed text of the first `<title>`.
///
/// Returns `None` when there is no title element or its text is blank.
pub fn extract_title(document: &Html) -> Option<String> {
    let element = document.select(&TITLE_SELECTOR).next()?;
    let title = normalize_whitespace(&element.text().collect::<String>());
    if title.is_empty() {
        log::debug!("Title element present but empty");
        None
    } else {
        Some(title)
    }
}

/// Returns the `content` of the first `<meta name=...>` matching `name` case-insensitively.
fn meta_content(document: &Html, name: &str) -> Option<String> {
    document
        .select(&META_NAMED_SELECTOR)
        .filter(|el| {
            el.value()
                .attr("name")
                .is_some_and(|n| n.trim().eq_ignore_ascii_case(name))
        })
        .find_map(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
}

/// Extracts the meta description. Blank content counts as absent.
pub fn extract_meta_description(document: &Html) -> Option<String> {
    meta_content(document, "description").filter(|d| !d.is_empty())
}

/// Extracts meta keywords, split on commas, trimmed and lowercased.
pub fn extract_meta_keywords(document: &Html) -> Vec<String> {
    meta_content(document, "keywords")
        .map(|content| {
            content
                .split(',')
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

pub fn extract_meta_facts(document: &Html) -> MetaFacts {
    let site_verifications = VERIFICATION_META_NAMES
        .iter()
        .filter_map(|name| {
            meta_content(document, name)
                .filter(|token| !token.is_empty())
                .map(|token| (name.to_string(), token))
        })
        .collect();

    let has_charset = document.select(&META_CHARSET_SELECTOR).any(|el| {
        el.value().attr("charset").is_some()
            || el
                .value()
                .attr("http-equiv")
                .is_some_and(|v| v.eq_ignore_ascii_case("content-type"))
    });

    MetaFacts {
        viewport: meta_content(document, "viewport"),
        theme_color: meta_content(document, "theme-color").filter(|c| !c.is_empty()),
        robots: meta_content(document, "robots"),
        has_charset,
        site_verifications,
    }
}

/// Checks for an HTML5 `<!DOCTYPE html>` declaration.
pub fn has_html_doctype(document: &Html) -> bool {
    document.tree.root().children().any(|node| match node.value() {
        Node::Doctype(doctype) => doctype.name().eq_ignore_ascii_case("html"),
        _ => false,
    })
}

pub fn extract_html_lang(document: &Html) -> Option<String> {
    document
        .select(&HTML_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("lang"))
        .map(|lang| lang.trim().to_string())
        .filter(|lang| !lang.is_empty())
}

/// Extracts the href of the first `<link rel="canonical">`.
pub fn extract_canonical(document: &Html) -> Option<String> {
    document
        .select(&LINK_REL_SELECTOR)
        .filter(|el| el.value().attr("rel").is_some_and(|r| has_token(r, "canonical")))
        .find_map(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Collects heading texts by level in document order. Every occurrence is kept.
pub fn extract_headings(document: &Html) -> HeadingFacts {
    let mut headings = HeadingFacts::default();
    for element in document.select(&HEADING_SELECTOR) {
        let level = match element.value().name().as_bytes() {
            [b'h', digit @ b'1'..=b'6'] => digit - b'0',
            _ => continue,
        };
        let text = normalize_whitespace(&element.text().collect::<String>());
        headings.levels[(level - 1) as usize].push(text);
        headings.outline.push(level);
    }
    headings
}

pub fn extract_images(document: &Html) -> ImageFacts {
    let mut images = ImageFacts::default();
    for element in document.select(&IMG_SELECTOR) {
        let img = element.value();
        images.total += 1;
        if img.attr("alt").is_some() {
            images.with_alt += 1;
        }
        let in_picture = element
            .parent()
            .and_then(|p| p.value().as_element())
            .is_some_and(|p| p.name() == "picture");
        if img.attr("srcset").is_some() || in_picture {
            images.with_srcset += 1;
        }
        if img.attr("width").is_none() || img.attr("height").is_none() {
            images.without_dimensions += 1;
        }
    }
    images
}

/// Distinct deprecated element names present in the document, sorted.
pub fn extract_deprecated_tags(document: &Html) -> Vec<String> {
    document
        .select(&DEPRECATED_SELECTOR)
        .map(|el| el.value().name().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
