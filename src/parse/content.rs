//! Body text statistics: words, sentences, keywords, media and content dates.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;
use serde_json::Value;

use super::selector;
use super::structured::StructuredData;
use crate::config::HEADER_LAST_MODIFIED;
use crate::fetch::RawDocument;

/// Number of most frequent keywords kept.
const TOP_KEYWORDS: usize = 10;

/// Elements whose text is never rendered.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Block elements whose text is split into sentences.
const SENTENCE_BLOCKS: &[&str] = &["p", "li", "blockquote", "dd", "td"];

const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have", "he",
    "her", "his", "how", "if", "in", "into", "is", "it", "its", "just", "more", "most", "my",
    "no", "not", "of", "on", "one", "or", "our", "out", "she", "so", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "to", "up", "us", "was", "we",
    "were", "what", "when", "which", "who", "will", "with", "would", "you", "your",
];

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("body"));
static PARAGRAPH_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static SENTENCE_BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector("p, li, blockquote, dd, td"));
static LIST_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("ul, ol"));
static VIDEO_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("video"));
static AUDIO_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("audio"));
static IFRAME_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("iframe"));
static TIME_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("time[datetime]"));
static DATE_META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    selector(
        r#"meta[property="article:modified_time"], meta[property="article:published_time"],
           meta[property="og:updated_time"], meta[name="date"], meta[name="last-modified"]"#,
    )
});
static ITEMPROP_DATE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    selector(r#"[itemprop="dateModified"], [itemprop="datePublished"]"#)
});

/// A keyword and its occurrence count in the body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// Statistics over the rendered body text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentFacts {
    pub word_count: usize,
    pub sentence_count: usize,
    /// Words across all counted sentences
    pub sentence_words: usize,
    /// Non-empty `<p>` elements
    pub paragraph_count: usize,
    pub list_count: usize,
    /// Most frequent non-stopword tokens, most frequent first
    pub top_keywords: Vec<KeywordCount>,
    pub videos: usize,
    pub audios: usize,
    pub iframes: usize,
    /// Newest publication or modification date found in the page or headers
    pub latest_date: Option<DateTime<Utc>>,
}

impl ContentFacts {
    /// Mean words per sentence; `None` without sentences.
    pub fn average_sentence_length(&self) -> Option<f64> {
        (self.sentence_count > 0).then(|| self.sentence_words as f64 / self.sentence_count as f64)
    }

    /// Share of the body taken by the top keyword, in percent.
    pub fn top_keyword_density(&self) -> Option<f64> {
        let top = self.top_keywords.first()?;
        (self.word_count > 0).then(|| top.count as f64 * 100.0 / self.word_count as f64)
    }
}

pub(crate) fn extract_content(
    document: &Html,
    structured: &StructuredData,
    raw: &RawDocument,
) -> ContentFacts {
    let body_text = document
        .select(&BODY_SELECTOR)
        .next()
        .map(visible_text)
        .unwrap_or_default();
    let words = tokenize(&body_text);

    let (sentence_count, sentence_words) = count_sentences(document);

    ContentFacts {
        word_count: words.len(),
        sentence_count,
        sentence_words,
        paragraph_count: document
            .select(&PARAGRAPH_SELECTOR)
            .filter(|p| !visible_text(*p).trim().is_empty())
            .count(),
        list_count: document.select(&LIST_SELECTOR).count(),
        top_keywords: top_keywords(&words),
        videos: document.select(&VIDEO_SELECTOR).count(),
        audios: document.select(&AUDIO_SELECTOR).count(),
        iframes: document.select(&IFRAME_SELECTOR).count(),
        latest_date: latest_content_date(document, structured, raw),
    }
}

/// Concatenates the text nodes under `root`, skipping non-rendered subtrees.
fn visible_text(root: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in root.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            text.push_str(fragment);
            text.push(' ');
        }
    }
    text
}

/// Splits text into lowercase word tokens; tokens without a letter or digit are dropped.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || (c.is_ascii_punctuation() && c != '\'' && c != '-'))
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .map(str::to_lowercase)
        .collect()
}

/// Counts sentences in block elements, skipping blocks nested in another counted block.
fn count_sentences(document: &Html) -> (usize, usize) {
    let mut sentences = 0;
    let mut words = 0;
    for block in document.select(&SENTENCE_BLOCK_SELECTOR) {
        let nested = block.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SENTENCE_BLOCKS.contains(&el.name()))
        });
        if nested {
            continue;
        }
        let text = visible_text(block);
        for sentence in text.split(['.', '!', '?', '。']) {
            let count = tokenize(sentence).len();
            if count > 0 {
                sentences += 1;
                words += count;
            }
        }
    }
    (sentences, words)
}

fn top_keywords(words: &[String]) -> Vec<KeywordCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for word in words {
        if word.chars().count() < 2
            || STOPWORDS.contains(&word.as_str())
            || word.chars().all(|c| c.is_ascii_digit())
        {
            continue;
        }
        *counts.entry(word.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<KeywordCount> = counts
        .into_iter()
        .map(|(word, count)| KeywordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    // BTreeMap order breaks count ties alphabetically
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_KEYWORDS);
    ranked
}

fn latest_content_date(
    document: &Html,
    structured: &StructuredData,
    raw: &RawDocument,
) -> Option<DateTime<Utc>> {
    let from_time = document
        .select(&TIME_SELECTOR)
        .filter_map(|el| el.value().attr("datetime"));
    let from_meta = document
        .select(&DATE_META_SELECTOR)
        .filter_map(|el| el.value().attr("content"));
    let from_itemprop = document
        .select(&ITEMPROP_DATE_SELECTOR)
        .filter_map(|el| el.value().attr("content").or_else(|| el.value().attr("datetime")));
    let from_json_ld = structured.json_ld.iter().flat_map(|item| {
        ["dateModified", "datePublished"]
            .into_iter()
            .filter_map(move |key| item.get(key).and_then(Value::as_str))
    });

    let markup_dates = from_time
        .chain(from_meta)
        .chain(from_itemprop)
        .chain(from_json_ld)
        .filter_map(parse_content_date);

    let header_date = raw
        .header(HEADER_LAST_MODIFIED)
        .and_then(|value| DateTime::parse_from_rfc2822(value).ok())
        .map(|d| d.with_timezone(&Utc));

    markup_dates.chain(header_date).max()
}

/// Parses RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` and bare dates.
pub(crate) fn parse_content_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    let date_part = value.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn facts(html: &str) -> ContentFacts {
        let raw = RawDocument::from_html("https://example.com/", html);
        let document = Html::parse_document(html);
        let structured = super::super::structured::extract_structured_data(&document);
        extract_content(&document, &structured, &raw)
    }

    #[test]
    fn test_scripts_and_styles_are_not_counted() {
        let content = facts(
            "<html><head><title>T</title></head><body><p>One two three.</p>\
             <script>var hidden = 'lots of words here';</script>\
             <style>.a { color: red }</style></body></html>",
        );
        assert_eq!(content.word_count, 3);
    }

    #[test]
    fn test_sentence_statistics() {
        let content = facts(
            "<body><p>This is short. This one is a bit longer!</p><ul><li>Item text here</li></ul></body>",
        );
        assert_eq!(content.sentence_count, 3);
        assert_eq!(content.sentence_words, 3 + 6 + 3);
        assert_eq!(content.average_sentence_length(), Some(4.0));
        assert_eq!(content.paragraph_count, 1);
        assert_eq!(content.list_count, 1);
    }

    #[test]
    fn test_top_keywords_skip_stopwords() {
        let content = facts(
            "<body><p>Rust crate. The rust compiler. Rust is fast and the crate is small.</p></body>",
        );
        assert_eq!(content.top_keywords[0].word, "rust");
        assert_eq!(content.top_keywords[0].count, 3);
        assert_eq!(content.top_keywords[1].word, "crate");
        assert!(content.top_keywords.iter().all(|k| k.word != "the"));
    }

    #[test]
    fn test_media_counts() {
        let content = facts(
            r#"<body><video src="a.mp4"></video><audio src="a.mp3"></audio>
               <iframe src="https://www.youtube.com/embed/x"></iframe></body>"#,
        );
        assert_eq!((content.videos, content.audios, content.iframes), (1, 1, 1));
    }

    #[test]
    fn test_latest_date_prefers_newest_source() {
        let html = r#"<html><head>
            <meta property="article:published_time" content="2024-01-10T09:00:00+09:00">
            <script type="application/ld+json">{"@type":"Article","dateModified":"2024-03-05"}</script>
        </head><body><time datetime="2023-12-01">Dec</time></body></html>"#;
        let content = facts(html);
        assert_eq!(
            content.latest_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_last_modified_header_counts() {
        let raw = RawDocument::from_html("https://example.com/", "<body></body>")
            .with_header("Last-Modified", "Wed, 21 Oct 2015 07:28:00 GMT");
        let document = Html::parse_document(&raw.html);
        let content = extract_content(&document, &StructuredData::default(), &raw);
        assert_eq!(
            content.latest_date,
            Some(Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_content_date_formats() {
        assert!(parse_content_date("2024-05-01T10:00:00Z").is_some());
        assert!(parse_content_date("2024-05-01T10:00:00").is_some());
        assert!(parse_content_date("2024-05-01").is_some());
        assert!(parse_content_date("yesterday").is_none());
        assert!(parse_content_date("").is_none());
    }

    #[test]
    fn test_empty_body() {
        let content = facts("<html><body></body></html>");
        assert_eq!(content.word_count, 0);
        assert_eq!(content.average_sentence_length(), None);
        assert_eq!(content.top_keyword_density(), None);
        assert!(content.latest_date.is_none());
    }
}
