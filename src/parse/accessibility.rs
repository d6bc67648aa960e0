//! Accessibility signals: form labelling, link text and landmarks.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{has_token, selector};

static CONTROL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("input, select, textarea"));
static LABEL_FOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("label[for]"));
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static IMG_ALT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("img[alt]"));
static LANDMARK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector("main, nav, header, footer, aside, [role]"));

/// Input types that need no visible label.
const UNLABELLED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "image", "reset"];

/// ARIA roles mapped onto their landmark element names.
const LANDMARK_ROLES: &[(&str, &str)] = &[
    ("main", "main"),
    ("navigation", "nav"),
    ("banner", "header"),
    ("contentinfo", "footer"),
    ("complementary", "aside"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessibilityFacts {
    /// Form controls that need a label
    pub form_controls: usize,
    pub labelled_controls: usize,
    pub links: usize,
    /// Links with text, an `aria-label` or an image with alt text
    pub links_with_text: usize,
    /// `target="_blank"` links lacking `rel="noopener"`/`noreferrer`
    pub unsafe_blank_links: Vec<String>,
    /// Distinct landmark names found, sorted
    pub landmarks: Vec<String>,
}

impl AccessibilityFacts {
    pub fn has_landmark(&self, name: &str) -> bool {
        self.landmarks.iter().any(|l| l == name)
    }
}

pub(crate) fn extract_accessibility(document: &Html) -> AccessibilityFacts {
    let label_targets: HashSet<&str> = document
        .select(&LABEL_FOR_SELECTOR)
        .filter_map(|label| label.value().attr("for"))
        .map(str::trim)
        .collect();

    let mut facts = AccessibilityFacts::default();

    for control in document.select(&CONTROL_SELECTOR) {
        let attrs = control.value();
        if attrs.name() == "input" {
            let input_type = attrs.attr("type").unwrap_or("text").trim().to_ascii_lowercase();
            if UNLABELLED_INPUT_TYPES.contains(&input_type.as_str()) {
                continue;
            }
        }
        facts.form_controls += 1;
        if is_labelled(control, &label_targets) {
            facts.labelled_controls += 1;
        }
    }

    for link in document.select(&LINK_SELECTOR) {
        facts.links += 1;
        if has_accessible_name(link) {
            facts.links_with_text += 1;
        }
        let attrs = link.value();
        let opens_new_tab = attrs
            .attr("target")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("_blank"));
        let rel = attrs.attr("rel").unwrap_or_default();
        if opens_new_tab && !has_token(rel, "noopener") && !has_token(rel, "noreferrer") {
            facts
                .unsafe_blank_links
                .push(attrs.attr("href").unwrap_or_default().to_string());
        }
    }

    let mut landmarks = BTreeSet::new();
    for element in document.select(&LANDMARK_SELECTOR) {
        let attrs = element.value();
        match attrs.name() {
            name @ ("main" | "nav" | "header" | "footer" | "aside") => {
                landmarks.insert(name.to_string());
            }
            _ => {}
        }
        if let Some(role) = attrs.attr("role") {
            let role = role.trim().to_ascii_lowercase();
            if let Some((_, name)) = LANDMARK_ROLES.iter().find(|(r, _)| *r == role) {
                landmarks.insert(name.to_string());
            }
        }
    }
    facts.landmarks = landmarks.into_iter().collect();

    facts
}

fn is_labelled(control: ElementRef<'_>, label_targets: &HashSet<&str>) -> bool {
    let attrs = control.value();
    let has_aria = ["aria-label", "aria-labelledby", "title"]
        .iter()
        .any(|name| attrs.attr(name).is_some_and(|v| !v.trim().is_empty()));
    let has_label_for = attrs
        .attr("id")
        .is_some_and(|id| label_targets.contains(id.trim()));
    let wrapped = control.ancestors().any(|ancestor| {
        ancestor
            .value()
            .as_element()
            .is_some_and(|el| el.name() == "label")
    });
    has_aria || has_label_for || wrapped
}

fn has_accessible_name(link: ElementRef<'_>) -> bool {
    if link.text().any(|t| !t.trim().is_empty()) {
        return true;
    }
    if link
        .value()
        .attr("aria-label")
        .is_some_and(|v| !v.trim().is_empty())
    {
        return true;
    }
    link.select(&IMG_ALT_SELECTOR).any(|img| {
        img.value()
            .attr("alt")
            .is_some_and(|alt| !alt.trim().is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_control_labelling() {
        let html = r#"<form>
            <label for="email">Email</label><input id="email" type="email">
            <label>Name <input type="text"></label>
            <input type="search" aria-label="Search">
            <input type="text" placeholder="unlabelled">
            <input type="hidden" name="csrf">
            <button type="submit">Go</button>
        </form>"#;
        let facts = extract_accessibility(&Html::parse_document(html));
        assert_eq!(facts.form_controls, 4);
        assert_eq!(facts.labelled_controls, 3);
    }

    #[test]
    fn test_link_text_and_blank_targets() {
        let html = r#"<body>
            <a href="/a">About</a>
            <a href="/b"><img src="x.png" alt="Home"></a>
            <a href="/c"><img src="y.png"></a>
            <a href="https://ext.example" target="_blank">External</a>
            <a href="https://safe.example" target="_blank" rel="noopener">Safe</a>
        </body>"#;
        let facts = extract_accessibility(&Html::parse_document(html));
        assert_eq!(facts.links, 5);
        assert_eq!(facts.links_with_text, 4);
        assert_eq!(facts.unsafe_blank_links, vec!["https://ext.example"]);
    }

    #[test]
    fn test_landmarks_from_elements_and_roles() {
        let html = r#"<body><div role="navigation"></div><main></main><div role="contentinfo"></div></body>"#;
        let facts = extract_accessibility(&Html::parse_document(html));
        assert_eq!(facts.landmarks, vec!["footer", "main", "nav"]);
        assert!(facts.has_landmark("main"));
        assert!(!facts.has_landmark("aside"));
    }
}
