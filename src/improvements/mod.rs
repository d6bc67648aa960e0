//! Improvement engine.
//!
//! Turns analyzer findings into a prioritized list of [`ImprovementTip`]s by
//! evaluating every entry of a static rule table. Rules never see each other's
//! output, so adding one cannot change what another produces.

mod rules;
mod types;

pub use rules::{Rule, RuleContext, RULES};
pub use types::{Difficulty, ImprovementTip, Priority, TipCategory};

use crate::analysis::AnalyzerResults;
use crate::parse::ExtractedFacts;

impl Rule {
    /// Evaluates the rule; `None` when its predicate does not hold.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<ImprovementTip> {
        if !(self.applies)(ctx) {
            return None;
        }
        Some(ImprovementTip {
            category: self.category,
            title: self.title.to_string(),
            description: (self.describe)(ctx),
            priority: self.priority,
            impact: self.impact,
            difficulty: self.difficulty,
            code: self.code.map(|code| code(ctx)),
        })
    }
}

/// Runs every rule and returns the tips in presentation order.
pub fn generate_improvements(
    facts: &ExtractedFacts,
    results: &AnalyzerResults,
) -> Vec<ImprovementTip> {
    generate_with(RULES, facts, results)
}

pub(crate) fn generate_with(
    rules: &[Rule],
    facts: &ExtractedFacts,
    results: &AnalyzerResults,
) -> Vec<ImprovementTip> {
    let ctx = RuleContext { facts, results };
    let mut tips: Vec<ImprovementTip> = rules.iter().filter_map(|r| r.evaluate(&ctx)).collect();
    sort_tips(&mut tips);
    log::debug!(
        "{} of {} improvement rules fired for {}",
        tips.len(),
        rules.len(),
        facts.url
    );
    tips
}

/// Priority first (high to low), then impact descending. Stable, so ties keep
/// rule order.
pub fn sort_tips(tips: &mut [ImprovementTip]) {
    tips.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.impact.cmp(&a.impact))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::VitalsEstimate;
    use crate::fetch::{ProbeResults, RawDocument};
    use crate::parse::extract_facts;
    use std::collections::HashSet;

    fn run(raw: RawDocument) -> (ExtractedFacts, Vec<ImprovementTip>) {
        let facts = extract_facts(&raw);
        let results = AnalyzerResults::run_inline(&facts, &VitalsEstimate::default());
        let tips = generate_improvements(&facts, &results);
        (facts, tips)
    }

    fn tip(priority: Priority, impact: u8, title: &str) -> ImprovementTip {
        ImprovementTip {
            category: TipCategory::Content,
            title: title.to_string(),
            description: String::new(),
            priority,
            impact,
            difficulty: Difficulty::Easy,
            code: None,
        }
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let ids: HashSet<_> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), RULES.len());
    }

    #[test]
    fn test_impacts_in_range() {
        for rule in RULES {
            assert!((1..=5).contains(&rule.impact), "{} has impact {}", rule.id, rule.impact);
        }
    }

    #[test]
    fn test_sort_priority_then_impact_stable() {
        let mut tips = vec![
            tip(Priority::Low, 5, "a"),
            tip(Priority::High, 2, "b"),
            tip(Priority::Medium, 3, "c"),
            tip(Priority::High, 4, "d"),
            tip(Priority::High, 2, "e"),
        ];
        sort_tips(&mut tips);
        let titles: Vec<_> = tips.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["d", "b", "e", "c", "a"]);
    }

    #[test]
    fn test_missing_title_tip() {
        let (_, tips) = run(RawDocument::from_html(
            "http://example.com/",
            "<html><body><p>hello</p></body></html>",
        ));
        let title = tips
            .iter()
            .find(|t| t.title == "Add a title tag")
            .expect("title tip");
        assert_eq!(title.priority, Priority::High);
        assert_eq!(title.impact, 5);
        assert_eq!(title.difficulty, Difficulty::Easy);
        assert_eq!(title.category, TipCategory::Metadata);
        assert!(title.code.as_deref().unwrap().contains("<title>"));
        assert_eq!(tips[0].priority, Priority::High);
        assert_eq!(tips[0].impact, 5);
    }

    #[test]
    fn test_tips_sorted() {
        let (_, tips) = run(RawDocument::from_html("http://example.com/", "<p>x</p>"));
        assert!(!tips.is_empty());
        for pair in tips.windows(2) {
            assert!(
                pair[0].priority < pair[1].priority
                    || (pair[0].priority == pair[1].priority && pair[0].impact >= pair[1].impact)
            );
        }
    }

    #[test]
    fn test_multiple_h1_rule() {
        let (_, tips) = run(RawDocument::from_html(
            "https://example.com/",
            "<html><body><h1>a</h1><h1>b</h1></body></html>",
        ));
        let tip = tips
            .iter()
            .find(|t| t.title == "Use a single h1 heading")
            .unwrap();
        assert!(tip.description.contains("2 <h1>"));
        assert!(!tips.iter().any(|t| t.title == "Add an h1 heading"));
    }

    #[test]
    fn test_probe_tips_follow_probe_results() {
        let html = "<html><body><p>x</p></body></html>";
        let (_, tips) = run(RawDocument::from_html("https://example.com/", html));
        assert!(tips.iter().any(|t| t.title == "Publish a sitemap.xml"));
        let robots = tips.iter().find(|t| t.title == "Add a robots.txt file").unwrap();
        assert!(robots
            .code
            .as_deref()
            .unwrap()
            .contains("Sitemap: https://example.com/sitemap.xml"));

        let raw = RawDocument::from_html("https://example.com/", html).with_probes(ProbeResults {
            robots_txt: true,
            sitemap_xml: true,
        });
        let (_, tips) = run(raw);
        assert!(!tips.iter().any(|t| t.title == "Publish a sitemap.xml"));
        assert!(!tips.iter().any(|t| t.title == "Add a robots.txt file"));
    }

    #[test]
    fn test_naver_analytics_tip_follows_detected_tools() {
        let (_, tips) = run(RawDocument::from_html(
            "https://example.com/",
            r#"<script src="https://www.googletagmanager.com/gtag/js?id=G-1"></script>"#,
        ));
        assert!(tips.iter().any(|t| t.title == "Install Naver Analytics"));
        assert!(!tips.iter().any(|t| t.title == "Install an analytics tool"));

        let (_, tips) = run(RawDocument::from_html(
            "https://example.com/",
            r#"<script src="//wcs.naver.net/wcslog.js"></script>"#,
        ));
        assert!(!tips.iter().any(|t| t.title == "Install Naver Analytics"));
    }

    #[test]
    fn test_slow_lcp_tip() {
        let facts = extract_facts(&RawDocument::from_html("https://example.com/", "<p>x</p>"));
        let slow = VitalsEstimate {
            lcp_ms: 3000.0,
            fid_ms: 40.0,
            cls: 0.02,
            method: "fixed",
        };
        let tips = generate_improvements(&facts, &AnalyzerResults::run_inline(&facts, &slow));
        let lcp = tips
            .iter()
            .find(|t| t.title == "Improve Largest Contentful Paint")
            .unwrap();
        assert!(lcp.description.contains("3000 ms"));
        assert_eq!(lcp.priority, Priority::High);

        let fast = VitalsEstimate { lcp_ms: 2500.0, ..slow };
        let tips = generate_improvements(&facts, &AnalyzerResults::run_inline(&facts, &fast));
        assert!(!tips.iter().any(|t| t.title == "Improve Largest Contentful Paint"));
    }

    #[test]
    fn test_no_rules_fire_yields_empty_list() {
        let (facts, _) = run(RawDocument::from_html("https://example.com/", "<p>x</p>"));
        let results = AnalyzerResults::run_inline(&facts, &VitalsEstimate::default());
        let tips = generate_with(&[], &facts, &results);
        assert!(tips.is_empty());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let html = "<html><head><title>t</title></head><body><img src=a.png></body></html>";
        let (_, first) = run(RawDocument::from_html("https://example.com/", html));
        let (_, second) = run(RawDocument::from_html("https://example.com/", html));
        assert_eq!(first, second);
    }
}
