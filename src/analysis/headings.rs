//! Heading hierarchy.

use serde::Serialize;

use super::{weighted, SubScore};
use crate::parse::ExtractedFacts;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingLevelReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub count: usize,
    pub texts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingsReport {
    pub score: u8,
    pub h1: HeadingLevelReport,
    pub h2: HeadingLevelReport,
    pub h3: HeadingLevelReport,
    /// Outline problems such as skipped levels
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts) -> HeadingsReport {
    let headings = &facts.headings;
    let h1 = score_h1(headings.texts(1));
    let h2 = score_subheading(2, headings.texts(2));
    let h3 = score_subheading(3, headings.texts(3));

    let issues = headings
        .skipped_levels()
        .into_iter()
        .map(|(from, to)| format!("Heading level skips from h{} to h{}", from, to))
        .collect();

    HeadingsReport {
        score: weighted(&[
            (h1.result.score, 0.5),
            (h2.result.score, 0.3),
            (h3.result.score, 0.2),
        ]),
        h1,
        h2,
        h3,
        issues,
        error: None,
    }
}

/// Exactly one `<h1>` is ideal; duplicates score 20, not a proportional penalty.
fn score_h1(texts: &[String]) -> HeadingLevelReport {
    let result = match texts.len() {
        0 => SubScore::absent().with_issue("No h1 heading found"),
        1 => SubScore::new(true, 100.0),
        n => SubScore::new(true, 20.0)
            .with_issue(format!("{} h1 headings found; use exactly one", n)),
    };
    HeadingLevelReport {
        result,
        count: texts.len(),
        texts: texts.to_vec(),
    }
}

fn score_subheading(level: usize, texts: &[String]) -> HeadingLevelReport {
    let result = match texts.len() {
        0 => SubScore::absent().with_issue(format!("No h{} headings found", level)),
        1 => SubScore::new(true, 50.0),
        _ => SubScore::new(true, 100.0),
    };
    HeadingLevelReport {
        result,
        count: texts.len(),
        texts: texts.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RawDocument;
    use crate::parse::extract_facts;

    fn report(body: &str) -> HeadingsReport {
        let html = format!("<html><body>{}</body></html>", body);
        analyze(&extract_facts(&RawDocument::from_html("https://example.com/", html)))
    }

    #[test]
    fn test_h1_rule() {
        assert_eq!(report("<p>none</p>").h1.result.score, 0);
        assert_eq!(report("<h1>One</h1>").h1.result.score, 100);
        assert_eq!(report("<h1>One</h1><h1>Two</h1>").h1.result.score, 20);
        assert_eq!(report("<h1>A</h1><h1>B</h1><h1>C</h1>").h1.result.score, 20);
    }

    #[test]
    fn test_subheading_counts() {
        let r = report("<h1>T</h1><h2>a</h2><h2>b</h2><h3>c</h3>");
        assert_eq!(r.h2.result.score, 100);
        assert_eq!(r.h3.result.score, 50);
        // 100*0.5 + 100*0.3 + 50*0.2
        assert_eq!(r.score, 90);
        assert!(r.issues.is_empty());
    }

    #[test]
    fn test_skipped_level_is_reported() {
        let r = report("<h1>T</h1><h3>deep</h3>");
        assert_eq!(r.issues, vec!["Heading level skips from h1 to h3"]);
        assert_eq!(r.h2.result.score, 0);
    }
}
