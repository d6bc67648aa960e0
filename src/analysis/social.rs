//! Open Graph, Twitter Cards and social profile links.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::{weighted, SubScore};
use crate::parse::{ExtractedFacts, SocialMediaLink};

pub(crate) const OPEN_GRAPH_REQUIRED: [&str; 4] = ["og:title", "og:description", "og:image", "og:url"];
pub(crate) const TWITTER_REQUIRED: [&str; 4] = [
    "twitter:card",
    "twitter:title",
    "twitter:description",
    "twitter:image",
];

/// Completeness of a tag family against its required tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSetReport {
    #[serde(flatten)]
    pub result: SubScore,
    pub tags: BTreeMap<String, String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilesReport {
    #[serde(flatten)]
    pub result: SubScore,
    /// Distinct platforms linked, sorted
    pub platforms: Vec<String>,
    pub links: Vec<SocialMediaLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialReport {
    pub score: u8,
    pub open_graph: TagSetReport,
    pub twitter: TagSetReport,
    pub profiles: ProfilesReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts) -> SocialReport {
    let open_graph = score_tag_set("Open Graph", &facts.structured.open_graph, &OPEN_GRAPH_REQUIRED);
    let twitter = score_tag_set("Twitter Card", &facts.structured.twitter_cards, &TWITTER_REQUIRED);
    let profiles = score_profiles(&facts.social_links);

    SocialReport {
        score: weighted(&[
            (open_graph.result.score, 0.4),
            (twitter.result.score, 0.3),
            (profiles.result.score, 0.3),
        ]),
        open_graph,
        twitter,
        profiles,
        error: None,
    }
}

fn score_tag_set(label: &str, tags: &BTreeMap<String, String>, required: &[&str]) -> TagSetReport {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| tags.get(**name).is_none_or(|v| v.is_empty()))
        .map(|name| name.to_string())
        .collect();
    let present = required.len() - missing.len();

    let mut result = SubScore::new(
        !tags.is_empty(),
        present as f64 * 100.0 / required.len() as f64,
    );
    if tags.is_empty() {
        result.issues.push(format!("No {} tags found", label));
    } else if !missing.is_empty() {
        result
            .issues
            .push(format!("Missing {} tags: {}", label, missing.join(", ")));
    }

    TagSetReport {
        result,
        tags: tags.clone(),
        missing,
    }
}

fn score_profiles(links: &[SocialMediaLink]) -> ProfilesReport {
    let platforms: BTreeSet<&str> = links.iter().map(|l| l.platform.as_str()).collect();
    let result = match platforms.len() {
        0 => SubScore::absent().with_issue("No social profile links found"),
        1 | 2 => SubScore::new(true, 60.0),
        _ => SubScore::new(true, 100.0),
    };
    ProfilesReport {
        result,
        platforms: platforms.into_iter().map(str::to_string).collect(),
        links: links.to_vec(),
    }
}
