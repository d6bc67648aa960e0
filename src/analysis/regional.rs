//! Korean platform optimization: Naver, Kakao and Daum/Google signals.

use serde::Serialize;

use super::{check, clamp_score, SubScore};
use crate::parse::{ExtractedFacts, NAVER_ANALYTICS};

const NAVER_VERIFICATION: &str = "naver-site-verification";
const GOOGLE_VERIFICATION: &str = "google-site-verification";

const NAVER_VERIFICATION_POINTS: f64 = 30.0;
const NAVER_ANALYTICS_POINTS: f64 = 20.0;
const LANGUAGE_POINTS: f64 = 20.0;
const KAKAO_POINTS: f64 = 15.0;
const PORTAL_VERIFICATION_POINTS: f64 = 15.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalReport {
    pub score: u8,
    pub naver_verification: SubScore,
    pub naver_analytics: SubScore,
    pub language: SubScore,
    pub lang: Option<String>,
    /// Kakao SDK or an `og:image` for KakaoTalk link previews
    pub kakao: SubScore,
    /// Daum or Google site verification
    pub portal_verification: SubScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn analyze(facts: &ExtractedFacts) -> RegionalReport {
    let verifications = &facts.meta.site_verifications;

    let naver_verification = check(
        verifications.contains_key(NAVER_VERIFICATION),
        "Register the site with Naver Search Advisor (naver-site-verification)",
    );
    let naver_analytics = check(
        facts.analytics.iter().any(|t| t.provider == NAVER_ANALYTICS),
        "Naver Analytics (wcslog.js) is not installed",
    );
    let language = check(facts.html_lang.is_some(), "The <html> element declares no lang");
    let kakao = check(
        facts.resources.kakao_sdk || facts.structured.open_graph.contains_key("og:image"),
        "No Kakao SDK or og:image for KakaoTalk sharing",
    );
    let portal_verification = check(
        verifications.contains_key(GOOGLE_VERIFICATION),
        "No Daum or Google site verification",
    );

    let earned = [
        (&naver_verification, NAVER_VERIFICATION_POINTS),
        (&naver_analytics, NAVER_ANALYTICS_POINTS),
        (&language, LANGUAGE_POINTS),
        (&kakao, KAKAO_POINTS),
        (&portal_verification, PORTAL_VERIFICATION_POINTS),
    ]
    .iter()
    .filter(|(sub, _)| sub.exists)
    .map(|(_, points)| points)
    .sum::<f64>();

    RegionalReport {
        score: clamp_score(earned),
        naver_verification,
        naver_analytics,
        language,
        lang: facts.html_lang.clone(),
        kakao,
        portal_verification,
        error: None,
    }
}
