//! Industry tag and company size extraction.
//!
//! Industry tags are machine keys (lowercase, hyphenated) with Korean
//! display labels; size is one of a fixed set of Korean categories pulled
//! out of search prose via an explicit marker.

use std::sync::LazyLock;

use regex::Regex;

use crate::recovery;

/// Returned in the industry response body when no tag survives recovery.
pub const INDUSTRY_FAILURE: &str = "산업 분류에 실패했습니다. 다시 시도해주세요.";

/// Default size verdict when neither the marker nor the text names a
/// known category.
pub const SIZE_UNKNOWN: &str = "분류 불가";

/// Fixed size categories, scanned in this order.
pub const SIZE_CATEGORIES: [&str; 8] = [
    "대기업",
    "중견기업",
    "중소기업",
    "스타트업",
    "외국계기업",
    "공공기관 및 공기업",
    "비영리단체 및 협회재단",
    "금융업",
];

/// Known tags and their display labels. Unknown tags are still returned,
/// just without a label, so the prompt can grow without a code change.
pub const TAG_LABELS: &[(&str, &str)] = &[
    ("it-software", "IT/소프트웨어"),
    ("platform-portal", "플랫폼/포털"),
    ("e-commerce", "이커머스"),
    ("game-dev", "게임"),
    ("fintech-banking", "핀테크/금융"),
    ("insurance-securities", "보험/증권"),
    ("semiconductor-electronics", "반도체/전자"),
    ("automotive-mobility", "자동차/모빌리티"),
    ("bio-pharma", "바이오/제약"),
    ("chemical-energy", "화학/에너지"),
    ("steel-materials", "철강/소재"),
    ("construction-engineering", "건설/엔지니어링"),
    ("shipbuilding-heavy", "조선/중공업"),
    ("aerospace-defense", "항공/방산"),
    ("telecom-network", "통신/네트워크"),
    ("media-entertainment", "미디어/엔터테인먼트"),
    ("fashion-beauty", "패션/뷰티"),
    ("food-beverage", "식품/음료"),
    ("retail-distribution", "유통/리테일"),
    ("logistics-delivery", "물류/배송"),
    ("travel-hospitality", "여행/호텔"),
    ("education-edtech", "교육/에듀테크"),
    ("consulting-services", "컨설팅/전문서비스"),
    ("public-government", "공공/행정"),
    ("nonprofit-ngo", "비영리/NGO"),
];

static QUOTED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([a-z-]+)""#).expect("valid regex"));
static BARE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z-]+").expect("valid regex"));
static SIZE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```<([^>]+)>```").expect("valid regex"));

/// List recovery first; when the payload is pure prose, fall back to
/// scanning for hyphenated lowercase tag tokens.
pub fn extract_industry_tags(text: &str) -> Vec<String> {
    let tags = recovery::string_list(text, "industry_tags", recovery::DEFAULT_LIST_CAP);
    if !tags.is_empty() {
        return tags;
    }
    loose_tags(text, recovery::DEFAULT_LIST_CAP)
}

fn loose_tags(text: &str, cap: usize) -> Vec<String> {
    let mut tags = Vec::new();
    for caps in QUOTED_TAG.captures_iter(text) {
        push_tag(&mut tags, &caps[1], cap);
    }
    if tags.is_empty() {
        for candidate in BARE_TAG.find_iter(text) {
            push_tag(&mut tags, candidate.as_str(), cap);
        }
    }
    tags
}

fn push_tag(tags: &mut Vec<String>, tag: &str, cap: usize) {
    if tags.len() >= cap {
        return;
    }
    if tag.len() > 2 && tag.contains('-') && !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

pub fn label(tag: &str) -> Option<&'static str> {
    TAG_LABELS
        .iter()
        .find(|(key, _)| *key == tag)
        .map(|(_, label)| *label)
}

/// Marker first, then the first category named anywhere in the text.
///
/// A marker naming something outside [`SIZE_CATEGORIES`] is not returned
/// verbatim; it falls through to the text scan and then to
/// [`SIZE_UNKNOWN`], so the verdict is always one of the fixed categories
/// the frontend filter knows.
pub fn extract_size_category(text: &str) -> &'static str {
    if let Some(caps) = SIZE_MARKER.captures(text) {
        let marked = caps[1].trim().to_string();
        if let Some(category) = SIZE_CATEGORIES.iter().find(|c| **c == marked) {
            return *category;
        }
    }
    SIZE_CATEGORIES
        .iter()
        .find(|category| text.contains(*category))
        .copied()
        .unwrap_or(SIZE_UNKNOWN)
}

/// The analysis body shown alongside the verdict, with the marker line
/// removed.
pub fn analysis_text(text: &str) -> String {
    SIZE_MARKER.replace_all(text, "").trim().to_string()
}
