//! Citation matching for Indonesian statute references.
//!
//! A question such as "apa isi pasal 28a ayat (1)" names an article ("pasal")
//! and a clause ("ayat"). Chunks quoting the same article/clause are boosted
//! and, when at least one exists, the candidate set is narrowed to them.

use regex::Regex;
use std::sync::LazyLock;

static ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?-u:\b)pasal\s+([0-9]+)\s*([a-z])?(?-u:\b)").expect("static regex"));
static CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?-u:\b)ayat\s*\(?\s*([0-9]+)\s*\)?(?-u:\b)").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalRef {
    /// Article number with optional trailing letter, e.g. "28" or "28a".
    pub article: Option<String>,
    /// Clause number, e.g. "1".
    pub clause: Option<String>,
}

/// Parse the first article and the first clause mentioned in `question`.
pub fn extract_reference(question: &str) -> Option<LegalRef> {
    let q = question.to_lowercase();
    let article = ARTICLE.captures(&q).map(|caps| {
        let number = caps.get(1).map_or("", |m| m.as_str());
        let letter = caps.get(2).map_or("", |m| m.as_str());
        format!("{number}{letter}")
    });
    let clause = CLAUSE.captures(&q).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string());
    if article.is_none() && clause.is_none() {
        return None;
    }
    Some(LegalRef { article, clause })
}

/// "28a" -> "28 a"; articles without a letter are returned unchanged.
fn letter_spaced(article: &str) -> String {
    match article.char_indices().next_back() {
        Some((idx, c)) if c.is_ascii_alphabetic() && idx > 0 => format!("{} {}", &article[..idx], c),
        _ => article.to_string(),
    }
}

/// Whether a lowercased chunk quotes every part of `reference`.
///
/// Without a reference nothing matches, so nothing is boosted or filtered.
pub fn matches(chunk_lower: &str, reference: Option<&LegalRef>) -> bool {
    let Some(reference) = reference else { return false };
    if let Some(article) = &reference.article {
        let plain = format!("pasal {article}");
        let spaced = format!("pasal {}", letter_spaced(article));
        if !(chunk_lower.contains(&plain) || chunk_lower.contains(&spaced)) {
            return false;
        }
    }
    if let Some(clause) = &reference.clause {
        let parenthesized = format!("ayat ({clause})");
        let bare = format!("ayat {clause}");
        if !(chunk_lower.contains(&parenthesized) || chunk_lower.contains(&bare)) {
            return false;
        }
    }
    true
}
