use regex::Regex;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]+").expect("static regex"));

/// Lowercase, replace punctuation runs with spaces, split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    NON_WORD.replace_all(&lower, " ").split_whitespace().map(str::to_string).collect()
}

/// One or two ASCII digits: enumerated items such as "(1)" or "ayat 2".
fn is_short_number(token: &str) -> bool {
    let len = token.chars().count();
    (1..=2).contains(&len) && token.chars().all(|c| c.is_ascii_digit())
}

/// Tokens that count toward the overlap denominator.
pub fn is_eligible_token(token: &str) -> bool {
    !token.is_empty() && (token.chars().count() >= 3 || is_short_number(token))
}

/// `needle` occurs in `haystack` bounded by whitespace or the string edges.
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() { return false; }
    haystack.match_indices(needle).any(|(idx, m)| {
        let before_ok = haystack[..idx].chars().next_back().map_or(true, char::is_whitespace);
        let after_ok = haystack[idx + m.len()..].chars().next().map_or(true, char::is_whitespace);
        before_ok && after_ok
    })
}

/// Fraction of eligible query tokens found in `haystack_lower`.
///
/// A whole-word hit counts 1, a bare substring hit 0.5. The denominator
/// floors at 1 so a query without eligible tokens scores exactly 0.
/// `haystack_lower` must already be lowercased.
pub fn lexical_overlap_score(query_tokens: &[String], haystack_lower: &str) -> f32 {
    let mut hit = 0.0f32;
    let mut denom = 0u32;
    for token in query_tokens.iter().filter(|t| is_eligible_token(t)) {
        denom += 1;
        if contains_whole_word(haystack_lower, token) {
            hit += 1.0;
        } else if haystack_lower.contains(token.as_str()) {
            hit += 0.5;
        }
    }
    hit / denom.max(1) as f32
}
