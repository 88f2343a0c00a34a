use regex::Regex;
use std::sync::LazyLock;

static PAGE_RANGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{1,3}-[0-9]{1,3}(?-u:\b)").expect("static regex"));
static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-_=]{3,}$").expect("static regex"));

/// Slide/page furniture that must never anchor or appear in a snippet:
/// blank lines, URLs and campus domains, study-program banners, page ranges
/// like "12-34" and horizontal rules.
pub fn is_noise_line(line: &str) -> bool {
    let l = line.trim();
    if l.is_empty() {
        return true;
    }
    let lower = l.to_lowercase();
    if lower.contains("www.") || lower.contains("http") || lower.contains(".ac.id") {
        return true;
    }
    if lower.contains("program studi") {
        return true;
    }
    PAGE_RANGE.is_match(l) || RULE.is_match(l)
}
