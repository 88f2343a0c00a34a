//! Line-window snippet extraction.
//!
//! Chunks are slide or handout text, so excerpts are cut on line boundaries:
//! pick one anchor line, then return a short window of non-noise lines around
//! it. Definition questions ("apa yang dimaksud ...") anchor on the acronym
//! being asked about; everything else anchors on the line with the best token
//! overlap with the question.

use regex::Regex;
use std::sync::LazyLock;

use crate::noise::is_noise_line;
use crate::tokenize::{lexical_overlap_score, tokenize};

pub const GENERAL_MAX_LINES: usize = 6;
pub const DEFINITION_MAX_LINES: usize = 8;

const DEFINITION_PHRASES: [&str; 4] = ["apa yang dimaksud", "pengertian", "definisi", "yang dimaksud"];

static ACRONYM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{4,}(?:\s+[A-Z]{2,})*").expect("static regex"));
static ABBREVIATED_AS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)disingkat\s+menjadi").expect("static regex"));
static ABBREVIATED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(?-u:\b)disingkat(?-u:\b)").expect("static regex"));

pub fn is_definition_question(question: &str) -> bool {
    let q = question.to_lowercase();
    DEFINITION_PHRASES.iter().any(|p| q.contains(p))
}

/// Upper-case runs of four or more letters, in question order, de-duplicated.
pub fn extract_acronyms(question: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for m in ACRONYM.find_iter(question) {
        let ac = m.as_str().trim();
        if !ac.is_empty() && !out.iter().any(|seen| seen == ac) {
            out.push(ac.to_string());
        }
    }
    out
}

/// Non-empty trimmed lines; carriage returns are dropped first.
fn content_lines(text: &str) -> Vec<String> {
    text.replace('\r', "")
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Non-noise lines of `lines[start..end]`, at most `max_lines` of them.
fn window(lines: &[String], start: usize, end: usize, max_lines: usize) -> Vec<&str> {
    lines[start..end]
        .iter()
        .map(String::as_str)
        .filter(|l| !is_noise_line(l))
        .take(max_lines)
        .collect()
}

/// Excerpt around the line that best overlaps the question.
///
/// Ties keep the earliest line. When every line is noise the first
/// `max_lines` lines are returned as they are.
pub fn extract_best_snippet(question: &str, text: &str, max_lines: usize) -> String {
    let query_tokens = tokenize(question);
    let lines = content_lines(text);
    if lines.is_empty() {
        return text.trim().to_string();
    }

    let mut best_idx = 0usize;
    let mut best_score = -1.0f32;
    for (i, line) in lines.iter().enumerate() {
        if is_noise_line(line) {
            continue;
        }
        let score = lexical_overlap_score(&query_tokens, &line.to_lowercase());
        if score > best_score {
            best_score = score;
            best_idx = i;
        }
    }

    if best_score < 0.0 {
        return lines.iter().take(max_lines).cloned().collect::<Vec<_>>().join("\n");
    }

    let start = best_idx.saturating_sub(2);
    let end = lines.len().min(best_idx + max_lines);
    let picked = window(&lines, start, end, max_lines);
    if picked.is_empty() {
        return lines[best_idx].trim().to_string();
    }
    picked.join("\n").trim().to_string()
}

/// Excerpt around the line that defines what the question asks about.
///
/// Anchor priority: the first acronym (question order) found on any line,
/// taking its first line; otherwise the first "disingkat menjadi" line;
/// otherwise the first line with the word "disingkat". The window runs from
/// three lines before the anchor through two lines after it. Returns `None`
/// for non-definition questions or when no anchor exists.
pub fn extract_definition_snippet(question: &str, text: &str, max_lines: usize) -> Option<String> {
    if !is_definition_question(question) {
        return None;
    }
    let lines = content_lines(text);
    if lines.is_empty() {
        return None;
    }

    let anchor = extract_acronyms(question)
        .iter()
        .find_map(|ac| {
            let needle = ac.to_lowercase();
            lines.iter().position(|l| l.to_lowercase().contains(&needle))
        })
        .or_else(|| lines.iter().position(|l| ABBREVIATED_AS.is_match(l)))
        .or_else(|| lines.iter().position(|l| ABBREVIATED.is_match(l)))?;

    let start = anchor.saturating_sub(3);
    let end = lines.len().min(anchor + 3);
    let picked = window(&lines, start, end, max_lines);
    if picked.is_empty() {
        return None;
    }
    Some(picked.join("\n").trim().to_string())
}

/// Definition-mode excerpt when one exists, otherwise the general excerpt
/// (eight lines for definition questions, six for everything else).
pub fn extract_for_question(question: &str, text: &str) -> String {
    if let Some(definition) = extract_definition_snippet(question, text, DEFINITION_MAX_LINES) {
        return definition;
    }
    let max_lines = if is_definition_question(question) { DEFINITION_MAX_LINES } else { GENERAL_MAX_LINES };
    extract_best_snippet(question, text, max_lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_phrases_are_detected() {
        assert!(is_definition_question("Apa yang dimaksud dengan HAM?"));
        assert!(is_definition_question("pengertian demokrasi"));
        assert!(is_definition_question("Definisi negara hukum"));
        assert!(!is_definition_question("sebutkan sila pertama"));
    }

    #[test]
    fn acronyms_need_four_capitals() {
        assert_eq!(extract_acronyms("apa yang dimaksud NKRI dan HAM"), vec!["NKRI"]);
        assert_eq!(extract_acronyms("apa itu BPUPKI PPKI BPUPKI"), vec!["BPUPKI PPKI BPUPKI"]);
        assert_eq!(extract_acronyms("jelaskan MPRS lalu DPR RI"), vec!["MPRS"]);
        assert!(extract_acronyms("tidak ada singkatan").is_empty());
    }

    #[test]
    fn general_window_starts_two_lines_before_anchor() {
        let text = "satu\ndua\ntiga\nempat\nlima demokrasi pancasila\nenam\ntujuh\ndelapan\nsembilan\nsepuluh";
        let snippet = extract_best_snippet("demokrasi pancasila", text, 6);
        assert_eq!(snippet, "tiga\nempat\nlima demokrasi pancasila\nenam\ntujuh\ndelapan");
    }

    #[test]
    fn general_window_skips_noise_lines() {
        let text = "www.kampus.ac.id\nNegara hukum berarti\n-----\nsegala tindakan berdasar hukum\n12-34";
        let snippet = extract_best_snippet("negara hukum", text, 6);
        assert_eq!(snippet, "Negara hukum berarti\nsegala tindakan berdasar hukum");
    }

    #[test]
    fn ties_keep_the_first_line() {
        let text = "hukum satu\nhukum dua\nhukum tiga";
        let snippet = extract_best_snippet("hukum", text, 1);
        assert_eq!(snippet, "hukum satu");
    }

    #[test]
    fn all_noise_returns_leading_lines() {
        let text = "http://a\nhttp://b\nhttp://c";
        assert_eq!(extract_best_snippet("apa", text, 2), "http://a\nhttp://b");
    }

    #[test]
    fn blank_text_returns_trimmed_text() {
        assert_eq!(extract_best_snippet("apa", "  \n \r\n ", 6), "");
    }

    #[test]
    fn definition_anchors_on_acronym_line() {
        let text = "a\nb\nc\nd\nNKRI adalah Negara Kesatuan Republik Indonesia\ne\nf\ng\nh";
        let snippet = extract_definition_snippet("apa yang dimaksud NKRI", text, 8).expect("anchor");
        assert_eq!(snippet, "b\nc\nd\nNKRI adalah Negara Kesatuan Republik Indonesia\ne\nf");
    }

    #[test]
    fn definition_falls_back_to_abbreviation_phrase() {
        let text = "pembuka\nMajelis Permusyawaratan Rakyat disingkat menjadi MPR\npenutup";
        let snippet = extract_definition_snippet("pengertian majelis", text, 8).expect("anchor");
        assert!(snippet.contains("disingkat menjadi MPR"));
        assert!(snippet.starts_with("pembuka"));
    }

    #[test]
    fn definition_without_anchor_is_none() {
        assert_eq!(extract_definition_snippet("pengertian demokrasi", "demokrasi adalah", 8), None);
        assert_eq!(extract_definition_snippet("sebutkan NKRI", "NKRI adalah", 8), None, "not a definition question");
    }

    #[test]
    fn extract_for_question_prefers_definition_mode() {
        let text = "x\nNKRI adalah negara kesatuan\ny";
        assert_eq!(extract_for_question("apa yang dimaksud NKRI", text), "x\nNKRI adalah negara kesatuan\ny");
        assert_eq!(extract_for_question("negara kesatuan", text), "x\nNKRI adalah negara kesatuan\ny");
    }
}
