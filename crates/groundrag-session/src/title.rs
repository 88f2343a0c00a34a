use regex::Regex;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").expect("static regex"));

const MAX_TITLE_CHARS: usize = 40;

/// Session title derived from its first question.
pub fn title_from_question(question: &str) -> String {
    let flat = question.replace(['\r', '\n'], " ");
    let cleaned = NON_WORD.replace_all(&flat, "");
    let trimmed = cleaned.trim();
    if trimmed.chars().count() <= MAX_TITLE_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(MAX_TITLE_CHARS).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_newlines_are_removed() {
        assert_eq!(title_from_question("  Apa isi Pasal 28,\nayat (1)?  "), "Apa isi Pasal 28 ayat 1");
    }

    #[test]
    fn long_questions_are_cut_at_forty_chars() {
        let q = "Jelaskan hubungan antara Pancasila dan Undang-Undang Dasar 1945 secara lengkap";
        let t = title_from_question(q);
        assert!(t.ends_with("..."));
        assert_eq!(t.chars().count(), 43);
        assert!(t.starts_with("Jelaskan hubungan antara Pancasila dan U"));
    }

    #[test]
    fn exactly_forty_chars_is_kept_whole() {
        let q = "a".repeat(40);
        assert_eq!(title_from_question(&q), q);
    }
}
