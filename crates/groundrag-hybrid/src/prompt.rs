//! Prompt text for the two generation passes.

use groundrag_core::types::HistoryEntry;

/// What the model must answer when the context holds nothing quotable.
pub const NOT_FOUND: &str = "TIDAK DITEMUKAN";

pub const REFUSAL_MESSAGE: &str =
    "Maaf, pertanyaan tersebut tidak ditemukan atau tidak cukup relevan dalam materi PPKN yang tersedia.";

pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

pub const FIRST_PASS_SYSTEM: &str = "Kamu hanya boleh menyalin kutipan dari konteks.";
pub const RETRY_SYSTEM: &str = "Output wajib kutipan persis dari konteks atau TIDAK DITEMUKAN.";

const BASE_RULES: &str = "\
ATURAN KETAT (WAJIB):
1) Jawaban HARUS berupa KUTIPAN VERBATIM dari KONTEKS (copy-paste persis, jangan ubah 1 karakter pun).
2) DILARANG menambah kata, menjelaskan, menyimpulkan, atau memparafrase.
3) DILARANG menulis pembuka/penutup seperti \"Berdasarkan konteks...\".
4) Jika tidak ada kalimat yang menjawab, balas tepat: TIDAK DITEMUKAN
5) Jawaban dalam paragraf yang tetap harus verbatim.
6) Jangan pilih header/footer (email, URL, nomor slide, Program Studi, STT).
7) Jangan output kepotong; lanjutkan sampai kalimat/kutipan selesai.";

const RETRY_RULES: &str = "\
PENTING:
- Output kamu HARUS 100% substring dari KONTEKS.
- Jika ragu: TIDAK DITEMUKAN";

/// `User: ...` / `AI: ...` lines for the last `limit` entries.
pub fn render_history(history: &[HistoryEntry], limit: usize) -> String {
    let skip = history.len().saturating_sub(limit);
    history[skip..]
        .iter()
        .map(|h| format!("{}: {}", h.sender.label(), h.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn first_pass_prompt(question: &str, context: &str, history: &[HistoryEntry], history_limit: usize) -> String {
    format!(
        "Kamu adalah asisten PPKN berbasis RAG.\n\n{BASE_RULES}\n\nMEMORY:\n{}\n\nKONTEKS:\n{context}\n\nPERTANYAAN:\n{question}\n\nJawaban:",
        render_history(history, history_limit)
    )
}

/// Stricter prompt for the second attempt; carries no conversation memory.
pub fn retry_prompt(question: &str, context: &str) -> String {
    format!("{BASE_RULES}\n\n{RETRY_RULES}\n\nKONTEKS:\n{context}\n\nPERTANYAAN:\n{question}\n\nJawaban:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundrag_core::types::Sender;

    #[test]
    fn history_keeps_only_the_latest_entries() {
        let history: Vec<HistoryEntry> = (0..8)
            .map(|i| HistoryEntry::new(if i % 2 == 0 { Sender::User } else { Sender::Ai }, format!("m{i}")))
            .collect();
        let rendered = render_history(&history, 6);
        assert_eq!(rendered.lines().count(), 6);
        assert!(rendered.starts_with("User: m2"));
        assert!(rendered.ends_with("AI: m7"));
    }

    #[test]
    fn first_pass_carries_memory_and_context() {
        let history = vec![HistoryEntry::new(Sender::User, "sebelumnya")];
        let p = first_pass_prompt("apa itu HAM", "KONTEKS-X", &history, 6);
        assert!(p.contains("MEMORY:\nUser: sebelumnya"));
        assert!(p.contains("KONTEKS:\nKONTEKS-X"));
        assert!(p.ends_with("PERTANYAAN:\napa itu HAM\n\nJawaban:"));
    }

    #[test]
    fn retry_has_no_memory() {
        let p = retry_prompt("q", "ctx");
        assert!(!p.contains("MEMORY"));
        assert!(p.contains("100% substring"));
    }
}
