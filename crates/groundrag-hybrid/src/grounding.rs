//! Verbatim grounding checks.

/// Drop carriage returns, collapse whitespace runs to one space, trim.
pub fn normalize(text: &str) -> String {
    text.replace('\r', "").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True iff `answer` is non-empty and, after normalization, a literal
/// case-sensitive substring of the normalized `context`.
pub fn verify(answer: &str, context: &str) -> bool {
    let a = normalize(answer);
    !a.is_empty() && normalize(context).contains(&a)
}

/// Trim, then cut to at most `max_chars` characters and trim again.
pub fn clamp_answer(answer: &str, max_chars: usize) -> String {
    let a = answer.trim();
    match a.char_indices().nth(max_chars) {
        None => a.to_string(),
        Some((cut, _)) => a[..cut].trim().to_string(),
    }
}
