use groundrag_text::reference::matches;
use groundrag_text::{extract_for_question, extract_reference, lexical_overlap_score, tokenize, LegalRef};
use proptest::prelude::*;

const HAM_SLIDE: &str = "\
www.kampus.ac.id
Bab 3 Hak Asasi Manusia
HAM adalah seperangkat hak yang melekat pada hakikat manusia
sebagai makhluk Tuhan Yang Maha Esa
dan merupakan anugerah-Nya
12-34";

#[test]
fn short_acronym_question_falls_back_to_general_window() {
    // Three capitals is not an acronym anchor; the general window takes over with eight lines.
    let snippet = extract_for_question("Apa yang dimaksud dengan HAM?", HAM_SLIDE);
    assert!(snippet.contains("HAM adalah seperangkat hak"), "got {snippet:?}");
    assert!(!snippet.contains("www."), "noise never appears in a snippet");
    assert!(!snippet.contains("12-34"));
}

#[test]
fn citation_question_matches_spaced_and_unspaced_forms() {
    let reference = extract_reference("Bunyi Pasal 28A ayat (2)?");
    assert_eq!(reference, Some(LegalRef { article: Some("28a".into()), clause: Some("2".into()) }));
    assert!(matches("pasal 28a ayat 2 setiap orang", reference.as_ref()));
    assert!(matches("pasal 28 a ayat (2) setiap orang", reference.as_ref()));
    assert!(!matches("pasal 29 ayat (2)", reference.as_ref()));
}

proptest! {
    #[test]
    fn overlap_is_a_fraction(q in "[a-z0-9 ]{0,40}", hay in "[a-z0-9 ]{0,80}") {
        let score = lexical_overlap_score(&tokenize(&q), &hay);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn short_words_never_score(q in "([a-z]{1,2} ){0,6}", hay in "[a-z ]{0,80}") {
        prop_assert_eq!(lexical_overlap_score(&tokenize(&q), &hay), 0.0);
    }

    #[test]
    fn no_reference_never_matches(chunk in "[a-z0-9() ]{0,80}") {
        prop_assert!(!matches(&chunk, None));
    }
}
