use groundrag_hybrid::{normalize, rank, score, verify, Query, ScoringWeights};
use groundrag_vector::Chunk;
use proptest::prelude::*;

fn chunks_from(texts: &[String]) -> Vec<Chunk> {
    texts.iter().enumerate().map(|(i, t)| Chunk::new(format!("c{i}"), t.as_str(), vec![(i % 3) as f32, 1.0])).collect()
}

proptest! {
    #[test]
    fn score_is_bit_identical_on_repeat(text in "[a-z0-9 ()]{0,60}", question in "[a-z0-9 ]{0,40}") {
        let chunk = Chunk::new("k", text.as_str(), vec![0.3, 0.4, 0.5]);
        let query = Query::new(&question, vec![0.5, 0.1, 0.9]);
        let w = ScoringWeights::default();
        prop_assert_eq!(score(&query, &chunk, &w).score.to_bits(), score(&query, &chunk, &w).score.to_bits());
    }

    #[test]
    fn unmatched_citation_ranks_like_no_citation(texts in proptest::collection::vec("[a-z ]{0,40}", 1..8)) {
        // Generated texts never contain digits, so "pasal 77" matches nothing.
        let chunks = chunks_from(&texts);
        let w = ScoringWeights::default();
        let cited = Query::new("hukum pasal 77", vec![1.0, 0.5]);
        let plain = Query { reference: None, ..cited.clone() };
        let a: Vec<(String, u32)> = rank(&cited, &chunks, &w, 3).iter().map(|s| (s.chunk.key.clone(), s.score.to_bits())).collect();
        let b: Vec<(String, u32)> = rank(&plain, &chunks, &w, 3).iter().map(|s| (s.chunk.key.clone(), s.score.to_bits())).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn ranking_is_descending(texts in proptest::collection::vec("[a-z ]{0,40}", 0..10), question in "[a-z ]{0,30}") {
        let chunks = chunks_from(&texts);
        let ranked = rank(&Query::new(&question, vec![1.0, 1.0]), &chunks, &ScoringWeights::default(), 10);
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn verify_matches_normalized_containment(context in "[a-zA-Z \n\r\t]{0,80}", start in 0usize..80, len in 0usize..40) {
        let norm_ctx = normalize(&context);
        let chars: Vec<char> = norm_ctx.chars().collect();
        let s = start.min(chars.len());
        let e = (s + len).min(chars.len());
        let slice: String = chars[s..e].iter().collect();
        prop_assert_eq!(verify(&slice, &context), !normalize(&slice).is_empty());
    }

    #[test]
    fn empty_answer_never_verifies(context in ".{0,80}") {
        prop_assert!(!verify("", &context));
    }
}
