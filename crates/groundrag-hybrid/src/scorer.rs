use std::cmp::Ordering;

use groundrag_core::config::RagSettings;
use groundrag_text::reference::matches;
use groundrag_text::{extract_reference, lexical_overlap_score, tokenize, LegalRef};
use groundrag_vector::{cosine_with_norm, l2_norm, Chunk};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub semantic: f32,
    pub lexical: f32,
    pub reference_boost: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self { semantic: 0.80, lexical: 0.20, reference_boost: 0.25 }
    }
}

impl From<&RagSettings> for ScoringWeights {
    fn from(rag: &RagSettings) -> Self {
        Self { semantic: rag.semantic_weight, lexical: rag.lexical_weight, reference_boost: rag.reference_boost }
    }
}

/// Per-request view of the question; the embedding norm is computed once here.
#[derive(Debug, Clone)]
pub struct Query {
    pub tokens: Vec<String>,
    pub embedding: Vec<f32>,
    pub norm: f32,
    pub reference: Option<LegalRef>,
}

impl Query {
    pub fn new(question: &str, embedding: Vec<f32>) -> Self {
        let norm = l2_norm(&embedding);
        Self { tokens: tokenize(question), embedding, norm, reference: extract_reference(question) }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub semantic: f32,
    pub lexical: f32,
    pub boost: f32,
    pub score: f32,
}

pub fn score<'a>(query: &Query, chunk: &'a Chunk, weights: &ScoringWeights) -> ScoredChunk<'a> {
    let semantic = cosine_with_norm(&query.embedding, query.norm, &chunk.embedding, chunk.norm);
    let lexical = lexical_overlap_score(&query.tokens, &chunk.text_lower);
    let boost = if matches(&chunk.text_lower, query.reference.as_ref()) { weights.reference_boost } else { 0.0 };
    let score = weights.semantic * semantic + weights.lexical * lexical + boost;
    ScoredChunk { chunk, semantic, lexical, boost, score }
}

/// Score every chunk and return the best `top_k`, highest first.
///
/// A citation in the question narrows the candidates to the chunks that quote
/// it; when none do, the full set is ranked instead. The sort is stable, so
/// equal scores keep store order.
pub fn rank<'a>(query: &Query, chunks: &'a [Chunk], weights: &ScoringWeights, top_k: usize) -> Vec<ScoredChunk<'a>> {
    let mut scored: Vec<ScoredChunk<'a>> = chunks.iter().map(|c| score(query, c, weights)).collect();
    if let Some(reference) = &query.reference {
        let filtered: Vec<ScoredChunk<'a>> =
            scored.iter().copied().filter(|s| matches(&s.chunk.text_lower, Some(reference))).collect();
        if !filtered.is_empty() {
            scored = filtered;
        }
    }
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(top_k);
    scored
}
