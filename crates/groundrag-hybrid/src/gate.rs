use groundrag_core::config::RagSettings;

use crate::scorer::ScoredChunk;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    Answerable { threshold: f32 },
    Refused { threshold: f32 },
}

impl GateDecision {
    pub fn is_answerable(self) -> bool {
        matches!(self, GateDecision::Answerable { .. })
    }

    pub fn threshold(self) -> f32 {
        match self {
            GateDecision::Answerable { threshold } | GateDecision::Refused { threshold } => threshold,
        }
    }
}

/// Decides from the best score and the question length whether to answer.
///
/// Short questions carry little lexical signal, so they must clear a
/// slightly higher bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceGate {
    pub threshold: f32,
    pub short_query_threshold: f32,
    pub short_query_max_tokens: usize,
}

impl Default for RelevanceGate {
    fn default() -> Self {
        Self { threshold: 0.45, short_query_threshold: 0.48, short_query_max_tokens: 4 }
    }
}

impl From<&RagSettings> for RelevanceGate {
    fn from(rag: &RagSettings) -> Self {
        Self {
            threshold: rag.threshold,
            short_query_threshold: rag.short_query_threshold,
            short_query_max_tokens: rag.short_query_max_tokens,
        }
    }
}

impl RelevanceGate {
    pub fn threshold_for(&self, token_count: usize) -> f32 {
        if token_count <= self.short_query_max_tokens { self.short_query_threshold } else { self.threshold }
    }

    pub fn decide(&self, top: Option<&ScoredChunk<'_>>, token_count: usize) -> GateDecision {
        let threshold = self.threshold_for(token_count);
        match top {
            Some(best) if best.score >= threshold => GateDecision::Answerable { threshold },
            _ => GateDecision::Refused { threshold },
        }
    }
}
