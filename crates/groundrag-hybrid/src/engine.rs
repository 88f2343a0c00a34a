//! The question-answering pipeline: embed, rank, gate, build context,
//! generate, verify, fall back.

use std::sync::Arc;
use std::time::Duration;

use groundrag_core::config::{RagSettings, Settings};
use groundrag_core::error::{Error, Result};
use groundrag_core::traits::{Embedder, Generator};
use groundrag_core::types::{Answer, GenerationRequest, HistoryEntry};
use groundrag_text::extract_for_question;
use groundrag_vector::ChunkStore;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::gate::RelevanceGate;
use crate::grounding::{clamp_answer, verify};
use crate::prompt::{self, CONTEXT_SEPARATOR, NOT_FOUND, REFUSAL_MESSAGE};
use crate::scorer::{rank, Query, ScoredChunk, ScoringWeights};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub rag: RagSettings,
    pub temperature: f32,
    pub max_tokens: u32,
    pub retry_max_tokens: u32,
    pub generation_timeout: Duration,
    pub embed_timeout: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl EngineOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rag: settings.rag.clone(),
            temperature: settings.generator.temperature,
            max_tokens: settings.generator.max_tokens,
            retry_max_tokens: settings.generator.retry_max_tokens,
            generation_timeout: Duration::from_secs(settings.generator.timeout_secs),
            embed_timeout: Duration::from_secs(settings.rag.embed_timeout_secs),
        }
    }
}

/// Answers questions from an immutable chunk store.
///
/// Cheap to share: everything is behind `Arc`, and `answer` takes `&self`.
pub struct AnswerEngine {
    store: Arc<ChunkStore>,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    weights: ScoringWeights,
    gate: RelevanceGate,
    options: EngineOptions,
}

/// Outcome of the synchronous half of a request.
#[derive(Debug)]
pub struct Retrieval<'a> {
    pub ranked: Vec<ScoredChunk<'a>>,
    pub threshold: f32,
    pub answerable: bool,
}

impl AnswerEngine {
    pub fn new(
        store: Arc<ChunkStore>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
        options: EngineOptions,
    ) -> Self {
        let weights = ScoringWeights::from(&options.rag);
        let gate = RelevanceGate::from(&options.rag);
        Self { store, embedder, generator, weights, gate, options }
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Rank the store against a question whose embedding is already known.
    pub fn retrieve(&self, question: &str, query_embedding: Vec<f32>) -> Retrieval<'_> {
        let query = Query::new(question, query_embedding);
        let ranked = rank(&query, self.store.chunks(), &self.weights, self.options.rag.top_k);
        for s in &ranked {
            debug!(key = %s.chunk.key, score = s.score, semantic = s.semantic, lexical = s.lexical, boost = s.boost, "ranked");
        }
        let decision = self.gate.decide(ranked.first(), query.tokens.len());
        let top = ranked.first();
        info!(
            question,
            threshold = decision.threshold(),
            top_score = top.map_or(0.0, |t| t.score),
            semantic = top.map_or(0.0, |t| t.semantic),
            lexical = top.map_or(0.0, |t| t.lexical),
            "retrieval"
        );
        Retrieval { ranked, threshold: decision.threshold(), answerable: decision.is_answerable() }
    }

    /// Answer `question`, using `history` (oldest first) as advisory memory.
    ///
    /// Only a failed or timed-out query embedding is an error; refusals and
    /// generator trouble come back as ordinary answers.
    pub async fn answer(&self, question: &str, history: &[HistoryEntry]) -> Result<Answer> {
        let embedding = self.embed_query(question).await?;
        let retrieval = self.retrieve(question, embedding);
        if !retrieval.answerable {
            return Ok(Answer::refusal(REFUSAL_MESSAGE));
        }

        let context = retrieval
            .ranked
            .iter()
            .map(|s| extract_for_question(question, &s.chunk.text))
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);
        let top_text = retrieval.ranked[0].chunk.text.clone();

        let (raw, used_generator) = match self.generate_grounded(question, &context, history).await {
            Some(verified) => (verified, true),
            None => (extract_for_question(question, &top_text), false),
        };
        Ok(Answer { answer: raw.clone(), raw_answer: raw, context_used: context, used_generator, refused: false })
    }

    async fn embed_query(&self, question: &str) -> Result<Vec<f32>> {
        let embedder = Arc::clone(&self.embedder);
        let text = question.to_string();
        let task = tokio::task::spawn_blocking(move || embedder.embed(&text));
        match timeout(self.options.embed_timeout, task).await {
            Ok(Ok(Ok(v))) => Ok(v),
            Ok(Ok(Err(e))) => Err(Error::Embedding(format!("{e:#}"))),
            Ok(Err(join)) => Err(Error::Embedding(format!("embedding task failed: {join}"))),
            Err(_) => Err(Error::Embedding(format!("timed out after {:?}", self.options.embed_timeout))),
        }
    }

    /// First pass with memory, stricter retry without. `None` means fall back
    /// to extraction: both candidates failed verification, or the generator
    /// errored or timed out (no further attempt is made after an error).
    async fn generate_grounded(&self, question: &str, context: &str, history: &[HistoryEntry]) -> Option<String> {
        let attempts = [
            (
                prompt::FIRST_PASS_SYSTEM,
                prompt::first_pass_prompt(question, context, history, self.options.rag.history_limit),
                self.options.max_tokens,
            ),
            (prompt::RETRY_SYSTEM, prompt::retry_prompt(question, context), self.options.retry_max_tokens),
        ];
        for (pass, (system, user, max_tokens)) in attempts.into_iter().enumerate() {
            let request = GenerationRequest {
                system_prompt: system.to_string(),
                user_prompt: user,
                temperature: self.options.temperature,
                max_tokens,
            };
            let candidate = match self.call_generator(&request).await {
                Ok(text) => clamp_answer(&text, self.options.rag.max_answer_chars),
                Err(e) => {
                    warn!(error = %e, pass = pass + 1, "generator failed, using extractive answer");
                    return None;
                }
            };
            if candidate.is_empty() || candidate == NOT_FOUND {
                debug!(pass = pass + 1, "generator found nothing to quote");
                continue;
            }
            if verify(&candidate, context) {
                return Some(candidate);
            }
            warn!(pass = pass + 1, "generated answer is not a verbatim quote of the context");
        }
        None
    }

    async fn call_generator(&self, request: &GenerationRequest) -> Result<String> {
        match timeout(self.options.generation_timeout, self.generator.generate(request)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(Error::Generation(format!("{}: {e:#}", self.generator.name()))),
            Err(_) => Err(Error::Generation(format!(
                "{} timed out after {:?}",
                self.generator.name(),
                self.options.generation_timeout
            ))),
        }
    }
}
