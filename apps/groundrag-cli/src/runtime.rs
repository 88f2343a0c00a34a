//! Wiring from settings to a ready `AnswerEngine`.

use std::sync::Arc;

use anyhow::{Context, Result};
use groundrag_core::config::{expand_path, Settings};
use groundrag_core::traits::{Embedder, Generator};
use groundrag_embed::get_default_embedder;
use groundrag_hybrid::{AnswerEngine, EngineOptions};
use groundrag_llm::{DisabledGenerator, OpenAiCompatibleGenerator};
use groundrag_vector::ChunkStore;
use tracing::{info, warn};

pub fn load_embedder() -> Result<Arc<dyn Embedder>> {
    Ok(Arc::from(get_default_embedder().context("loading embedding model")?))
}

pub fn build_generator(settings: &Settings, extractive_only: bool) -> Result<Arc<dyn Generator>> {
    if extractive_only {
        info!("generation disabled, answers are extractive");
        return Ok(Arc::new(DisabledGenerator));
    }
    if settings.generator.resolve_api_key().is_none() {
        warn!(
            "no API key in generator.api_key or {}; answers are extractive",
            settings.generator.api_key_env
        );
        return Ok(Arc::new(DisabledGenerator));
    }
    let generator = OpenAiCompatibleGenerator::from_settings(&settings.generator)?;
    info!(model = generator.model(), "generator ready");
    Ok(Arc::new(generator))
}

pub fn build_engine(settings: &Settings, extractive_only: bool) -> Result<AnswerEngine> {
    let corpus = expand_path(&settings.data.corpus_path);
    let store = ChunkStore::from_path(&corpus).with_context(|| format!("loading corpus {}", corpus.display()))?;
    if store.is_empty() {
        warn!(path = %corpus.display(), "corpus is empty; every question will be refused");
    }
    Ok(AnswerEngine::new(
        Arc::new(store),
        load_embedder()?,
        build_generator(settings, extractive_only)?,
        EngineOptions::from_settings(settings),
    ))
}
