//! Lightweight configuration loader, typed settings and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` +
//! `config.<env>.toml` + `APP_*` env vars (`__` separates nested keys, so
//! `APP_RAG__THRESHOLD=0.5` overrides `rag.threshold`). Provides helpers to
//! expand `~` and `${VAR}` and to resolve relative paths against a known base
//! directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate_for_env(&env_name)?;
        Ok(config)
    }

    /// Wrap an already-assembled figment, layered over the built-in defaults.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment: Figment::from(Serialized::defaults(Settings::default())).merge(figment) }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extract and validate the full typed settings tree.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        let settings = self.settings()?;
        match env {
            "prod" | "production" => {
                if settings.generator.resolve_api_key().is_none() {
                    return Err(Error::InvalidConfig(format!(
                        "production requires an API key (set generator.api_key or {})",
                        settings.generator.api_key_env
                    ))
                    .into());
                }
            }
            "dev" | "development" => {}
            "test" | "testing" => {}
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub rag: RagSettings,
    pub generator: GeneratorSettings,
    pub server: ServerSettings,
    pub sessions: SessionSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), Error> {
        let rag = &self.rag;
        let unit = [
            ("rag.semantic_weight", rag.semantic_weight),
            ("rag.lexical_weight", rag.lexical_weight),
            ("rag.threshold", rag.threshold),
            ("rag.short_query_threshold", rag.short_query_threshold),
        ];
        for (key, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!("{key} must be within [0, 1], got {value}")));
            }
        }
        if rag.reference_boost.is_nan() || rag.reference_boost < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "rag.reference_boost must be non-negative, got {}",
                rag.reference_boost
            )));
        }
        if rag.top_k == 0 {
            return Err(Error::InvalidConfig("rag.top_k must be at least 1".into()));
        }
        if rag.max_answer_chars == 0 {
            return Err(Error::InvalidConfig("rag.max_answer_chars must be at least 1".into()));
        }
        if self.generator.max_tokens == 0 || self.generator.retry_max_tokens == 0 {
            return Err(Error::InvalidConfig("generator token budgets must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Corpus file: JSON object of key -> { text, embedding }.
    pub corpus_path: String,
    /// Source documents read by the indexer.
    pub docs_dir: String,
    /// Split documents into chunks of at most this many characters; one chunk per file when unset.
    pub chunk_chars: Option<usize>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self { corpus_path: "embeddings.json".into(), docs_dir: "docsTxt".into(), chunk_chars: None }
    }
}

/// Retrieval, gating and grounding knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    pub semantic_weight: f32,
    pub lexical_weight: f32,
    pub reference_boost: f32,
    pub threshold: f32,
    pub short_query_threshold: f32,
    pub short_query_max_tokens: usize,
    pub top_k: usize,
    pub history_limit: usize,
    pub max_answer_chars: usize,
    pub embed_timeout_secs: u64,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            semantic_weight: 0.80,
            lexical_weight: 0.20,
            reference_boost: 0.25,
            threshold: 0.45,
            short_query_threshold: 0.48,
            short_query_max_tokens: 4,
            top_k: 3,
            history_limit: 6,
            max_answer_chars: 2200,
            embed_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub retry_max_tokens: u32,
    pub timeout_secs: u64,
}

impl GeneratorSettings {
    /// Explicit key first, then the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| env::var(&self.api_key_env).ok().filter(|k| !k.is_empty()))
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".into(),
            model: "llama-3.3-70b-versatile".into(),
            api_key: None,
            api_key_env: "GROQ_API_KEY".into(),
            temperature: 0.0,
            max_tokens: 600,
            retry_max_tokens: 400,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3001 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub welcome_message: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            welcome_message: "Halo 👋\n\nAku adalah **PancaAI**, asisten AI untuk mata kuliah **PPKN**. \
                              Silakan ajukan pertanyaan pertamamu 😊"
                .into(),
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
