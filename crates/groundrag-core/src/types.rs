//! Domain types shared by the retrieval, grounding and session crates.

use serde::{Deserialize, Serialize};

pub type ChunkKey = String;

/// A unit of source text cut from a document, before it is embedded.
///
/// - `key`: corpus key (file name, or `{file}_chunk_{i}` when split)
/// - `doc_path`: original path to the source file
/// - `content`: the text payload of the chunk
/// - `chunk_index`/`total_chunks`: position within the parent document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub key: ChunkKey,
    pub doc_path: String,
    pub content: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

/// One persisted corpus record, stored under its key in the corpus file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub text: String,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    /// Speaker label used when history is folded into a prompt.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "User",
            Sender::Ai => "AI",
        }
    }
}

/// A prior turn handed to the engine as advisory prompt context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub sender: Sender,
    pub text: String,
}

impl HistoryEntry {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self { sender, text: text.into() }
    }
}

/// Inputs of a single generator call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The result of answering one question.
///
/// `answer` is what the caller displays; `raw_answer` is the verbatim text
/// before any display shaping. `context_used` is the exact grounding text the
/// answer was checked against (empty on refusal). `used_generator` is true
/// only when a generated answer passed verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub answer: String,
    pub raw_answer: String,
    pub context_used: String,
    pub used_generator: bool,
    #[serde(default)]
    pub refused: bool,
}

impl Answer {
    pub fn refusal(message: &str) -> Self {
        Self {
            answer: message.to_string(),
            raw_answer: message.to_string(),
            context_used: String::new(),
            used_generator: false,
            refused: true,
        }
    }
}
