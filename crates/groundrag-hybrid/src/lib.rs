//! groundrag-hybrid
//!
//! Fuses the semantic and lexical signals into one ranking, gates on
//! relevance, and runs the generate/verify/retry/fallback protocol that keeps
//! every answer a literal quote of the retrieved context.

pub mod engine;
pub mod gate;
pub mod grounding;
pub mod prompt;
pub mod scorer;

pub use engine::{AnswerEngine, EngineOptions};
pub use gate::{GateDecision, RelevanceGate};
pub use grounding::{clamp_answer, normalize, verify};
pub use scorer::{rank, score, Query, ScoredChunk, ScoringWeights};
