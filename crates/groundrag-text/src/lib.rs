//! groundrag-text
//!
//! Lexical side of retrieval: question tokenization and token overlap,
//! "pasal"/"ayat" citation matching, header/footer noise detection and the
//! line-window snippet extractor used for both context assembly and the
//! extractive fallback. Everything here is pure and allocation-light; no I/O.

pub mod noise;
pub mod reference;
pub mod snippet;
pub mod tokenize;

pub use reference::{extract_reference, LegalRef};
pub use snippet::{extract_best_snippet, extract_definition_snippet, extract_for_question, is_definition_question};
pub use tokenize::{lexical_overlap_score, tokenize};
