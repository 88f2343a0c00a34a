//! groundrag-core
//!
//! Shared domain types, the error taxonomy, configuration and the
//! `Embedder`/`Generator` seams that the retrieval engine is written against.

pub mod config;
pub mod data_processor;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
