//! groundrag-vector
//!
//! The semantic side of retrieval. Corpora are small (hundreds to low
//! thousands of chunks), so there is no index structure: the whole corpus is
//! held in memory as a [`ChunkStore`] and every question is scored against
//! every chunk with [`cosine_with_norm`].
//!
//! [`CorpusWriter`] is the offline half: it embeds document chunks and writes
//! the JSON corpus file that [`ChunkStore::from_path`] reads back.

pub mod similarity;
pub mod store;
pub mod writer;

pub use similarity::{cosine_with_norm, dot, l2_norm};
pub use store::{Chunk, ChunkStore};
pub use writer::CorpusWriter;
