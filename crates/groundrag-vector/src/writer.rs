use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;
use tracing::info;

use groundrag_core::traits::Embedder;
use groundrag_core::types::{CorpusEntry, DocumentChunk};

/// Embeds document chunks and writes the ordered `key -> { text, embedding }` corpus file.
pub struct CorpusWriter<'a> {
    embedder: &'a dyn Embedder,
    batch_size: usize,
    show_progress: bool,
}

impl<'a> CorpusWriter<'a> {
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self { embedder, batch_size: 16, show_progress: true }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Embed every chunk, keeping input order.
    pub fn embed_chunks(&self, chunks: &[DocumentChunk]) -> Result<Vec<(String, CorpusEntry)>> {
        let pb = if self.show_progress { ProgressBar::new(chunks.len() as u64) } else { ProgressBar::hidden() };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")?
                .progress_chars("#>-"),
        );
        let mut out = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
            let vectors = self.embedder.embed_batch(&texts)?;
            anyhow::ensure!(
                vectors.len() == batch.len(),
                "embedder returned {} vectors for {} chunks",
                vectors.len(),
                batch.len()
            );
            for (chunk, embedding) in batch.iter().zip(vectors) {
                out.push((chunk.key.clone(), CorpusEntry { text: chunk.content.clone(), embedding }));
                pb.inc(1);
            }
            if let Some(last) = batch.last() {
                pb.set_message(last.key.clone());
            }
        }
        pb.finish_with_message("embedded");
        Ok(out)
    }

    /// Embed `chunks` and write them to `path`. Returns the number of entries written.
    pub fn write(&self, chunks: &[DocumentChunk], path: &Path) -> Result<usize> {
        let entries = self.embed_chunks(chunks)?;
        let mut mapping = Map::with_capacity(entries.len());
        for (key, entry) in entries {
            mapping.insert(key, serde_json::to_value(entry)?);
        }
        let count = mapping.len();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut out = std::io::BufWriter::new(file);
        serde_json::to_writer(&mut out, &Value::Object(mapping))?;
        out.flush()?;
        info!(path = %path.display(), entries = count, dim = self.embedder.dim(), "corpus written");
        Ok(count)
    }
}
