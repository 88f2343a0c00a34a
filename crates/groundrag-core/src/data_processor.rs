use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::DocumentChunk;

#[derive(Debug, Clone, Default)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk; `None` keeps each document whole.
    pub max_chars: Option<usize>,
}

#[derive(Default)]
pub struct DataProcessor {
    chunking_config: ChunkingConfig,
}

impl DataProcessor {
    pub fn new() -> Self { Self::default() }

    pub fn with_chunk_chars(max_chars: Option<usize>) -> Self {
        Self { chunking_config: ChunkingConfig { max_chars: max_chars.filter(|n| *n > 0) } }
    }

    /// Read every `.txt`/`.md` file under `data_dir` (sorted by path) into chunks.
    /// Files that are empty after trimming are skipped.
    pub fn process_directory(&self, data_dir: &Path) -> Result<Vec<DocumentChunk>> {
        anyhow::ensure!(data_dir.is_dir(), "documents directory {} does not exist", data_dir.display());
        let files = self.list_source_files(data_dir);
        if files.is_empty() {
            tracing::warn!("No .txt/.md files found under {}", data_dir.display());
            return Ok(vec![]);
        }
        let mut all_chunks = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            let content = self.read_file_content(file_path)?;
            let content = content.trim();
            if content.is_empty() {
                tracing::warn!("⚠️  [{}/{}] {} is empty, skipped", file_index + 1, files.len(), file_path.display());
                continue;
            }
            tracing::debug!("Processing file {}/{}: {}", file_index + 1, files.len(), file_path.display());
            let key = self.document_key(file_path, data_dir);
            all_chunks.extend(self.chunk_content(content, &key, file_path));
        }
        tracing::info!("Processed {} files into {} chunks", files.len(), all_chunks.len());
        Ok(all_chunks)
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        match fs::read_to_string(file_path) {
            Ok(content) => Ok(content),
            Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
        }
    }

    /// Path relative to the documents root, `/`-separated; the bare file name for flat layouts.
    fn document_key(&self, file_path: &Path, data_dir: &Path) -> String {
        let relative = file_path.strip_prefix(data_dir).unwrap_or(file_path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn chunk_content(&self, content: &str, key: &str, file_path: &Path) -> Vec<DocumentChunk> {
        let doc_path = file_path.to_string_lossy().to_string();
        let Some(max_chars) = self.chunking_config.max_chars else {
            return vec![DocumentChunk { key: key.to_string(), doc_path, content: content.to_string(), chunk_index: 0, total_chunks: 1 }];
        };
        let chars: Vec<char> = content.chars().collect();
        let mut document_chunks: Vec<DocumentChunk> = chars
            .chunks(max_chars)
            .map(|window| window.iter().collect::<String>())
            .filter(|text| !text.trim().is_empty())
            .enumerate()
            .map(|(chunk_index, text)| DocumentChunk {
                key: format!("{}_chunk_{}", key, chunk_index),
                doc_path: doc_path.clone(),
                content: text,
                chunk_index,
                total_chunks: 0,
            })
            .collect();
        let total_chunks = document_chunks.len();
        for chunk in &mut document_chunks { chunk.total_chunks = total_chunks; }
        document_chunks
    }

    fn list_source_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if matches!(path.extension().and_then(|s| s.to_str()), Some("txt") | Some("md")) { files.push(path.to_path_buf()); }
        }
        files.sort();
        files
    }
}
