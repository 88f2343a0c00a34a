//! In-memory chunk store loaded from the persisted corpus mapping.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

use groundrag_core::error::{Error, Result};

use crate::similarity::l2_norm;

/// One corpus chunk with everything scoring needs precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub key: String,
    pub text: String,
    pub text_lower: String,
    pub embedding: Vec<f32>,
    pub norm: f32,
}

impl Chunk {
    pub fn new(key: impl Into<String>, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        let text = text.into();
        let text_lower = text.to_lowercase();
        let norm = l2_norm(&embedding);
        Self { key: key.into(), text, text_lower, embedding, norm }
    }
}

/// Immutable, file-ordered chunk collection shared by every request.
#[derive(Debug, Clone, Default)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
}

impl ChunkStore {
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    /// Build the store from a `key -> { text, embedding }` JSON object.
    ///
    /// Embedding values may be numbers or numeric strings. Anything else is a
    /// load error naming the offending key, as is a non-object root or entry.
    pub fn load(mapping: &Value) -> Result<Self> {
        let Value::Object(entries) = mapping else {
            return Err(Error::Load(format!("corpus root must be a JSON object, found {}", kind(mapping))));
        };
        let mut chunks = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            chunks.push(load_entry(key, entry)?);
        }
        debug!(chunks = chunks.len(), "corpus mapping loaded");
        Ok(Self { chunks })
    }

    /// Read and load a corpus file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Load(format!("cannot read {}: {e}", path.display())))?;
        let mapping: Value = serde_json::from_str(&raw)
            .map_err(|e| Error::Load(format!("{} is not valid JSON: {e}", path.display())))?;
        let store = Self::load(&mapping)?;
        info!(path = %path.display(), chunks = store.len(), "corpus ready");
        Ok(store)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

fn load_entry(key: &str, entry: &Value) -> Result<Chunk> {
    let Value::Object(fields) = entry else {
        return Err(Error::Load(format!("entry '{key}' must be an object, found {}", kind(entry))));
    };
    let text = match fields.get("text") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => return Err(Error::Load(format!("entry '{key}': text must be a string, found {}", kind(other)))),
    };
    let embedding = embedding_of(key, fields)?;
    Ok(Chunk::new(key, text, embedding))
}

fn embedding_of(key: &str, fields: &Map<String, Value>) -> Result<Vec<f32>> {
    let values = match fields.get("embedding") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(values)) => values,
        Some(other) => {
            return Err(Error::Load(format!("entry '{key}': embedding must be an array, found {}", kind(other))))
        }
    };
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            coerce_number(v).ok_or_else(|| {
                Error::Load(format!("entry '{key}': embedding[{i}] is not numeric ({})", kind(v)))
            })
        })
        .collect()
}

fn coerce_number(v: &Value) -> Option<f32> {
    match v {
        Value::Number(n) => n.as_f64().map(|x| x as f32),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()).map(|x| x as f32),
        _ => None,
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn load_keeps_file_order_and_precomputes() {
        let store = ChunkStore::load(&json!({
            "b.txt": { "text": "Pasal 28", "embedding": [3.0, 4.0] },
            "a.txt": { "text": "HAM", "embedding": [0.1] },
        }))
        .expect("load");
        let keys: Vec<&str> = store.chunks().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["b.txt", "a.txt"]);
        assert_eq!(store.chunks()[0].text_lower, "pasal 28");
        assert!((store.chunks()[0].norm - 5.0).abs() < 1e-6);
        assert_eq!(store.chunks()[1].norm, 1.0);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let store = ChunkStore::load(&json!({ "k": { "text": "t", "embedding": ["0.5", 1, " -2 "] } })).expect("load");
        assert_eq!(store.chunks()[0].embedding, vec![0.5, 1.0, -2.0]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let store = ChunkStore::load(&json!({ "k": {} })).expect("load");
        assert_eq!(store.chunks()[0].text, "");
        assert!(store.chunks()[0].embedding.is_empty());
        assert_eq!(store.chunks()[0].norm, 1.0);
    }

    #[test]
    fn empty_mapping_is_valid() {
        assert!(ChunkStore::load(&json!({})).expect("load").is_empty());
    }

    #[test]
    fn malformed_input_is_a_load_error() {
        for bad in [
            json!([1, 2]),
            json!({ "k": "not an object" }),
            json!({ "k": { "embedding": "1,2" } }),
            json!({ "k": { "embedding": [1, "x"] } }),
            json!({ "k": { "embedding": [null] } }),
        ] {
            assert!(matches!(ChunkStore::load(&bad), Err(Error::Load(_))), "{bad}");
        }
    }

    #[test]
    fn load_error_names_the_key() {
        let err = ChunkStore::load(&json!({ "bab2.txt": { "embedding": [true] } })).expect_err("bool");
        assert!(err.to_string().contains("bab2.txt"));
    }
}
