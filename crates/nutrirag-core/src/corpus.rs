//! Immutable in-memory passage table with precomputed dense embeddings.
//!
//! Built once at startup from a persisted embeddings table (CSV, one row per
//! passage). Loading is all-or-nothing: any malformed row is fatal, there is
//! no partial corpus.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::{Passage, PassageId};

/// One parsed row of the source table before normalization.
#[derive(Debug, Clone)]
pub struct CorpusRecord {
    pub text: String,
    pub locator: Option<String>,
    pub embedding: Vec<f32>,
}

/// Read-only owner of all passage data and embeddings for the process
/// lifetime. Indexes hold an `Arc` of this and are rebuilt only if the
/// store is reconstructed.
#[derive(Debug)]
pub struct CorpusStore {
    passages: Vec<Passage>,
    embeddings: Vec<Vec<f32>>,
    dim: usize,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "sentence_chunk")]
    text: String,
    #[serde(default, alias = "page_number")]
    locator: Option<String>,
    embedding: String,
}

impl CorpusStore {
    /// Load the persisted embeddings table. Row format: a text field
    /// (`text` or `sentence_chunk`), an optional locator field
    /// (`locator` or `page_number`), and an `embedding` field holding a
    /// stringified float vector such as `"[0.1, -0.2, 0.3]"`.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::CorpusLoad(format!("{}: {e}", path.display())))?;
        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<RawRow>().enumerate() {
            let row = row.map_err(|e| Error::CorpusLoad(format!("row {i}: {e}")))?;
            let embedding = parse_embedding(&row.embedding)
                .map_err(|e| Error::CorpusLoad(format!("row {i}: {e}")))?;
            records.push(CorpusRecord {
                text: row.text,
                locator: row.locator.filter(|s| !s.is_empty()),
                embedding,
            });
        }
        let store = Self::from_records(records)?;
        tracing::info!(
            passages = store.count(),
            dim = store.dim(),
            path = %path.display(),
            "corpus loaded"
        );
        Ok(store)
    }

    /// Build the store from already-parsed records. Validates that every
    /// passage is non-empty and every vector shares one dimensionality,
    /// then L2-normalizes each vector in place.
    pub fn from_records(records: Vec<CorpusRecord>) -> Result<Self> {
        let dim = records.first().map_or(0, |r| r.embedding.len());
        let mut passages = Vec::with_capacity(records.len());
        let mut embeddings = Vec::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            if record.text.trim().is_empty() {
                return Err(Error::CorpusLoad(format!("row {i}: empty passage text")));
            }
            if record.embedding.len() != dim {
                return Err(Error::CorpusLoad(format!(
                    "row {i}: embedding dim {} does not match corpus dim {dim}",
                    record.embedding.len()
                )));
            }
            let mut embedding = record.embedding;
            l2_normalize(&mut embedding);
            passages.push(Passage { text: record.text, locator: record.locator });
            embeddings.push(embedding);
        }
        Ok(Self { passages, embeddings, dim })
    }

    pub fn count(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Shared dimensionality of all corpus vectors (0 for an empty corpus).
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn text_at(&self, id: PassageId) -> &str {
        &self.passages[id].text
    }

    pub fn locator_at(&self, id: PassageId) -> Option<&str> {
        self.passages[id].locator.as_deref()
    }

    pub fn embedding_at(&self, id: PassageId) -> &[f32] {
        &self.embeddings[id]
    }

    /// The full normalized embedding matrix, row per passage id.
    pub fn embedding_matrix(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }
}

/// Normalize to unit L2 length in place. Near-zero vectors are left
/// untouched rather than amplified into noise.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 1e-6 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn parse_embedding(raw: &str) -> std::result::Result<Vec<f32>, String> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']').trim();
    if inner.is_empty() {
        return Err("empty embedding cell".to_string());
    }
    inner
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f32>()
                .map_err(|e| format!("bad embedding component {s:?}: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_embedding_bracketed() {
        let v = parse_embedding("[1.0, -2.5, 0.25]").expect("parse");
        assert_eq!(v, vec![1.0, -2.5, 0.25]);
    }

    #[test]
    fn parse_embedding_rejects_garbage() {
        assert!(parse_embedding("[1.0, x]").is_err());
        assert!(parse_embedding("").is_err());
    }

    #[test]
    fn normalize_unit_length() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }
}
