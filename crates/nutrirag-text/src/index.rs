use std::collections::HashMap;
use std::sync::Arc;

use nutrirag_core::corpus::CorpusStore;
use nutrirag_core::traits::LexicalIndex;
use nutrirag_core::types::PassageId;

const K1: f32 = 1.5;
const B: f32 = 0.75;

/// Lowercase whitespace tokenization, shared by index build and querying.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Okapi BM25 over every passage in the corpus.
///
/// Term statistics are derived at build time; the store itself stays the
/// single owner of passage text. Scores are non-negative (Lucene-style
/// smoothed IDF) and deterministic for a fixed corpus and query.
pub struct Bm25Index {
    corpus: Arc<CorpusStore>,
    term_freqs: Vec<HashMap<String, u32>>,
    doc_lens: Vec<f32>,
    doc_freq: HashMap<String, u32>,
    avg_doc_len: f32,
}

impl Bm25Index {
    pub fn build(corpus: Arc<CorpusStore>) -> Self {
        let n = corpus.count();
        let mut term_freqs: Vec<HashMap<String, u32>> = Vec::with_capacity(n);
        let mut doc_lens: Vec<f32> = Vec::with_capacity(n);
        let mut doc_freq: HashMap<String, u32> = HashMap::new();
        for id in 0..n {
            let tokens = tokenize(corpus.text_at(id));
            doc_lens.push(tokens.len() as f32);
            let mut freqs: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *freqs.entry(token).or_insert(0) += 1;
            }
            for term in freqs.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            term_freqs.push(freqs);
        }
        let avg_doc_len = if n == 0 {
            1.0
        } else {
            (doc_lens.iter().sum::<f32>() / n as f32).max(1.0)
        };
        tracing::debug!(passages = n, terms = doc_freq.len(), "bm25 index built");
        Self { corpus, term_freqs, doc_lens, doc_freq, avg_doc_len }
    }

    pub fn corpus(&self) -> &Arc<CorpusStore> {
        &self.corpus
    }

    fn score_one(&self, id: PassageId, query_tokens: &[String]) -> f32 {
        let n = self.term_freqs.len() as f32;
        let len_norm = 1.0 - B + B * self.doc_lens[id] / self.avg_doc_len;
        let mut score = 0.0;
        for token in query_tokens {
            let Some(&df) = self.doc_freq.get(token) else { continue };
            let tf = self.term_freqs[id].get(token).copied().unwrap_or(0) as f32;
            if tf == 0.0 {
                continue;
            }
            let idf = (1.0 + (n - df as f32 + 0.5) / (df as f32 + 0.5)).ln();
            score += idf * tf * (K1 + 1.0) / (tf + K1 * len_norm);
        }
        score
    }
}

impl LexicalIndex for Bm25Index {
    fn score_all(&self, query_tokens: &[String]) -> Vec<(PassageId, f32)> {
        (0..self.term_freqs.len())
            .map(|id| (id, self.score_one(id, query_tokens)))
            .collect()
    }

    fn top_n(&self, query_tokens: &[String], n: usize) -> Vec<PassageId> {
        let mut scored = self.score_all(query_tokens);
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(n);
        scored.into_iter().map(|(id, _)| id).collect()
    }
}
