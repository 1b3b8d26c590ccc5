//! nutrirag-text
//!
//! In-memory lexical (BM25) index over the corpus store. Whole-corpus
//! scoring with lowercase whitespace tokenization; deliberately no stemming
//! or stop-word removal so behavior is corpus-independent.

pub mod index;

pub use index::{tokenize, Bm25Index};
