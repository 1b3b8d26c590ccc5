use std::sync::Arc;

use nutrirag_core::corpus::{CorpusRecord, CorpusStore};
use nutrirag_core::traits::VectorIndex;
use nutrirag_vector::FlatIndex;

fn corpus(embeddings: &[&[f32]]) -> Arc<CorpusStore> {
    let records = embeddings
        .iter()
        .enumerate()
        .map(|(i, e)| CorpusRecord {
            text: format!("passage {i}"),
            locator: None,
            embedding: e.to_vec(),
        })
        .collect();
    Arc::new(CorpusStore::from_records(records).expect("corpus"))
}

#[test]
fn nearest_first_exact_order() {
    let index = FlatIndex::new(corpus(&[
        &[0.0, 1.0],  // orthogonal to query
        &[1.0, 0.0],  // identical to query
        &[1.0, 1.0],  // 45 degrees
    ]));
    let top = index.top_n(&[1.0, 0.0], 3).expect("search");
    assert_eq!(top, vec![1, 2, 0]);
}

#[test]
fn ties_resolve_to_ascending_id() {
    let index = FlatIndex::new(corpus(&[
        &[0.0, 1.0],
        &[1.0, 0.0],
        &[1.0, 0.0],
    ]));
    let top = index.top_n(&[1.0, 0.0], 3).expect("search");
    assert_eq!(top, vec![1, 2, 0], "duplicate vectors keep corpus order");
}

#[test]
fn unnormalized_query_matches_normalized_query() {
    let index = FlatIndex::new(corpus(&[&[0.2, 0.9], &[0.9, 0.1], &[0.5, 0.5]]));
    let a = index.top_n(&[10.0, 2.0], 3).expect("search");
    let b = index.top_n(&[1.0, 0.2], 3).expect("search");
    assert_eq!(a, b, "queries are normalized with the corpus procedure");
}

#[test]
fn n_beyond_corpus_returns_fewer() {
    let index = FlatIndex::new(corpus(&[&[1.0, 0.0]]));
    assert_eq!(index.top_n(&[1.0, 0.0], 30).expect("search").len(), 1);
}

#[test]
fn empty_corpus_returns_empty() {
    let index = FlatIndex::new(Arc::new(CorpusStore::from_records(vec![]).expect("corpus")));
    assert!(index.top_n(&[1.0, 0.0], 5).expect("search").is_empty());
}

#[test]
fn dim_mismatch_is_an_error() {
    let index = FlatIndex::new(corpus(&[&[1.0, 0.0]]));
    assert!(index.top_n(&[1.0, 0.0, 0.0], 5).is_err());
}
