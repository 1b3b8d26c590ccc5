use std::fs;

use tempfile::TempDir;

use nutrirag_core::corpus::{CorpusRecord, CorpusStore};
use nutrirag_core::error::Error;

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

#[test]
fn load_csv_with_original_headers() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_csv(
        &tmp,
        "embeddings.csv",
        "sentence_chunk,page_number,embedding\n\
         brown rice is high in selenium,12,\"[1.0, 0.0]\"\n\
         porridge recipes for breakfast,,\"[0.0, 1.0]\"\n",
    );

    let store = CorpusStore::from_csv_path(&path).expect("load");
    assert_eq!(store.count(), 2);
    assert_eq!(store.dim(), 2);
    assert_eq!(store.text_at(0), "brown rice is high in selenium");
    assert_eq!(store.locator_at(0), Some("12"));
    assert_eq!(store.locator_at(1), None, "empty locator cell maps to None");
}

#[test]
fn load_normalizes_embeddings() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_csv(
        &tmp,
        "embeddings.csv",
        "text,locator,embedding\nsome passage,,\"[3.0, 4.0]\"\n",
    );

    let store = CorpusStore::from_csv_path(&path).expect("load");
    let v = store.embedding_at(0);
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5, "stored vector is unit length (norm={norm})");
}

#[test]
fn header_only_table_is_an_empty_corpus() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_csv(&tmp, "embeddings.csv", "text,locator,embedding\n");

    let store = CorpusStore::from_csv_path(&path).expect("load");
    assert_eq!(store.count(), 0);
    assert_eq!(store.dim(), 0);
}

#[test]
fn inconsistent_dim_is_fatal() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_csv(
        &tmp,
        "embeddings.csv",
        "text,locator,embedding\na,,\"[1.0, 0.0]\"\nb,,\"[1.0, 0.0, 0.0]\"\n",
    );

    let err = CorpusStore::from_csv_path(&path).expect_err("must fail");
    assert!(matches!(err, Error::CorpusLoad(_)), "got {err:?}");
}

#[test]
fn malformed_embedding_cell_is_fatal() {
    let tmp = TempDir::new().expect("tempdir");
    let path = write_csv(
        &tmp,
        "embeddings.csv",
        "text,locator,embedding\na,,\"[1.0, oops]\"\n",
    );

    assert!(CorpusStore::from_csv_path(&path).is_err());
}

#[test]
fn missing_file_is_fatal() {
    let err = CorpusStore::from_csv_path("/nonexistent/embeddings.csv").expect_err("must fail");
    assert!(matches!(err, Error::CorpusLoad(_)));
}

#[test]
fn empty_passage_text_is_fatal() {
    let records = vec![CorpusRecord {
        text: "   ".to_string(),
        locator: None,
        embedding: vec![1.0, 0.0],
    }];
    assert!(CorpusStore::from_records(records).is_err());
}
