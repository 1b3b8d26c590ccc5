use nutrirag_embed::{Embedder, HashEmbedder};

#[test]
fn hash_embedder_shape_norm_and_determinism() {
    let embedder = HashEmbedder::new(64);
    assert_eq!(embedder.dim(), 64);

    let v1 = embedder.embed("brown rice is high in selenium").expect("embed");
    let v2 = embedder.embed("brown rice is high in selenium").expect("embed");
    assert_eq!(v1.len(), 64);

    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6, "same input, same vector");
    }
}

#[test]
fn different_texts_embed_differently() {
    let embedder = HashEmbedder::new(64);
    let a = embedder.embed("brown rice").expect("embed");
    let b = embedder.embed("exercise routines").expect("embed");
    assert_ne!(a, b);
}

#[test]
fn empty_text_is_a_well_defined_zero_vector() {
    let embedder = HashEmbedder::new(16);
    let v = embedder.embed("").expect("embed");
    assert_eq!(v.len(), 16);
    assert!(v.iter().all(|x| *x == 0.0));
}
