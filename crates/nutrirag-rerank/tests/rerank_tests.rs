use nutrirag_rerank::{CrossEncoder, OverlapScorer};

#[test]
fn overlap_scorer_prefers_matching_passages() {
    let scorer = OverlapScorer;
    let scores = scorer
        .score_batch(
            "tell me about brown rice",
            &[
                "brown rice is high in selenium",
                "porridge recipes for breakfast",
                "unrelated text about exercise",
            ],
        )
        .expect("score");
    assert_eq!(scores.len(), 3);
    assert!(scores[0] > scores[1]);
    assert!(scores[0] > scores[2]);
}

#[test]
fn empty_candidate_list_scores_empty() {
    let scorer = OverlapScorer;
    assert!(scorer.score_batch("any query", &[]).expect("score").is_empty());
}

#[test]
fn scoring_is_case_insensitive() {
    let scorer = OverlapScorer;
    let scores = scorer
        .score_batch("Brown Rice", &["BROWN RICE", "brown rice"])
        .expect("score");
    assert!((scores[0] - scores[1]).abs() < 1e-6);
}

#[test]
fn trait_is_object_safe() {
    fn _takes_scorer(_: &dyn CrossEncoder) {}
}
