use groundrag_embed::{get_default_embedder, Embedder, FakeEmbedder, MINILM_DIM};

#[test]
fn fake_embedder_shapes_and_determinism() {
    // Force fake embedder to avoid loading model weights
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");

    let embedder = get_default_embedder().expect("embedder");
    let texts = vec!["Pasal 28 ayat (1)".to_string(), "Pasal 28 ayat (1)".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");

    assert_eq!(embs[0].len(), MINILM_DIM);
    assert_eq!(embedder.dim(), MINILM_DIM);
    let norm: f32 = embs[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");
    assert_eq!(embs[0], embs[1]);
}

#[test]
fn fake_embedder_is_case_and_punctuation_insensitive() {
    let e = FakeEmbedder::default();
    assert_eq!(e.embed("Hak Asasi Manusia!").unwrap(), e.embed("hak asasi manusia").unwrap());
}

#[test]
fn shared_words_score_closer_than_unrelated_text() {
    let e = FakeEmbedder::new(64);
    let cos = |a: &[f32], b: &[f32]| a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
    let q = e.embed("hak asasi manusia").unwrap();
    let related = e.embed("hak asasi manusia melekat pada setiap orang").unwrap();
    let unrelated = e.embed("resep kue bolu").unwrap();
    assert!(cos(&q, &related) > cos(&q, &unrelated));
}

#[test]
fn empty_text_is_the_zero_vector() {
    let v = FakeEmbedder::new(8).embed("").unwrap();
    assert!(v.iter().all(|x| *x == 0.0));
}
