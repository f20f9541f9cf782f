//! Null embedding provider tests

use prc_domain::ports::providers::EmbeddingProvider;
use prc_providers::embedding::NullEmbeddingProvider;

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (norm_a * norm_b)
}

#[tokio::test]
async fn vectors_have_the_declared_dimension() {
    let embedder = NullEmbeddingProvider::new();
    let single = embedder.embed("hello world").await.unwrap();
    assert_eq!(single.vector.len(), embedder.dimensions());
    assert_eq!(single.dimensions, embedder.dimensions());

    let batch = embedder
        .embed_batch(&["one".to_string(), "two".to_string()])
        .await
        .unwrap();
    assert_eq!(batch.len(), 2);
    for embedding in &batch {
        assert_eq!(embedding.vector.len(), embedder.dimensions());
    }
}

#[tokio::test]
async fn embedding_is_deterministic() {
    let embedder = NullEmbeddingProvider::new();
    let first = embedder.embed("stable input text").await.unwrap();
    let second = embedder.embed("stable input text").await.unwrap();
    assert_eq!(first.vector, second.vector);
}

#[tokio::test]
async fn embed_matches_batch_of_one() {
    let embedder = NullEmbeddingProvider::new();
    let single = embedder.embed("same text").await.unwrap();
    let batch = embedder
        .embed_batch(&["same text".to_string()])
        .await
        .unwrap();
    assert_eq!(single.vector, batch[0].vector);
}

#[tokio::test]
async fn shared_words_raise_similarity() {
    let embedder = NullEmbeddingProvider::new();
    let base = embedder.embed("users track daily tasks").await.unwrap();
    let related = embedder.embed("track tasks").await.unwrap();
    let unrelated = embedder.embed("sunny weather forecast").await.unwrap();

    let related_sim = cosine(&base.vector, &related.vector);
    let unrelated_sim = cosine(&base.vector, &unrelated.vector);
    assert!(related_sim > unrelated_sim);
}

#[tokio::test]
async fn non_empty_texts_always_overlap() {
    let embedder = NullEmbeddingProvider::new();
    let a = embedder.embed("alpha").await.unwrap();
    let b = embedder.embed("omega").await.unwrap();
    // The shared bias component keeps any two non-empty texts above zero.
    assert!(cosine(&a.vector, &b.vector) > 0.0);
}
