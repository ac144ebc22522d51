use std::time::Duration;

/// In-process cache for embedding vectors, keyed by the exact input text.
///
/// Embeddings are deterministic for a given model and input, so a
/// read-through cache in front of the embedding capability saves a network
/// round trip for repeated queries. Per-instance only; entries expire after
/// the configured TTL.
pub struct EmbeddingCache {
    inner: moka::future::Cache<String, Vec<f32>>,
}

impl EmbeddingCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    pub async fn get(&self, text: &str) -> Option<Vec<f32>> {
        let hit = self.inner.get(text).await;
        if hit.is_some() {
            tracing::trace!("embedding cache hit");
        }
        hit
    }

    pub async fn insert(&self, text: &str, vector: Vec<f32>) {
        self.inner.insert(text.to_string(), vector).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}
