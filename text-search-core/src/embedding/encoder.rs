//! Sentence encoder
//!
//! High-level API for turning lines of text into normalized vectors.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use dashmap::DashMap;

use super::model::ModelConfig;
use super::onnx::FastEmbedProvider;
use super::provider::EmbeddingProvider;
use crate::error::{Result, SearchError};
use crate::similarity::l2_norm;

type ProviderFactory = Box<dyn Fn() -> Result<Arc<dyn EmbeddingProvider>> + Send + Sync>;

/// Drift from unit length tolerated before a vector is re-normalized
const NORM_TOLERANCE: f32 = 1e-4;

/// Lazily initialized, caching encoder
///
/// The provider is created on the first non-empty [`encode`](Self::encode)
/// call and reused afterwards. A failed initialization is remembered and
/// reported again on every later call. Identical strings are embedded once.
pub struct Encoder {
    factory: ProviderFactory,
    provider: OnceLock<std::result::Result<Arc<dyn EmbeddingProvider>, String>>,
    cache: DashMap<String, Vec<f32>>,
    dimension: OnceLock<usize>,
    batch_size: usize,
}

impl Encoder {
    /// Encoder backed by fastembed, loaded on first use
    pub fn new(config: ModelConfig) -> Self {
        let batch_size = config.batch_size;
        Self::lazy(move || {
            let provider = FastEmbedProvider::try_new(&config)?;
            Ok(Arc::new(provider) as Arc<dyn EmbeddingProvider>)
        })
        .with_batch_size(batch_size)
    }

    /// Encoder around an already constructed provider
    pub fn with_provider(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider: OnceLock::from(Ok(provider)),
            ..Self::lazy(|| Err(SearchError::model_unavailable("no provider factory")))
        }
    }

    /// Encoder whose provider is built by `factory` on first use
    pub fn lazy<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn EmbeddingProvider>> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            provider: OnceLock::new(),
            cache: DashMap::new(),
            dimension: OnceLock::new(),
            batch_size: ModelConfig::default().batch_size,
        }
    }

    /// Set how many strings go to the provider per call
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn provider(&self) -> Result<&Arc<dyn EmbeddingProvider>> {
        let result = self.provider.get_or_init(|| {
            let start = Instant::now();
            match (self.factory)() {
                Ok(provider) => {
                    log::info!(
                        "Embedding provider {} ready in {:?}",
                        provider.name(),
                        start.elapsed()
                    );
                    Ok(provider)
                }
                Err(e) => {
                    log::warn!("Embedding provider failed to initialize: {}", e);
                    Err(e.to_string())
                }
            }
        });

        result
            .as_ref()
            .map_err(|e| SearchError::model_unavailable(e.clone()))
    }

    /// Whether the provider has been initialized successfully
    pub fn is_loaded(&self) -> bool {
        matches!(self.provider.get(), Some(Ok(_)))
    }

    /// Encode strings into unit-length vectors, one per input, in input order
    pub fn encode<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let provider = self.provider()?;

        // Unique strings not embedded yet, in first-seen order
        let mut seen = HashSet::new();
        let pending: Vec<&str> = texts
            .iter()
            .map(|text| text.as_ref())
            .filter(|text| !self.cache.contains_key(*text) && seen.insert(*text))
            .collect();

        log::debug!(
            "Encoding {} texts ({} new) with {}",
            texts.len(),
            pending.len(),
            provider.name()
        );

        for chunk in pending.chunks(self.batch_size) {
            let vectors = provider.embed_batch(chunk)?;
            if vectors.len() != chunk.len() {
                return Err(SearchError::encoding(format!(
                    "provider returned {} vectors for {} texts",
                    vectors.len(),
                    chunk.len()
                )));
            }
            for (text, vector) in chunk.iter().zip(vectors) {
                let vector = self.check(vector)?;
                self.cache.insert((*text).to_string(), vector);
            }
        }

        texts
            .iter()
            .map(|text| {
                let text = text.as_ref();
                self.cache
                    .get(text)
                    .map(|v| v.clone())
                    .ok_or_else(|| SearchError::encoding(format!("no vector for '{}'", text)))
            })
            .collect()
    }

    /// Encode a single string
    pub fn encode_one(&self, text: &str) -> Result<Vec<f32>> {
        self.encode(&[text])?
            .pop()
            .ok_or_else(|| SearchError::encoding("no vector produced"))
    }

    /// Enforce a consistent dimension and unit length
    fn check(&self, mut vector: Vec<f32>) -> Result<Vec<f32>> {
        if vector.is_empty() {
            return Err(SearchError::encoding("provider returned an empty vector"));
        }

        let expected = *self.dimension.get_or_init(|| vector.len());
        if vector.len() != expected {
            return Err(SearchError::encoding(format!(
                "provider returned a {}-d vector, expected {}",
                vector.len(),
                expected
            )));
        }

        if vector.iter().any(|x| !x.is_finite()) {
            return Err(SearchError::encoding(
                "provider returned a vector with a non-finite component",
            ));
        }

        let norm = l2_norm(&vector);
        if norm > 0.0 && (norm - 1.0).abs() > NORM_TOLERANCE {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(vector)
    }

    /// Vector length, once known
    pub fn dimension(&self) -> Option<usize> {
        self.dimension.get().copied().or_else(|| {
            self.provider
                .get()
                .and_then(|p| p.as_ref().ok())
                .and_then(|p| p.dimension())
        })
    }

    /// Number of cached strings
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("is_loaded", &self.is_loaded())
            .field("dimension", &self.dimension())
            .field("cache_size", &self.cache.len())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Maps text to `[len, vowels, 1]`, counting calls
    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
        embedded: AtomicUsize,
    }

    impl EmbeddingProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            if text == "boom" {
                return Err(SearchError::encoding("boom"));
            }
            self.embedded.fetch_add(1, Ordering::SeqCst);
            let vowels = text.chars().filter(|c| "aeiou".contains(*c)).count();
            Ok(vec![text.len() as f32, vowels as f32, 1.0])
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            texts.iter().map(|t| self.embed(t)).collect()
        }
    }

    fn expected(text: &str) -> Vec<f32> {
        let vowels = text.chars().filter(|c| "aeiou".contains(*c)).count() as f32;
        let raw = [text.len() as f32, vowels, 1.0];
        let norm = l2_norm(&raw);
        raw.iter().map(|x| x / norm).collect()
    }

    fn assert_close(a: &[f32], b: &[f32]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-6, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_encode_preserves_order() {
        let encoder = Encoder::with_provider(Arc::new(CountingProvider::default()));
        let vectors = encoder.encode(&["a", "bcd", "aeiou"]).unwrap();

        assert_eq!(vectors.len(), 3);
        assert_close(&vectors[0], &expected("a"));
        assert_close(&vectors[1], &expected("bcd"));
        assert_close(&vectors[2], &expected("aeiou"));
    }

    #[test]
    fn test_encode_normalizes() {
        let encoder = Encoder::with_provider(Arc::new(CountingProvider::default()));
        for vector in encoder.encode(&["hello", "the quick brown fox"]).unwrap() {
            assert!((l2_norm(&vector) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_encode_empty_does_not_load() {
        let encoder = Encoder::lazy(|| Err(SearchError::model_unavailable("offline")));
        let empty: [&str; 0] = [];
        assert!(encoder.encode(&empty).unwrap().is_empty());
        assert!(!encoder.is_loaded());
    }

    #[test]
    fn test_encode_batches_and_caches() {
        let provider = Arc::new(CountingProvider::default());
        let encoder = Encoder::with_provider(provider.clone()).with_batch_size(2);

        let texts = ["one", "two", "one", "three", "four"];
        let vectors = encoder.encode(&texts).unwrap();
        assert_eq!(vectors.len(), 5);
        assert_eq!(vectors[0], vectors[2]);

        // four unique strings in batches of two
        assert_eq!(provider.embedded.load(Ordering::SeqCst), 4);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(encoder.cache_size(), 4);

        encoder.encode(&["two", "four"]).unwrap();
        assert_eq!(provider.embedded.load(Ordering::SeqCst), 4);

        encoder.clear_cache();
        assert_eq!(encoder.cache_size(), 0);
    }

    #[test]
    fn test_lazy_init_runs_once() {
        let inits = Arc::new(AtomicUsize::new(0));
        let counter = inits.clone();
        let encoder = Encoder::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(CountingProvider::default()) as Arc<dyn EmbeddingProvider>)
        });

        assert!(!encoder.is_loaded());
        encoder.encode(&["a"]).unwrap();
        encoder.encode_one("b").unwrap();
        assert!(encoder.is_loaded());
        assert_eq!(inits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_init_failure_is_model_unavailable() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let encoder = Encoder::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(SearchError::model_unavailable("weights unreachable"))
        });

        for _ in 0..2 {
            let err = encoder.encode(&["a"]).unwrap_err();
            assert!(matches!(err, SearchError::ModelUnavailable(_)));
            assert!(err.to_string().contains("weights unreachable"));
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(!encoder.is_loaded());
    }

    #[test]
    fn test_encoding_error_propagates() {
        let encoder = Encoder::with_provider(Arc::new(CountingProvider::default()));
        let err = encoder.encode(&["fine", "boom"]).unwrap_err();
        assert!(matches!(err, SearchError::Encoding(_)));
    }

    #[test]
    fn test_dimension_drift_rejected() {
        struct Drifting;
        impl EmbeddingProvider for Drifting {
            fn name(&self) -> &str {
                "drifting"
            }
            fn embed(&self, text: &str) -> Result<Vec<f32>> {
                Ok(vec![1.0; text.len()])
            }
        }

        let encoder = Encoder::with_provider(Arc::new(Drifting));
        let err = encoder.encode(&["ab", "abc"]).unwrap_err();
        assert!(matches!(err, SearchError::Encoding(_)));
    }

    #[test]
    fn test_short_batch_rejected() {
        struct Lossy;
        impl EmbeddingProvider for Lossy {
            fn name(&self) -> &str {
                "lossy"
            }
            fn embed(&self, _text: &str) -> Result<Vec<f32>> {
                Ok(vec![1.0, 0.0])
            }
            fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
                Ok(texts.iter().skip(1).map(|_| vec![1.0, 0.0]).collect())
            }
        }

        let encoder = Encoder::with_provider(Arc::new(Lossy));
        let err = encoder.encode(&["a", "b"]).unwrap_err();
        assert!(matches!(err, SearchError::Encoding(_)));
    }

    #[test]
    fn test_non_finite_output_rejected() {
        struct Broken;
        impl EmbeddingProvider for Broken {
            fn name(&self) -> &str {
                "broken"
            }
            fn embed(&self, text: &str) -> Result<Vec<f32>> {
                match text {
                    "nan" => Ok(vec![f32::NAN, 1.0]),
                    "inf" => Ok(vec![f32::INFINITY, 0.0]),
                    _ => Ok(vec![1.0, 0.0]),
                }
            }
        }

        let encoder = Encoder::with_provider(Arc::new(Broken));
        for text in ["nan", "inf"] {
            let err = encoder.encode(&["ok", text]).unwrap_err();
            assert!(matches!(err, SearchError::Encoding(_)));
        }
    }

    #[test]
    fn test_dimension_reported_after_encoding() {
        let encoder = Encoder::with_provider(Arc::new(CountingProvider::default()));
        assert_eq!(encoder.dimension(), None);
        encoder.encode_one("x").unwrap();
        assert_eq!(encoder.dimension(), Some(3));
    }
}
