//! Embedding provider seam
//!
//! Anything that maps one string to one fixed-length vector. The production
//! implementation is [`FastEmbedProvider`](super::FastEmbedProvider); tests
//! substitute deterministic stubs.

use crate::error::Result;

/// A sentence-embedding backend
pub trait EmbeddingProvider: Send + Sync {
    /// Human-readable model identifier, used in logs
    fn name(&self) -> &str;

    /// Output dimensionality, if known before the first embedding
    fn dimension(&self) -> Option<usize> {
        None
    }

    /// Embed a single string
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several strings, one vector per input, in input order
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}
