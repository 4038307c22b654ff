//! Embedding module for semantic search
//!
//! Uses fastembed sentence-transformer models (mean pooling, L2 normalization)
//! behind the [`EmbeddingProvider`] trait.

mod discovery;
mod encoder;
mod model;
mod onnx;
mod provider;

pub use discovery::find_cache_dir;
pub use encoder::Encoder;
pub use model::{ModelConfig, ModelKind};
pub use onnx::FastEmbedProvider;
pub use provider::EmbeddingProvider;
