//! fastembed-backed sentence embeddings
//!
//! Runs the ONNX export of the selected model with mean pooling and L2
//! normalization.

use fastembed::{InitOptions, TextEmbedding};
use parking_lot::Mutex;

use super::discovery::find_cache_dir;
use super::model::{ModelConfig, ModelKind};
use super::provider::EmbeddingProvider;
use crate::error::{Result, SearchError};

/// fastembed model wrapper
pub struct FastEmbedProvider {
    model: Mutex<TextEmbedding>,
    kind: ModelKind,
    batch_size: usize,
}

impl FastEmbedProvider {
    /// Load (downloading on first use) the configured model
    pub fn try_new(config: &ModelConfig) -> Result<Self> {
        let mut options = InitOptions::new(config.model.to_fastembed())
            .with_show_download_progress(config.show_download_progress);
        if let Some(cache_dir) = find_cache_dir(config.cache_dir.as_deref())? {
            options = options.with_cache_dir(cache_dir);
        }

        log::info!("Loading embedding model {}", config.model);

        let model = TextEmbedding::try_new(options).map_err(|e| {
            SearchError::model_unavailable(format!("Failed to load {}: {}", config.model, e))
        })?;

        log::info!(
            "Loaded {} ({}d, mean pooling, normalized)",
            config.model,
            config.model.dimension()
        );

        Ok(Self {
            model: Mutex::new(model),
            kind: config.model,
            batch_size: config.batch_size.max(1),
        })
    }

    /// Which model is loaded
    pub fn kind(&self) -> ModelKind {
        self.kind
    }
}

impl EmbeddingProvider for FastEmbedProvider {
    fn name(&self) -> &str {
        self.kind.id()
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.kind.dimension())
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self
            .model
            .lock()
            .embed(vec![text], None)
            .map_err(|e| SearchError::encoding(format!("Failed to encode text: {}", e)))?;

        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::encoding("Model produced no vector for text"))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        self.model
            .lock()
            .embed(texts.to_vec(), Some(self.batch_size))
            .map_err(|e| SearchError::encoding(format!("Failed to encode texts: {}", e)))
    }
}

impl std::fmt::Debug for FastEmbedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedProvider")
            .field("kind", &self.kind)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}
