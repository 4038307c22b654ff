//! Model identifiers and encoder configuration

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Pretrained sentence-embedding models available through fastembed.
///
/// All of them are used with mean pooling and L2 normalization. The default
/// is the 8-bit quantized all-MiniLM-L6-v2 export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// sentence-transformers/all-MiniLM-L6-v2 (384 dimensions)
    AllMiniLmL6V2,
    /// Quantized all-MiniLM-L6-v2 (384 dimensions)
    #[default]
    AllMiniLmL6V2Q,
    /// sentence-transformers/all-MiniLM-L12-v2 (384 dimensions)
    AllMiniLmL12V2,
    /// BAAI/bge-small-en-v1.5 (384 dimensions)
    BgeSmallEnV15,
}

impl ModelKind {
    /// Every supported model
    pub const ALL: [ModelKind; 4] = [
        Self::AllMiniLmL6V2,
        Self::AllMiniLmL6V2Q,
        Self::AllMiniLmL12V2,
        Self::BgeSmallEnV15,
    ];

    /// Short identifier accepted on the command line
    pub fn id(self) -> &'static str {
        match self {
            Self::AllMiniLmL6V2 => "all-MiniLM-L6-v2",
            Self::AllMiniLmL6V2Q => "all-MiniLM-L6-v2-q",
            Self::AllMiniLmL12V2 => "all-MiniLM-L12-v2",
            Self::BgeSmallEnV15 => "bge-small-en-v1.5",
        }
    }

    /// Output dimensionality
    pub fn dimension(self) -> usize {
        384
    }

    pub(crate) fn to_fastembed(self) -> fastembed::EmbeddingModel {
        use fastembed::EmbeddingModel;

        match self {
            Self::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
            Self::AllMiniLmL6V2Q => EmbeddingModel::AllMiniLML6V2Q,
            Self::AllMiniLmL12V2 => EmbeddingModel::AllMiniLML12V2,
            Self::BgeSmallEnV15 => EmbeddingModel::BGESmallENV15,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelKind {
    type Err = SearchError;

    /// Accepts the short id, optionally prefixed with a hub organisation
    /// (`sentence-transformers/`, `Xenova/`, `Qdrant/`, `BAAI/`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.rsplit('/').next().unwrap_or(s).trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.id()).collect();
                SearchError::invalid_argument(format!(
                    "unknown model '{}', expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Encoder configuration
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Which pretrained model to load (default: all-MiniLM-L6-v2-q)
    pub model: ModelKind,
    /// Where model weights are cached; discovered when `None`
    pub cache_dir: Option<PathBuf>,
    /// Show a progress bar while downloading weights (default: true)
    pub show_download_progress: bool,
    /// Strings per provider call (default: 64)
    pub batch_size: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            cache_dir: None,
            show_download_progress: true,
            batch_size: 64,
        }
    }
}
