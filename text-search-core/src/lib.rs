//! text-search core
//!
//! Semantic search over the lines of a text document: sentence embeddings,
//! cosine similarity and brute-force top-K ranking.
//!
//! ## Features
//!
//! - **Lazy model loading** - fastembed weights are loaded once, on first use
//! - **Normalized vectors** - mean-pooled, L2-normalized sentence embeddings
//! - **Explicit failure modes** - mismatched or zero-magnitude vectors are errors, never NaN
//! - **Deterministic ranking** - ties keep document order
//!
//! ## Example
//!
//! ```no_run
//! use text_search_core::{Document, Encoder, ModelConfig, SearchConfig, TextSearch};
//!
//! let search = TextSearch::new(Encoder::new(ModelConfig::default()));
//! let encoded = search.index(Document::parse("the cat sat\ndogs bark loudly\nthe cat slept"))?;
//!
//! for hit in search.search(&encoded, "a sleeping cat", &SearchConfig::default())? {
//!     println!("Line #{} ({}%): {}", hit.line_number, hit.percent, hit.text);
//! }
//! # Ok::<(), text_search_core::SearchError>(())
//! ```

pub mod document;
pub mod embedding;
pub mod error;
pub mod rank;
pub mod search;
pub mod similarity;

// Re-exports for convenience
pub use document::Document;
pub use embedding::{EmbeddingProvider, Encoder, FastEmbedProvider, ModelConfig, ModelKind};
pub use error::{Result, SearchError};
pub use rank::{rank, ScoredIndex, SearchConfig};
pub use search::{EncodedDocument, SearchHit, TextSearch};
pub use similarity::cosine_similarity;
