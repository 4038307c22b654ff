//! Brute-force top-K ranking
//!
//! Scores every document vector against the query with a linear scan.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::similarity::cosine_similarity;

/// A document position paired with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredIndex {
    /// 0-based position in the document
    pub index: usize,
    /// Cosine similarity to the query
    pub similarity: f32,
}

/// Search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum results to return (default: 3)
    pub top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

/// Rank `vectors` by cosine similarity to `query`, best first.
///
/// Equal scores keep ascending index order. The input is not reordered;
/// a fresh vector of at most `top_k` entries is returned. Any scoring
/// failure aborts the whole ranking.
pub fn rank<V: AsRef<[f32]>>(
    vectors: &[V],
    query: &[f32],
    top_k: usize,
) -> Result<Vec<ScoredIndex>> {
    if top_k == 0 {
        return Err(SearchError::invalid_argument("top_k must be at least 1"));
    }

    let mut scores = vectors
        .iter()
        .enumerate()
        .map(|(index, vector)| {
            cosine_similarity(vector.as_ref(), query)
                .map(|similarity| ScoredIndex { index, similarity })
        })
        .collect::<Result<Vec<_>>>()?;

    scores.sort_by(by_score_desc);
    scores.truncate(top_k);

    log::debug!("Ranked {} vectors, kept {}", vectors.len(), scores.len());

    Ok(scores)
}

fn by_score_desc(a: &ScoredIndex, b: &ScoredIndex) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| a.index.cmp(&b.index))
}
