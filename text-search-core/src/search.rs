//! Semantic line search
//!
//! Encodes every line of a document once, then answers queries by encoding
//! the query and ranking the line vectors against it.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::document::Document;
use crate::embedding::Encoder;
use crate::error::Result;
use crate::rank::{rank, ScoredIndex, SearchConfig};

/// A document together with one vector per line
#[derive(Debug, Clone)]
pub struct EncodedDocument {
    document: Document,
    vectors: Vec<Vec<f32>>,
    elapsed: Duration,
}

impl EncodedDocument {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    /// Time spent encoding the lines
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of encoded lines
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// A matching line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// 1-based line number among the non-blank lines
    pub line_number: usize,
    /// Cosine similarity to the query
    pub similarity: f32,
    /// Similarity rounded to a whole percentage
    pub percent: i32,
    /// The line itself
    pub text: String,
}

impl SearchHit {
    fn new(scored: ScoredIndex, document: &Document) -> Self {
        Self {
            line_number: Document::line_number(scored.index),
            similarity: scored.similarity,
            percent: percent(scored.similarity),
            text: document.line(scored.index).unwrap_or_default().to_string(),
        }
    }
}

/// Similarity as a whole percentage, halves rounded toward +inf
fn percent(similarity: f32) -> i32 {
    (f64::from(similarity) * 100.0 + 0.5).floor() as i32
}

/// Search engine over encoded documents
pub struct TextSearch {
    encoder: Encoder,
}

impl TextSearch {
    /// Create new search engine
    pub fn new(encoder: Encoder) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Encode every line of `document`
    pub fn index(&self, document: Document) -> Result<EncodedDocument> {
        let start = Instant::now();
        let vectors = self.encoder.encode(document.lines())?;
        let elapsed = start.elapsed();

        log::info!("Encoded {} lines in {:?}", vectors.len(), elapsed);

        Ok(EncodedDocument {
            document,
            vectors,
            elapsed,
        })
    }

    /// Rank the lines of `encoded` against `query`
    pub fn search(
        &self,
        encoded: &EncodedDocument,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchHit>> {
        let query_vector = self.encoder.encode_one(query)?;
        let ranked = rank(&encoded.vectors, &query_vector, config.top_k)?;

        log::debug!("Query {:?} matched {} lines", query, ranked.len());

        Ok(ranked
            .into_iter()
            .map(|scored| SearchHit::new(scored, &encoded.document))
            .collect())
    }
}
