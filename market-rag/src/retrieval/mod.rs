//! Document retrieval: the chunks the retriever tool formats for the model.
//!
//! A `Retriever` turns a query into a lazy, single-pass stream of
//! `DocumentChunk`s. `RouterRetriever` picks one of two backends (listing or
//! market) per query; `VectorIndexRetriever` is the deployed backend over a
//! pre-built embedding index; `StaticRetriever` serves fixed chunks.

mod embedder;
mod index;
mod router;
mod static_retriever;

pub use embedder::{Embedder, OpenAIEmbedder};
pub use index::{cosine_similarity, IndexEntry, VectorIndexRetriever};
pub use router::{
    matched_keyword, route_query, RouteChoice, RouterRetriever, LISTING_KEYWORDS, MARKET_KEYWORDS,
};
pub use static_retriever::StaticRetriever;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source label used when a chunk carries none.
pub const UNKNOWN_SOURCE: &str = "unknown";
/// Page label used when a chunk carries none.
pub const UNKNOWN_PAGE: &str = "N/A";

/// One retrieved passage with optional provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    pub text: String,
}

impl DocumentChunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            source: None,
            page: None,
            text: text.into(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Source, or `"unknown"`.
    pub fn source_label(&self) -> &str {
        self.source.as_deref().unwrap_or(UNKNOWN_SOURCE)
    }

    /// Page, or `"N/A"`.
    pub fn page_label(&self) -> &str {
        self.page.as_deref().unwrap_or(UNKNOWN_PAGE)
    }
}

/// Lazy, finite, single-pass sequence of chunks. Items may fail mid-iteration.
pub type DocumentStream = Box<dyn Iterator<Item = Result<DocumentChunk, RetrievalError>> + Send>;

/// Errors from embedding a query, loading an index or reading chunks.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding failed: {0}")]
    Embedding(String),
    #[error("index error: {0}")]
    Index(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Retrieval backend: query in, chunk stream out.
///
/// **Interaction**: Implemented by `VectorIndexRetriever`, `StaticRetriever` and
/// `RouterRetriever`; consumed by `RetrieverTool`.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<DocumentStream, RetrievalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_labels_default_when_missing() {
        let chunk = DocumentChunk::new("text");
        assert_eq!(chunk.source_label(), "unknown");
        assert_eq!(chunk.page_label(), "N/A");
        let chunk = chunk.with_source("report.pdf").with_page("3");
        assert_eq!(chunk.source_label(), "report.pdf");
        assert_eq!(chunk.page_label(), "3");
    }

    #[test]
    fn retrieval_error_display() {
        assert!(RetrievalError::Index("bad json".into())
            .to_string()
            .contains("bad json"));
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(RetrievalError::from(io).to_string().contains("gone"));
    }
}
