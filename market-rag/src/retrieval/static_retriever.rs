use async_trait::async_trait;

use super::{DocumentChunk, DocumentStream, RetrievalError, Retriever};

/// Retriever over a fixed list of chunks; every query gets all of them in order.
///
/// Useful for tests and for wiring the agent without an embedding index.
#[derive(Debug, Clone, Default)]
pub struct StaticRetriever {
    chunks: Vec<DocumentChunk>,
}

impl StaticRetriever {
    pub fn new(chunks: Vec<DocumentChunk>) -> Self {
        Self { chunks }
    }
}

#[async_trait]
impl Retriever for StaticRetriever {
    async fn fetch(&self, _query: &str) -> Result<DocumentStream, RetrievalError> {
        Ok(Box::new(self.chunks.clone().into_iter().map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_chunks_in_order() {
        let r = StaticRetriever::new(vec![DocumentChunk::new("a"), DocumentChunk::new("b")]);
        let texts: Vec<String> = r
            .fetch("anything")
            .await
            .unwrap()
            .map(|c| c.unwrap().text)
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }
}
