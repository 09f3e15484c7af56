//! Query embedding for the vector index.
//!
//! `OpenAIEmbedder` calls any OpenAI-compatible Embeddings endpoint. The index
//! files must have been built with the same model so vectors are comparable.

use async_openai::{
    config::OpenAIConfig,
    types::embeddings::{CreateEmbeddingRequest, EmbeddingInput},
    Client,
};
use async_trait::async_trait;

use super::RetrievalError;

/// Produces fixed-size float vectors from text.
///
/// Implementations must be `Send + Sync`; one embedder is shared by both index backends.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds each text; returns one vector per input in the same order.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, RetrievalError>;
}

/// OpenAI Embeddings client implementing [`Embedder`].
///
/// `RagConfig` defaults the model to `text-embedding-3-small`.
///
/// # Examples
///
/// ```ignore
/// use async_openai::config::OpenAIConfig;
/// use market_rag::retrieval::OpenAIEmbedder;
///
/// let config = OpenAIConfig::new().with_api_key("sk-...");
/// let embedder = OpenAIEmbedder::with_config(config, "text-embedding-3-small");
/// let vectors = embedder.embed(&["NASDAQ listings"]).await?;
/// ```
pub struct OpenAIEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIEmbedder {
    /// Embedder with custom API key / base URL.
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        let input = match texts {
            [one] => EmbeddingInput::String(one.to_string()),
            _ => EmbeddingInput::StringArray(texts.iter().map(|s| s.to_string()).collect()),
        };
        let request = CreateEmbeddingRequest {
            input,
            model: self.model.clone(),
            ..Default::default()
        };

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| RetrievalError::Embedding(format!("OpenAI API error: {}", e)))?;

        if response.data.len() != texts.len() {
            return Err(RetrievalError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                response.data.len()
            )));
        }
        Ok(response.data.into_iter().map(|e| e.embedding).collect())
    }
}
