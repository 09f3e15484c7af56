use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::retrieval::{DocumentChunk, RetrievalError, Retriever};
use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
use crate::tools::Tool;

/// Tool name for document retrieval.
pub const TOOL_RETRIEVER: &str = "retriever_tool";

/// Returned when no retriever was configured.
pub const RETRIEVER_UNAVAILABLE: &str = "Retriever is not available";

/// Returned instead of searching once the turn's tool budget is used up.
pub const BUDGET_EXHAUSTED_MESSAGE: &str =
    "Tool call budget exhausted. Answer using the information already gathered.";

/// Searches the stock-market knowledge base and formats the hits for the model.
///
/// Never fails outward: a missing retriever, an exhausted budget and retrieval
/// errors all come back as `Ok` text, so the model sees them as tool output.
///
/// # Examples
///
/// ```
/// use market_rag::tools::{RetrieverTool, Tool, RETRIEVER_UNAVAILABLE};
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() {
/// let tool = RetrieverTool::unavailable();
/// let out = tool.call(json!({"query": "nasdaq"}), None).await.unwrap();
/// assert_eq!(out.text, RETRIEVER_UNAVAILABLE);
/// # }
/// ```
pub struct RetrieverTool {
    retriever: Option<Arc<dyn Retriever>>,
}

impl RetrieverTool {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self {
            retriever: Some(retriever),
        }
    }

    /// Tool with no backing retriever; every call returns [`RETRIEVER_UNAVAILABLE`].
    pub fn unavailable() -> Self {
        Self { retriever: None }
    }

    pub fn is_available(&self) -> bool {
        self.retriever.is_some()
    }

    /// `Document {n} (source: {source}, page: {page}):\n{text}` blocks, blank-line separated.
    fn format_chunks(chunks: &[DocumentChunk]) -> String {
        chunks
            .iter()
            .enumerate()
            .map(|(i, c)| {
                format!(
                    "Document {} (source: {}, page: {}):\n{}",
                    i + 1,
                    c.source_label(),
                    c.page_label(),
                    c.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    async fn search(
        retriever: &dyn Retriever,
        query: &str,
    ) -> Result<Vec<DocumentChunk>, RetrievalError> {
        retriever.fetch(query).await?.collect()
    }
}

#[async_trait]
impl Tool for RetrieverTool {
    fn name(&self) -> &str {
        TOOL_RETRIEVER
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_RETRIEVER.to_string(),
            description: Some(
                "Search the Stock Market Performance 2024 knowledge base and return the \
                 most relevant passages with their source and page."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "What to look up" }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(
        &self,
        args: serde_json::Value,
        ctx: Option<&ToolCallContext>,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let Some(retriever) = self.retriever.as_deref() else {
            warn!("retriever tool called without a retriever");
            return Ok(ToolCallContent::new(RETRIEVER_UNAVAILABLE));
        };
        if ctx.is_some_and(ToolCallContext::budget_exhausted) {
            warn!(
                tool_call_count = ctx.map(|c| c.tool_call_count),
                "tool budget exhausted, skipping retrieval"
            );
            return Ok(ToolCallContent::new(BUDGET_EXHAUSTED_MESSAGE));
        }

        let query = args.get("query").and_then(|v| v.as_str()).unwrap_or("");
        info!(query = %query, "retriever tool searching");
        match Self::search(retriever, query).await {
            Ok(chunks) => {
                info!(hits = chunks.len(), "retriever tool finished");
                Ok(ToolCallContent::new(Self::format_chunks(&chunks)))
            }
            Err(e) => {
                error!(error = %e, "retriever tool failed");
                Ok(ToolCallContent::new(format!(
                    "Retriever tool failed due to: {}",
                    e
                )))
            }
        }
    }
}
