//! RagAgent: compiled reason/tools graph plus the turn-level `run` entry point.

use std::collections::HashMap;
use std::sync::Arc;

use async_openai::config::OpenAIConfig;
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::config::RagConfig;
use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::{ChatOpenAI, LlmClient};
use crate::retrieval::{Embedder, OpenAIEmbedder, Retriever, RouterRetriever, VectorIndexRetriever};
use crate::state::RagState;
use crate::tools::{RetrieverTool, ToolRegistry};

use super::condition::route_after_reason;
use super::error::{InitError, RunError};
use super::history::{build_initial_state, HistoryEntry, DEFAULT_HISTORY_WINDOW};
use super::reason_node::{ReasonNode, REASON_NODE};
use super::tool_node::{ToolExecNode, TOOLS_NODE};
use super::AgentContext;

/// Registry holding the retriever tool, backed by `retriever` when present.
pub fn build_tool_registry(retriever: Option<Arc<dyn Retriever>>) -> ToolRegistry {
    let tool = match retriever {
        Some(r) => RetrieverTool::new(r),
        None => RetrieverTool::unavailable(),
    };
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(tool));
    registry
}

/// Listing and market index retrievers behind a keyword router, or `None` without an index dir.
pub fn build_retriever(config: &RagConfig) -> Result<Option<Arc<dyn Retriever>>, InitError> {
    let Some((listing_path, market_path)) = config.index_paths() else {
        warn!("RAG_INDEX_DIR not set, retriever tool will report it is unavailable");
        return Ok(None);
    };
    let mut embed_config = OpenAIConfig::new();
    if let Some(ref key) = config.embedding_api_key {
        embed_config = embed_config.with_api_key(key);
    }
    if let Some(ref base) = config.embedding_api_base {
        embed_config = embed_config.with_api_base(base);
    }
    let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::with_config(
        embed_config,
        config.embedding_model.clone(),
    ));
    let listing = VectorIndexRetriever::load(&listing_path, Arc::clone(&embedder), config.top_k)?;
    let market = VectorIndexRetriever::load(&market_path, embedder, config.top_k)?;
    Ok(Some(Arc::new(RouterRetriever::new(
        Arc::new(listing),
        Arc::new(market),
    ))))
}

/// The agent loop: `START → reason`, `reason → {tools | END}`, `tools → reason`.
pub struct RagAgent {
    compiled: CompiledStateGraph<RagState>,
    history_window: usize,
}

impl RagAgent {
    /// Compiles the loop over the given context.
    pub fn new(ctx: AgentContext) -> Result<Self, CompilationError> {
        let budget = ctx.budget;
        let path_map: HashMap<String, String> = [
            (TOOLS_NODE.to_string(), TOOLS_NODE.to_string()),
            (END.to_string(), END.to_string()),
        ]
        .into_iter()
        .collect();

        let mut graph = StateGraph::<RagState>::new();
        graph
            .add_node(REASON_NODE, Arc::new(ReasonNode::new(ctx.clone())))
            .add_node(TOOLS_NODE, Arc::new(ToolExecNode::new(ctx)))
            .add_edge(START, REASON_NODE)
            .add_conditional_edges(
                REASON_NODE,
                Arc::new(move |state: &RagState| route_after_reason(state, &budget).to_string()),
                Some(path_map),
            )
            .add_edge(TOOLS_NODE, REASON_NODE);

        Ok(Self {
            compiled: graph.compile()?,
            history_window: DEFAULT_HISTORY_WINDOW,
        })
    }

    /// Number of previous entries `run` keeps.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Builds model client, retrievers and tools from configuration.
    pub fn from_config(config: &RagConfig) -> Result<Self, InitError> {
        let api_key = config.llm_api_key.clone().ok_or_else(|| {
            InitError::Config("LLM_API_KEY (or GROQ_API_KEY) must be set".to_string())
        })?;
        let retriever = build_retriever(config)?;
        let tools = Arc::new(build_tool_registry(retriever));

        let llm_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(config.llm_api_base.clone());
        let llm: Arc<dyn LlmClient> = Arc::new(
            ChatOpenAI::with_config(llm_config, config.model.clone())
                .with_tools(tools.list())
                .with_temperature(config.temperature)
                .with_tool_choice(config.tool_choice),
        );

        let ctx = AgentContext::new(llm, config.system_prompt.clone(), tools, config.budget());
        let agent = Self::new(ctx)?.with_history_window(config.history_window);
        info!(model = %config.model, "RAG agent initialization complete");
        Ok(agent)
    }

    /// Runs the loop on a prepared state and returns the final state.
    pub async fn invoke(&self, state: RagState) -> Result<RagState, RunError> {
        Ok(self.compiled.invoke(state).await?)
    }

    /// Answers `user_input` given prior turns; returns the final assistant text.
    pub async fn run(
        &self,
        previous: &[HistoryEntry],
        user_input: &str,
    ) -> Result<String, RunError> {
        let state = build_initial_state(previous, user_input, self.history_window);
        let final_state = self.invoke(state).await?;
        info!(
            tool_call_count = final_state.tool_call_count,
            messages = final_state.messages.len(),
            "agent run complete"
        );
        final_state.last_assistant_reply().ok_or_else(|| {
            RunError::Execution(AgentError::ExecutionFailed(
                "run finished without an assistant reply".to_string(),
            ))
        })
    }
}

/// Process-wide holder that is initialized once and then serves `run` calls.
///
/// Calling `run` before `init` returns `RunError::NotInitialized`.
#[derive(Default)]
pub struct RagService {
    agent: OnceCell<RagAgent>,
}

impl RagService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the agent from `config`; a second call keeps the first agent.
    pub fn init(&self, config: &RagConfig) -> Result<(), InitError> {
        if self.is_initialized() {
            warn!("RAG agent already initialized");
            return Ok(());
        }
        let agent = RagAgent::from_config(config)?;
        self.init_with(agent);
        Ok(())
    }

    /// Installs an already built agent; ignored if one is installed.
    pub fn init_with(&self, agent: RagAgent) {
        if self.agent.set(agent).is_err() {
            warn!("RAG agent already initialized");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.agent.get().is_some()
    }

    pub async fn run(
        &self,
        previous: &[HistoryEntry],
        user_input: &str,
    ) -> Result<String, RunError> {
        let agent = self.agent.get().ok_or(RunError::NotInitialized)?;
        agent.run(previous, user_input).await
    }
}
