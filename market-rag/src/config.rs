//! Runtime configuration for building a `RagAgent`.
//!
//! Values come from the process environment; the `config` crate fills the
//! environment from `.env` and the XDG `config.toml` beforehand.

use std::path::PathBuf;

use tracing::warn;

use crate::agent::{ToolBudget, DEFAULT_HISTORY_WINDOW, MAX_TOOL_CALLS};
use crate::llm::ToolChoiceMode;
use crate::prompts::DEFAULT_SYSTEM_PROMPT;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_LLM_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_TOP_K: usize = 4;

/// Index file served by the listing backend, inside `index_dir`.
pub const LISTING_INDEX_FILE: &str = "listing_index.json";
/// Index file served by the market backend, inside `index_dir`.
pub const MARKET_INDEX_FILE: &str = "market_index.json";

/// Configuration for the agent, its model and its retrieval backends.
#[derive(Clone, Debug, PartialEq)]
pub struct RagConfig {
    /// Used verbatim whenever `SYSTEM_PROMPT` is present, even if blank.
    pub system_prompt: String,
    pub model: String,
    pub temperature: f32,
    pub tool_choice: ToolChoiceMode,
    pub llm_api_key: Option<String>,
    pub llm_api_base: String,
    /// Directory holding the two index files; `None` runs without a retriever.
    pub index_dir: Option<PathBuf>,
    pub top_k: usize,
    pub embedding_model: String,
    pub embedding_api_key: Option<String>,
    pub embedding_api_base: Option<String>,
    pub max_tool_calls: u32,
    pub history_window: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl RagConfig {
    /// Builds config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from any key lookup.
    ///
    /// Blank values count as unset, except `SYSTEM_PROMPT`, which falls back only when absent.
    /// Unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            system_prompt: lookup("SYSTEM_PROMPT")
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            model: get("RAG_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: get("RAG_TEMPERATURE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
            tool_choice: get("RAG_TOOL_CHOICE")
                .and_then(|s| {
                    s.parse()
                        .map_err(|e: String| warn!(error = %e, "ignoring RAG_TOOL_CHOICE"))
                        .ok()
                })
                .unwrap_or_default(),
            llm_api_key: get("LLM_API_KEY").or_else(|| get("GROQ_API_KEY")),
            llm_api_base: get("LLM_API_BASE").unwrap_or_else(|| DEFAULT_LLM_API_BASE.to_string()),
            index_dir: get("RAG_INDEX_DIR").map(PathBuf::from),
            top_k: get("RAG_TOP_K")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TOP_K),
            embedding_model: get("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            embedding_api_key: get("EMBEDDING_API_KEY").or_else(|| get("OPENAI_API_KEY")),
            embedding_api_base: get("EMBEDDING_API_BASE"),
            max_tool_calls: get("RAG_MAX_TOOL_CALLS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_TOOL_CALLS),
            history_window: get("RAG_HISTORY_WINDOW")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_HISTORY_WINDOW),
        }
    }

    pub fn budget(&self) -> ToolBudget {
        ToolBudget::uniform(self.max_tool_calls)
    }

    /// Paths of the (listing, market) index files, when an index directory is set.
    pub fn index_paths(&self) -> Option<(PathBuf, PathBuf)> {
        self.index_dir
            .as_ref()
            .map(|dir| (dir.join(LISTING_INDEX_FILE), dir.join(MARKET_INDEX_FILE)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(pairs: &[(&str, &str)]) -> RagConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RagConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let c = RagConfig::default();
        assert_eq!(c.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(c.model, "openai/gpt-oss-120b");
        assert_eq!(c.temperature, 0.0);
        assert_eq!(c.tool_choice, ToolChoiceMode::Auto);
        assert_eq!(c.llm_api_base, "https://api.groq.com/openai/v1");
        assert!(c.index_dir.is_none());
        assert_eq!(c.top_k, 4);
        assert_eq!(c.max_tool_calls, 3);
        assert_eq!(c.history_window, 10);
        assert_eq!(c.budget(), ToolBudget::default());
        assert!(c.index_paths().is_none());
    }

    #[test]
    fn api_keys_fall_back_to_provider_variables() {
        let c = from_map(&[("GROQ_API_KEY", "gsk"), ("OPENAI_API_KEY", "sk")]);
        assert_eq!(c.llm_api_key.as_deref(), Some("gsk"));
        assert_eq!(c.embedding_api_key.as_deref(), Some("sk"));
        let c = from_map(&[("LLM_API_KEY", "primary"), ("GROQ_API_KEY", "gsk")]);
        assert_eq!(c.llm_api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn overrides_and_bad_numbers() {
        let c = from_map(&[
            ("SYSTEM_PROMPT", "custom"),
            ("RAG_MAX_TOOL_CALLS", "5"),
            ("RAG_TOP_K", "many"),
            ("RAG_INDEX_DIR", "/data/idx"),
            ("RAG_MODEL", "  "),
        ]);
        assert_eq!(c.system_prompt, "custom");
        assert_eq!(c.max_tool_calls, 5);
        assert_eq!(c.top_k, 4);
        assert_eq!(c.model, DEFAULT_MODEL);
        let (listing, market) = c.index_paths().unwrap();
        assert!(listing.ends_with("listing_index.json"));
        assert!(market.ends_with("market_index.json"));
    }

    #[test]
    fn tool_choice_is_parsed_and_bad_values_fall_back() {
        assert_eq!(
            from_map(&[("RAG_TOOL_CHOICE", "Required")]).tool_choice,
            ToolChoiceMode::Required
        );
        assert_eq!(
            from_map(&[("RAG_TOOL_CHOICE", "sometimes")]).tool_choice,
            ToolChoiceMode::Auto
        );
    }

    /// **Scenario**: a present but blank prompt is kept; only an absent one uses the default.
    #[test]
    fn system_prompt_falls_back_only_when_absent() {
        assert_eq!(from_map(&[("SYSTEM_PROMPT", "   ")]).system_prompt, "   ");
        assert_eq!(from_map(&[]).system_prompt, DEFAULT_SYSTEM_PROMPT);
    }
}
