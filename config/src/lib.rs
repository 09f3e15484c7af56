//! Load configuration from XDG `config.toml` and project `.env`, then apply to the process
//! environment with priority: **existing env > .env > XDG**.
//!
//! `market_rag::RagConfig::from_env` reads the typed values afterwards, so every key listed
//! there (`LLM_API_KEY`, `RAG_INDEX_DIR`, ...) can live in either file.
//!
//! With the `tracing-init` feature, [`init_tracing`] installs the console and per-run file
//! logging used by the CLI.

mod dotenv;
mod xdg_toml;

#[cfg(feature = "tracing-init")]
mod logging;

#[cfg(feature = "tracing-init")]
pub use logging::{init_tracing, LoggingOptions};

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
    #[cfg(feature = "tracing-init")]
    #[error("open log file: {0}")]
    LogFile(std::io::Error),
    #[cfg(feature = "tracing-init")]
    #[error("install tracing subscriber: {0}")]
    Tracing(String),
}

/// Picks the value for each key missing from the process environment: `.env` first, then XDG.
///
/// Keys already present in `is_set` are skipped. Returned pairs are sorted by key.
fn merge_missing(
    dotenv: &HashMap<String, String>,
    xdg: &HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String)> {
    let keys: BTreeSet<&String> = dotenv.keys().chain(xdg.keys()).collect();
    keys.into_iter()
        .filter(|k| !is_set(k))
        .filter_map(|k| {
            dotenv
                .get(k)
                .or_else(|| xdg.get(k))
                .map(|v| (k.clone(), v.clone()))
        })
        .collect()
}

/// Loads config from XDG `config.toml` and optional project `.env`, then sets environment
/// variables only for keys that are **not** already set (so existing env has highest priority).
///
/// Order of precedence when a key is missing in the process environment:
/// 1. Value from project `.env` (current directory or `override_dir` if given)
/// 2. Value from `$XDG_CONFIG_HOME/<app_name>/config.toml` `[env]` table
///
/// * `app_name`: `"market-rag"` for the CLI; selects `~/.config/<app_name>/config.toml`.
/// * `override_dir`: if `Some`, look for `.env` in this directory instead of the current one.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    for (key, value) in merge_missing(&dotenv_map, &xdg_map, |k| std::env::var_os(k).is_some()) {
        std::env::set_var(key, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn restore_var(key: &str, prev: Option<String>) {
        match prev {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }
    }

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// **Scenario**: `.env` beats XDG, and keys already in the environment are left alone.
    #[test]
    fn merge_missing_applies_precedence() {
        let dotenv = map(&[("RAG_MODEL", "from_dotenv"), ("LLM_API_KEY", "dotenv-key")]);
        let xdg = map(&[("RAG_MODEL", "from_xdg"), ("RAG_TOP_K", "6")]);
        let merged = merge_missing(&dotenv, &xdg, |k| k == "LLM_API_KEY");
        assert_eq!(
            merged,
            vec![
                ("RAG_MODEL".to_string(), "from_dotenv".to_string()),
                ("RAG_TOP_K".to_string(), "6".to_string()),
            ]
        );
    }

    #[test]
    fn existing_env_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "MRAG_CFG_EXISTING=from_dotenv\n").unwrap();
        env::set_var("MRAG_CFG_EXISTING", "from_env");
        let _ = load_and_apply("market-rag-cfg-test-none", Some(dir.path()));
        assert_eq!(env::var("MRAG_CFG_EXISTING").as_deref(), Ok("from_env"));
        env::remove_var("MRAG_CFG_EXISTING");
    }

    #[test]
    fn no_config_anywhere_is_ok() {
        let empty = tempfile::tempdir().unwrap();
        let r = load_and_apply("market-rag-cfg-test-nonexistent", Some(empty.path()));
        assert!(r.is_ok());
    }

    /// **Scenario**: one test owns `XDG_CONFIG_HOME` so parallel tests never race on it.
    #[test]
    fn xdg_layering_and_parse_errors() {
        let xdg_dir = tempfile::tempdir().unwrap();
        let app_dir = xdg_dir.path().join("market-rag-cfg-test");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(
            app_dir.join("config.toml"),
            "[env]\nMRAG_CFG_PRIORITY = \"from_xdg\"\nMRAG_CFG_XDG_ONLY = \"xdg\"\n",
        )
        .unwrap();
        let dotenv_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dotenv_dir.path().join(".env"),
            "MRAG_CFG_PRIORITY=from_dotenv\n",
        )
        .unwrap();

        let prev_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", xdg_dir.path());
        env::remove_var("MRAG_CFG_PRIORITY");
        env::remove_var("MRAG_CFG_XDG_ONLY");

        let applied = load_and_apply("market-rag-cfg-test", Some(dotenv_dir.path()));
        let priority = env::var("MRAG_CFG_PRIORITY").ok();
        let xdg_only = env::var("MRAG_CFG_XDG_ONLY").ok();
        env::remove_var("MRAG_CFG_PRIORITY");
        env::remove_var("MRAG_CFG_XDG_ONLY");

        std::fs::write(app_dir.join("config.toml"), "invalid [[[\n").unwrap();
        let broken = load_and_apply("market-rag-cfg-test", Some(dotenv_dir.path()));
        restore_var("XDG_CONFIG_HOME", prev_xdg);

        assert!(applied.is_ok());
        assert_eq!(priority.as_deref(), Some("from_dotenv"));
        assert_eq!(xdg_only.as_deref(), Some("xdg"));
        assert!(matches!(broken, Err(LoadError::XdgParse(_))));
    }

    #[test]
    fn dotenv_only_when_no_xdg() {
        let dotenv_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dotenv_dir.path().join(".env"),
            "MRAG_CFG_DOTENV_ONLY=from_dotenv_only\n",
        )
        .unwrap();

        env::remove_var("MRAG_CFG_DOTENV_ONLY");
        let _ = load_and_apply("market-rag-cfg-test-nonexistent", Some(dotenv_dir.path()));
        let val = env::var("MRAG_CFG_DOTENV_ONLY").unwrap();
        env::remove_var("MRAG_CFG_DOTENV_ONLY");

        assert_eq!(val, "from_dotenv_only");
    }
}
