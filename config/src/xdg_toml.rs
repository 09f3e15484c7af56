//! Loads the `[env]` table from `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `$XDG_CONFIG_HOME` when set and non-empty, otherwise the platform config dir.
fn config_home() -> Result<PathBuf, LoadError> {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => dirs::config_dir()
            .ok_or_else(|| LoadError::XdgPath("no config directory for this platform".into())),
    }
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, toml::Value>,
}

/// Non-string scalars (`RAG_TOP_K = 6`) are accepted and stringified; tables and arrays are dropped.
fn env_value(value: toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_env_table(content: &str) -> Result<HashMap<String, String>, LoadError> {
    let config: ConfigFile = toml::from_str(content)?;
    Ok(config
        .env
        .into_iter()
        .filter_map(|(k, v)| env_value(v).map(|v| (k, v)))
        .collect())
}

fn load_from(path: &Path) -> Result<HashMap<String, String>, LoadError> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(LoadError::XdgRead)?;
    parse_env_table(&content)
}

/// Returns the `[env]` pairs for `app_name`. A missing file or section returns an empty map.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    load_from(&config_home()?.join(app_name).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_env_table() {
        let map = parse_env_table(
            r#"
[env]
LLM_API_BASE = "https://api.groq.com/openai/v1"
RAG_TOP_K = 6
RAG_TEMPERATURE = 0.2
"#,
        )
        .unwrap();
        assert_eq!(
            map.get("LLM_API_BASE").map(String::as_str),
            Some("https://api.groq.com/openai/v1")
        );
        assert_eq!(map.get("RAG_TOP_K").map(String::as_str), Some("6"));
        assert_eq!(map.get("RAG_TEMPERATURE").map(String::as_str), Some("0.2"));
    }

    #[test]
    fn nested_values_are_dropped() {
        let map = parse_env_table("[env]\nOK = \"yes\"\nLIST = [1, 2]\n").unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn missing_or_empty_section_returns_empty_map() {
        assert!(parse_env_table("[env]\n").unwrap().is_empty());
        assert!(parse_env_table("[other]\nkey = \"ignored\"\n")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn invalid_toml_returns_xdg_parse_error() {
        let result = parse_env_table("not valid toml [[[\n");
        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }

    #[test]
    fn missing_file_returns_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let map = load_from(&dir.path().join("nope").join("config.toml")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[env]\nRAG_MODEL = \"openai/gpt-oss-120b\"\n").unwrap();
        let map = load_from(&path).unwrap();
        assert_eq!(
            map.get("RAG_MODEL").map(String::as_str),
            Some("openai/gpt-oss-120b")
        );
    }
}
