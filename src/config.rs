use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;

const REDACT_PLACEHOLDER: &str = "****";

const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
const DEFAULT_INDEX_NAMESPACE: &str = "ns1";
const DEFAULT_TOP_K: usize = 5;
const DEFAULT_COMPLETION_ENDPOINT: &str = "https://openrouter.ai/api";
const DEFAULT_COMPLETION_MODEL: &str = "meta-llama/llama-3-70b-instruct";

/// Filesystem locations used by the service.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let data_dir = env::var("LECTERN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let log_dir = data_dir.join("logs");

        let _ = fs::create_dir_all(&log_dir);

        AppPaths { data_dir, log_dir }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct EmbeddingConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
}

#[derive(Clone)]
pub struct IndexConfig {
    pub api_key: String,
    pub host: String,
    pub namespace: String,
    pub top_k: usize,
}

#[derive(Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
}

/// Immutable service configuration, loaded once at startup and injected
/// into the provider clients. Nothing reads the environment afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub completion: CompletionConfig,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(AppConfig {
            embedding: EmbeddingConfig {
                api_key: require_env("HUGGINGFACE_API_KEY")?,
                endpoint: env_or("LECTERN_EMBEDDING_ENDPOINT", DEFAULT_EMBEDDING_ENDPOINT),
                model: env_or("LECTERN_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            },
            index: IndexConfig {
                api_key: require_env("PINECONE_API_KEY")?,
                host: require_env("PINECONE_INDEX_HOST")?,
                namespace: env_or("LECTERN_INDEX_NAMESPACE", DEFAULT_INDEX_NAMESPACE),
                top_k: env::var("LECTERN_TOP_K")
                    .ok()
                    .and_then(|val| val.parse::<usize>().ok())
                    .filter(|k| *k > 0)
                    .unwrap_or(DEFAULT_TOP_K),
            },
            completion: CompletionConfig {
                api_key: require_env("OPENROUTER_API_KEY")?,
                endpoint: env_or("LECTERN_COMPLETION_ENDPOINT", DEFAULT_COMPLETION_ENDPOINT),
                model: env_or("LECTERN_COMPLETION_MODEL", DEFAULT_COMPLETION_MODEL),
            },
            allowed_origins: env::var("LECTERN_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_else(|_| default_local_origins()),
        })
    }
}

fn require_env(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{} is not set", key))
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect::<Vec<_>>();

    if origins.is_empty() {
        return default_local_origins();
    }

    origins
}

fn default_local_origins() -> Vec<String> {
    vec![
        "http://localhost".to_string(),
        "http://localhost:3000".to_string(),
        "http://127.0.0.1".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

// Credentials must never reach the logs, so Debug redacts them.
impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("api_key", &REDACT_PLACEHOLDER)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

impl fmt::Debug for IndexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexConfig")
            .field("api_key", &REDACT_PLACEHOLDER)
            .field("host", &self.host)
            .field("namespace", &self.namespace)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &REDACT_PLACEHOLDER)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins("http://a.example, http://b.example ,");
        assert_eq!(origins, vec!["http://a.example", "http://b.example"]);
    }

    #[test]
    fn parse_origins_empty_falls_back_to_local_defaults() {
        let origins = parse_origins("  , ");
        assert_eq!(origins, default_local_origins());
    }

    #[test]
    fn debug_redacts_credentials() {
        let config = IndexConfig {
            api_key: "pc-secret".to_string(),
            host: "https://rag.example.io".to_string(),
            namespace: "ns1".to_string(),
            top_k: 5,
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("pc-secret"));
        assert!(rendered.contains("****"));
    }
}
