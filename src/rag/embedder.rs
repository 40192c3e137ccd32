use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::EmbeddingConfig;
use crate::errors::ApiError;

/// Converts a text query into an embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError>;
}

/// Embedder backed by a Hugging Face Inference API style endpoint.
///
/// One outbound call per query, no retries. A response without an
/// embedding vector is a failure, never an empty vector.
pub struct HfEmbedder {
    client: Client,
    config: EmbeddingConfig,
}

impl HfEmbedder {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

fn first_embedding(items: Vec<EmbeddingItem>) -> Option<Vec<f32>> {
    items
        .into_iter()
        .next()
        .and_then(|item| item.embedding)
        .filter(|vector| !vector.is_empty())
}

#[async_trait]
impl Embedder for HfEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError> {
        let body = json!({ "inputs": text });

        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::embedding)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Embedding(format!(
                "provider returned {}: {}",
                status, text
            )));
        }

        let payload: Vec<EmbeddingItem> = response.json().await.map_err(ApiError::embedding)?;

        first_embedding(payload)
            .ok_or_else(|| ApiError::Embedding("response missing embedding vector".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(payload: serde_json::Value) -> Option<Vec<f32>> {
        let items: Vec<EmbeddingItem> =
            serde_json::from_value(payload).expect("payload should deserialize");
        first_embedding(items)
    }

    #[test]
    fn extracts_vector_from_first_item() {
        let vector = parse(json!([{"embedding": [0.1, 0.2]}, {"embedding": [0.3]}]));
        assert_eq!(vector, Some(vec![0.1_f32, 0.2_f32]));
    }

    #[test]
    fn missing_embedding_field_yields_none() {
        assert_eq!(parse(json!([{}])), None);
        assert_eq!(parse(json!([])), None);
    }

    #[test]
    fn empty_vector_is_treated_as_missing() {
        assert_eq!(parse(json!([{"embedding": []}])), None);
    }
}
