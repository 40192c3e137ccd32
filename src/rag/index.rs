use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::IndexConfig;
use crate::errors::ApiError;

/// Metadata stored alongside each review vector.
///
/// Fields default individually so a partially populated match still
/// renders instead of failing the whole query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewMetadata {
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub stars: f64,
}

/// A single retrieved review, in provider ranking order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewMatch {
    pub id: String,
    #[serde(default)]
    pub metadata: ReviewMetadata,
}

/// Nearest-neighbor lookup against the review index.
///
/// The returned order is the provider's relevance ranking and is never
/// re-sorted locally.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ReviewMatch>, ApiError>;
}

/// `VectorIndex` backed by a Pinecone-style REST endpoint.
pub struct PineconeIndex {
    client: Client,
    config: IndexConfig,
}

impl PineconeIndex {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self) -> String {
        format!("{}/query", self.config.host.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    matches: Vec<ReviewMatch>,
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ReviewMatch>, ApiError> {
        let body = json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true,
            "namespace": self.config.namespace,
        });

        let response = self
            .client
            .post(self.url())
            .header("Api-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::retrieval)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Retrieval(format!(
                "provider returned {}: {}",
                status, text
            )));
        }

        let payload: QueryResponse = response.json().await.map_err(ApiError::retrieval)?;

        Ok(payload.matches)
    }
}
