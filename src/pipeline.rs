use std::sync::Arc;

use tokio::sync::mpsc;

use crate::errors::ApiError;
use crate::llm::CompletionProvider;
use crate::models::ChatMessage;
use crate::rag::{format_matches, Embedder, VectorIndex};

const SYSTEM_PROMPT: &str = "You are a rate-my-professor assistant that helps students find \
classes. Professor reviews relevant to the user's question are appended after the question. \
Use them to answer when they are relevant.";

/// One request/response cycle: embed the latest question, retrieve
/// relevant reviews, inject them into the conversation and open the
/// completion stream.
///
/// Each call runs an independent pipeline instance; the shared clients
/// are immutable, so concurrent requests never interfere.
pub struct RagPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    completions: Arc<dyn CompletionProvider>,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        completions: Arc<dyn CompletionProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            completions,
            top_k,
        }
    }

    /// Runs the pipeline for one conversation.
    ///
    /// The original history is preserved except for the last message,
    /// whose content is replaced by its context-augmented form. On
    /// success the returned receiver yields the model's answer
    /// incrementally.
    pub async fn run(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<mpsc::Receiver<Result<String, ApiError>>, ApiError> {
        let last = messages
            .last()
            .cloned()
            .ok_or_else(|| ApiError::InvalidRequest("message list is empty".to_string()))?;

        tracing::debug!(messages = messages.len(), "embedding query");
        let vector = self.embedder.embed(&last.content).await?;

        tracing::debug!(dimensions = vector.len(), top_k = self.top_k, "querying index");
        let matches = self.index.query(&vector, self.top_k).await?;

        tracing::debug!(matches = matches.len(), "building context");
        let context = format_matches(&matches);

        let mut outbound = Vec::with_capacity(messages.len() + 1);
        outbound.push(ChatMessage::system(SYSTEM_PROMPT));
        outbound.extend(messages[..messages.len() - 1].iter().cloned());
        outbound.push(ChatMessage::new(
            last.role,
            format!("{}{}", last.content, context),
        ));

        self.completions.stream_chat(outbound).await
    }
}
