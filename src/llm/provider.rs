use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::errors::ApiError;
use crate::models::ChatMessage;

/// Streaming chat completion against a language-model provider.
///
/// Each call opens one single-use stream: the receiver yields content
/// fragments in arrival order, closes on natural completion, and carries
/// a terminal `Err` if the stream breaks mid-flight.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn stream_chat(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<mpsc::Receiver<Result<String, ApiError>>, ApiError>;
}
