use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use super::provider::CompletionProvider;
use crate::config::CompletionConfig;
use crate::errors::ApiError;
use crate::models::ChatMessage;

/// `CompletionProvider` for an OpenRouter-style OpenAI-compatible API.
pub struct OpenRouterProvider {
    client: Client,
    config: CompletionConfig,
}

impl OpenRouterProvider {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

/// Splits complete lines off the front of the SSE buffer.
///
/// Partial lines stay buffered until the next network chunk arrives, so
/// a `data:` payload split across chunks is reassembled before parsing.
fn drain_lines(buffer: &mut String) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(pos) = buffer.find('\n') {
        let line = buffer[..pos].trim().to_string();
        buffer.drain(..=pos);
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

fn delta_content(payload: &Value) -> Option<String> {
    payload
        .get("choices")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("delta"))
        .and_then(|delta| delta.get("content"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    async fn stream_chat(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<mpsc::Receiver<Result<String, ApiError>>, ApiError> {
        let body = json!({
            "model": self.config.model,
            "messages": messages,
            "stream": true,
        });

        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::completion)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Completion(format!(
                "provider returned {}: {}",
                status, text
            )));
        }

        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(item) = stream.next().await {
                match item {
                    Ok(bytes) => {
                        buffer.push_str(&String::from_utf8_lossy(&bytes));

                        for line in drain_lines(&mut buffer) {
                            let Some(payload) = line.strip_prefix("data:") else {
                                continue;
                            };
                            let data = payload.trim();
                            if data == "[DONE]" {
                                return;
                            }
                            if let Ok(value) = serde_json::from_str::<Value>(data) {
                                if let Some(content) = delta_content(&value) {
                                    if !content.is_empty()
                                        && tx.send(Ok(content)).await.is_err()
                                    {
                                        // Receiver dropped: the caller went away.
                                        return;
                                    }
                                }
                            }
                        }
                    }
                    Err(err) => {
                        let _ = tx.send(Err(ApiError::interrupted(err))).await;
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn drain_lines_keeps_partial_line_buffered() {
        let mut buffer = String::from("data: {\"a\":1}\ndata: {\"b\"");
        let lines = drain_lines(&mut buffer);
        assert_eq!(lines, vec!["data: {\"a\":1}"]);
        assert_eq!(buffer, "data: {\"b\"");

        buffer.push_str(":2}\n\n");
        let lines = drain_lines(&mut buffer);
        assert_eq!(lines, vec!["data: {\"b\":2}"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn delta_content_extracts_fragment() {
        let payload = json!({
            "choices": [{"delta": {"content": "Hello"}}]
        });
        assert_eq!(delta_content(&payload), Some("Hello".to_string()));
    }

    #[test]
    fn delta_content_ignores_role_only_chunks() {
        let payload = json!({
            "choices": [{"delta": {"role": "assistant"}}]
        });
        assert_eq!(delta_content(&payload), None);
        assert_eq!(delta_content(&json!({"choices": []})), None);
    }
}
