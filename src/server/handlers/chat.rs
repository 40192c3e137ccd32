use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::ChatMessage;
use crate::state::AppState;

/// Streams a retrieval-augmented answer for the given conversation.
///
/// Failures before streaming begins surface as a fixed-status error
/// response. Once chunks are flowing the headers are gone; an upstream
/// error instead aborts the chunked body so the client observes the
/// truncation. If the client disconnects, dropping the body closes the
/// receiver and the completion task stops pulling from the provider.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(messages): Json<Vec<ChatMessage>>,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, messages = messages.len(), "chat request");

    let rx = state.pipeline.run(messages).await?;

    let stream = ReceiverStream::new(rx).map(move |item| {
        if let Err(err) = &item {
            tracing::error!(%request_id, error = %err, "chat stream terminated abnormally");
        }
        item
    });

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(stream),
    )
        .into_response())
}
