use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use core_dba::chat_reply;

use crate::models::{ApiError, ChatPayload, ChatResponse};
use crate::routes::AppState;

/// POST /api/chat - Answer a single chat message with a plain-text reply.
pub async fn post_chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let message = payload.message.ok_or(ApiError::MissingField("Message is required"))?;

    let reply = chat_reply(state.llm.as_ref(), &message).await?;

    Ok((StatusCode::OK, Json(ChatResponse { reply })))
}
