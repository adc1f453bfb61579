use axum::{Json, extract::State};
use tracing::info;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::chatbot::reply,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if payload.prompt.trim().is_empty() {
        return Err(AppError::BadRequest("Prompt cannot be empty".to_string()));
    }

    info!(prompt_len = payload.prompt.len(), "chat: prompt received");
    let response = reply(state.provider.as_ref(), &payload.prompt).await?;
    info!(
        has_text = response.text.is_some(),
        model = response.model_id.as_deref().unwrap_or("unknown"),
        "chat: reply relayed"
    );

    Ok(Json(response))
}
