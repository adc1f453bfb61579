// src/services/chatbot.rs
use crate::message::ChatResponse;
use crate::services::provider::{CompletionProvider, ContentItem, ProviderError, Role, Turn};

pub const SYSTEM_PROMPT: &str =
    "You are an AI assistant that helps people find information realated to RFA company (rfa.com)";
pub const STYLE_HINT: &str = "short answer only";

/// The per-call context: system instruction, style hint, then the user's prompt.
/// Nothing from earlier calls is carried over.
pub fn build_conversation(prompt: &str) -> Vec<Turn> {
    vec![
        Turn::new(Role::System, SYSTEM_PROMPT),
        Turn::new(Role::Assistant, STYLE_HINT),
        Turn::new(Role::User, prompt),
    ]
}

pub fn to_chat_response(item: ContentItem) -> ChatResponse {
    ChatResponse {
        text: item.text,
        model_id: item.model_id,
        metadata: item.metadata,
    }
}

/// One provider round-trip. Only the first content item is relayed.
pub async fn reply(
    provider: &dyn CompletionProvider,
    prompt: &str,
) -> Result<ChatResponse, ProviderError> {
    let turns = build_conversation(prompt);
    let items = provider.complete(&turns).await?;
    let first = items.into_iter().next().ok_or(ProviderError::EmptyResponse)?;
    Ok(to_chat_response(first))
}
