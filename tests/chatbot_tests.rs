mod common;

use common::FakeProvider;
use rfa_chat::services::chatbot::{
    STYLE_HINT, SYSTEM_PROMPT, build_conversation, reply, to_chat_response,
};
use rfa_chat::services::provider::{ContentItem, ProviderError, Role, Turn};
use serde_json::{Map, Value};

#[test]
fn test_build_conversation() {
    let turns = build_conversation("Hello");
    assert_eq!(
        turns,
        vec![
            Turn::new(Role::System, SYSTEM_PROMPT),
            Turn::new(Role::Assistant, STYLE_HINT),
            Turn::new(Role::User, "Hello"),
        ]
    );
}

#[test]
fn test_prompt_is_forwarded_verbatim() {
    let turns = build_conversation("  what does RFA do?\n");
    assert_eq!(turns[2].content, "  what does RFA do?\n");
}

#[test]
fn test_to_chat_response_copies_every_field() {
    let mut metadata = Map::new();
    metadata.insert("finish_reason".into(), Value::from("stop"));
    let item = ContentItem {
        text: Some("Hi".into()),
        model_id: Some("gpt-4o-mini".into()),
        metadata: metadata.clone(),
    };

    let response = to_chat_response(item);
    assert_eq!(response.text.as_deref(), Some("Hi"));
    assert_eq!(response.model_id.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(response.metadata, metadata);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["text"], "Hi");
    assert_eq!(json["metadata"]["finish_reason"], "stop");
}

#[tokio::test]
async fn test_reply_uses_first_item() {
    let provider = FakeProvider::replying("Short answer.");
    let response = reply(provider.as_ref(), "Hello").await.unwrap();
    assert_eq!(response.text.as_deref(), Some("Short answer."));
    assert_eq!(provider.recorded()[0], build_conversation("Hello"));
}

#[tokio::test]
async fn test_reply_errors() {
    let provider = FakeProvider::with_items(vec![]);
    let err = reply(provider.as_ref(), "Hello").await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse));

    let provider = FakeProvider::failing(401);
    let err = reply(provider.as_ref(), "Hello").await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 401, .. }));
}
