#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rfa_chat::services::provider::{CompletionProvider, ContentItem, ProviderError, Turn};

/// In-memory provider: records every context it is given and answers with a
/// canned outcome.
pub struct FakeProvider {
    pub calls: Mutex<Vec<Vec<Turn>>>,
    outcome: Outcome,
}

enum Outcome {
    Items(Vec<ContentItem>),
    Fail(u16),
}

impl FakeProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Self::with_items(vec![ContentItem {
            text: Some(text.to_string()),
            model_id: Some("fake-model".to_string()),
            ..Default::default()
        }])
    }

    pub fn with_items(items: Vec<ContentItem>) -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(Vec::new()), outcome: Outcome::Items(items) })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self { calls: Mutex::new(Vec::new()), outcome: Outcome::Fail(status) })
    }

    pub fn recorded(&self) -> Vec<Vec<Turn>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, turns: &[Turn]) -> Result<Vec<ContentItem>, ProviderError> {
        self.calls.lock().unwrap().push(turns.to_vec());
        match &self.outcome {
            Outcome::Items(items) => Ok(items.clone()),
            Outcome::Fail(status) => Err(ProviderError::Status {
                status: *status,
                body: "quota exceeded".to_string(),
            }),
        }
    }
}
