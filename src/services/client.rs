// src/services/client.rs
use std::time::Duration;

use async_trait::async_trait;

use crate::message::{ChatRequest, ChatResponse};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to chat endpoint failed: {0}")]
    Request(String),

    #[error("chat endpoint returned status {0}")]
    Status(u16),

    #[error("chat endpoint reply could not be decoded: {0}")]
    Decode(String),
}

/// How a chat session reaches the `/chat` endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;
}

pub struct HttpChatClient {
    http: reqwest::Client,
    chat_url: String,
}

impl HttpChatClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;
        Ok(Self {
            http,
            chat_url: format!("{}/chat", base_url.trim_end_matches('/')),
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let response = self
            .http
            .post(&self.chat_url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
