// src/services/provider.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{ProviderConfig, ProviderKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

/// One role-tagged message sent to the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

// `text` is None for non-text output such as a filtered completion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentItem {
    pub text: Option<String>,
    pub model_id: Option<String>,
    pub metadata: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider returned status {status}")]
    Status { status: u16, body: String },

    #[error("provider response could not be parsed: {0}")]
    Parse(String),

    #[error("provider returned no content")]
    EmptyResponse,

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Submit the ordered turns and return the generated content items.
    async fn complete(&self, turns: &[Turn]) -> Result<Vec<ContentItem>, ProviderError>;
}

pub struct OpenAiChatClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl OpenAiChatClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ProviderError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiChatClient {
    async fn complete(&self, turns: &[Turn]) -> Result<Vec<ContentItem>, ProviderError> {
        // Azure picks the model from the deployment path; the body field is
        // only sent to OpenAI-compatible servers.
        let model = match self.config.kind {
            ProviderKind::AzureOpenAi => None,
            ProviderKind::OpenAi => Some(self.config.model.as_str()),
        };
        let body = CompletionRequest { model, messages: turns };

        let request = self.http.post(completions_url(&self.config)).json(&body);
        let request = match self.config.kind {
            ProviderKind::AzureOpenAi => request.header("api-key", &self.config.api_key),
            ProviderKind::OpenAi => request.bearer_auth(&self.config.api_key),
        };

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        if status != 200 {
            return Err(ProviderError::Status { status, body: text });
        }

        parse_completion_response(&text)
    }
}

pub fn completions_url(config: &ProviderConfig) -> String {
    match config.kind {
        ProviderKind::AzureOpenAi => format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            config.endpoint, config.model, config.api_version
        ),
        ProviderKind::OpenAi => format!("{}/chat/completions", config.endpoint),
    }
}

// ---- wire types ----

#[derive(Serialize)]
struct CompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: &'a [Turn],
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    index: u32,
    #[serde(default)]
    finish_reason: Option<String>,
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Map a chat-completions body to content items, one per choice in order.
pub fn parse_completion_response(body: &str) -> Result<Vec<ContentItem>, ProviderError> {
    let parsed: CompletionResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let items = parsed
        .choices
        .into_iter()
        .map(|choice| {
            let mut metadata = Map::new();
            metadata.insert("choice_index".into(), Value::from(choice.index));
            if let Some(reason) = choice.finish_reason {
                metadata.insert("finish_reason".into(), Value::String(reason));
            }
            ContentItem {
                text: choice.message.content,
                model_id: parsed.model.clone(),
                metadata,
            }
        })
        .collect();
    Ok(items)
}
