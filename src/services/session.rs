// src/services/session.rs
use std::fmt;

use tracing::warn;

use crate::message::{ChatRequest, ChatResponse};
use crate::services::client::ChatTransport;

pub const WELCOME_TEXT: &str = "Chatbot for RFA";
pub const THINKING_PLACEHOLDER: &str = "Thinking...";
pub const NO_RESPONSE: &str = "No response";
pub const ERROR_REPLY: &str = "Error: Something went wrong.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// One transcript line for terminal output.
    pub fn transcript_line(&self) -> String {
        let marker = match self.role {
            MessageRole::User => ">",
            MessageRole::Assistant => "<",
        };
        format!("{marker} {}", self.content)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Awaiting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry<'a> {
    Message(&'a Message),
    Thinking,
}

#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<Message>,
    input: String,
    phase: Phase,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            phase: Phase::Idle,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_input_enabled(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        if !self.is_input_enabled() {
            return false;
        }
        self.input = text.into();
        true
    }

    /// `None` when the input is blank or a request is already outstanding.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        if !self.is_input_enabled() || self.input.trim().is_empty() {
            return None;
        }
        let prompt = std::mem::take(&mut self.input);
        self.messages.push(Message {
            role: MessageRole::User,
            content: prompt.clone(),
        });
        self.phase = Phase::Awaiting;
        Some(ChatRequest { prompt })
    }

    // Returns the appended assistant message, None if nothing was outstanding.
    pub fn resolve<E: fmt::Display>(&mut self, outcome: Result<ChatResponse, E>) -> Option<&Message> {
        if self.phase != Phase::Awaiting {
            return None;
        }
        let content = match outcome {
            Ok(response) => response
                .text
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| NO_RESPONSE.to_string()),
            Err(e) => {
                warn!(error = %e, "chat request failed");
                ERROR_REPLY.to_string()
            }
        };
        self.messages.push(Message {
            role: MessageRole::Assistant,
            content,
        });
        self.phase = Phase::Idle;
        self.messages.last()
    }

    pub async fn submit(&mut self, transport: &dyn ChatTransport) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let outcome = transport.send(&request).await;
        self.resolve(outcome);
        true
    }

    pub fn entries(&self) -> Vec<Entry<'_>> {
        let mut entries: Vec<Entry<'_>> = self.messages.iter().map(Entry::Message).collect();
        if self.phase == Phase::Awaiting {
            entries.push(Entry::Thinking);
        }
        entries
    }

    /// Index of the newest rendered entry; the view keeps it in sight.
    pub fn scroll_target(&self) -> Option<usize> {
        self.entries().len().checked_sub(1)
    }
}
