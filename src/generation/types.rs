// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Chat types and the client abstraction.

use async_trait::async_trait;
use futures_util::stream::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by the generation client.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("upstream request timed out: {0}")]
    Timeout(String),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no reply returned from model")]
    EmptyCompletion,
}

// ---------------------------------------------------------------------------
// Chat messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Message content: either a plain string or an array of typed parts
/// (text and image URLs), matching the chat-completions wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: ChatContent,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: ChatContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: ChatContent::Text(content.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: ChatRole::User,
            content: ChatContent::Parts(parts),
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// One generation request. The streaming flag is not part of this
/// struct; the client sets it on the wire according to which method
/// was called.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Raw `response_format` payload, e.g. a json_schema constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Streaming events
// ---------------------------------------------------------------------------

/// What the segmentation driver consumes: an asynchronous sequence of
/// text deltas terminated by completion or error.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// One incremental text fragment.
    Delta(String),
    /// The source finished successfully.
    Done,
    /// The source failed mid-stream; the message is relayed verbatim.
    Error(String),
}

pub type GenerationStream = Pin<Box<dyn Stream<Item = GenerationEvent> + Send>>;

// ---------------------------------------------------------------------------
// Trait: GenerationClient (dependency injection point)
// ---------------------------------------------------------------------------

/// Abstraction over the remote generation service.
///
/// Implementations must be Send + Sync so they can be shared across
/// request handlers via `Arc`. Handlers and the wake session are tested
/// against scripted implementations of this trait.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Single-shot completion: returns the assistant message content.
    async fn complete(&self, request: ChatRequest) -> Result<String, GenerationError>;

    /// Streaming completion: returns the delta event sequence.
    ///
    /// An `Err` here means the stream could not be started at all;
    /// failures after that arrive in-band as `GenerationEvent::Error`.
    async fn stream(&self, request: ChatRequest) -> Result<GenerationStream, GenerationError>;
}
