// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Generation source.
//
// Responsibilities:
// - Define the client abstraction the handlers are written against
// - Chat request/message types serialized to the OpenAI wire format
// - Production implementation over reqwest, streaming and single-shot
//
// The rest of the gateway never inspects source-specific event subtypes
// beyond "text delta" vs "end of stream".

mod openai;
mod sse;
mod types;

pub use openai::OpenAiClient;
pub use sse::delta_events;
pub use types::{
    ChatContent, ChatMessage, ChatRequest, ChatRole, ContentPart, GenerationClient,
    GenerationError, GenerationEvent, GenerationStream, ImageUrl,
};
