// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Production client over reqwest.

use super::sse::delta_events;
use super::types::{ChatRequest, GenerationClient, GenerationError, GenerationStream};
use crate::config::Config;
use async_trait::async_trait;
use std::time::Duration;

/// Client for an OpenAI-compatible chat-completions service.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout_ms.map(Duration::from_millis),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    async fn post(
        &self,
        body: &serde_json::Value,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, GenerationError> {
        let mut request = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout(e.to_string())
    } else {
        GenerationError::Transport(e.to_string())
    }
}

#[async_trait]
impl GenerationClient for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, GenerationError> {
        let body = serde_json::to_value(&request)
            .map_err(|e| GenerationError::Transport(format!("request serialization: {e}")))?;

        let response = self.post(&body, self.timeout).await?;
        let json: serde_json::Value = response.json().await.map_err(map_reqwest_error)?;

        let content = json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|t| t.as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty());

        match content {
            Some(text) => Ok(text.to_string()),
            None => Err(GenerationError::EmptyCompletion),
        }
    }

    async fn stream(&self, request: ChatRequest) -> Result<GenerationStream, GenerationError> {
        let mut body = serde_json::to_value(&request)
            .map_err(|e| GenerationError::Transport(format!("request serialization: {e}")))?;
        if let Some(obj) = body.as_object_mut() {
            obj.insert("stream".to_string(), serde_json::Value::Bool(true));
        }

        // No per-request timeout here: a healthy stream may legitimately
        // run for a long time, and the wake session ends it on client
        // disconnect anyway.
        let response = self.post(&body, None).await?;
        Ok(Box::pin(delta_events(response.bytes_stream())))
    }
}
