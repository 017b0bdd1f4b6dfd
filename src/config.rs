// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// Gateway configuration.
//
// Everything comes from the environment (a .env file is honored at
// startup). The struct is passed into handlers via AppState -- the
// engine itself holds no process-wide state.

/// All errors that can occur during config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TEXT_MODEL: &str = "gpt-4o";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o-mini";

/// Parsed and validated gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key sent as a bearer token to the generation service.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible service, no trailing slash.
    pub base_url: String,
    /// Model used for text-only generation (replies, wake streaming).
    pub text_model: String,
    /// Model used for requests that carry image parts.
    pub vision_model: String,
    /// Per-request timeout for non-streaming upstream calls, if any.
    /// Streaming sessions are deliberately unbounded.
    pub timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an injected variable source.
    ///
    /// The seam exists so tests never have to mutate the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;

        let base_url = lookup("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let text_model =
            lookup("VELORA_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string());
        let vision_model =
            lookup("VELORA_VISION_MODEL").unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string());

        let timeout_ms = match lookup("VELORA_TIMEOUT_MS") {
            None => None,
            Some(raw) => Some(raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidVar {
                    name: "VELORA_TIMEOUT_MS",
                    reason: e.to_string(),
                }
            })?),
        };

        Ok(Self {
            api_key,
            base_url,
            text_model,
            vision_model,
            timeout_ms,
        })
    }
}
