//! Provider trait — the abstraction over LLM backends.
//!
//! A Provider knows how to send a fully assembled prompt to an LLM and get
//! a single response back. Promptloom builds exactly one prompt per run,
//! so the surface is a one-shot `complete` call: no conversation state,
//! no tool use, no streaming.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A one-shot completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "claude-3-opus-20240229")
    pub model: String,

    /// The fully expanded user prompt
    pub prompt: String,

    /// System prompt (empty string = none)
    #[serde(default)]
    pub system: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default)]
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text, all text blocks joined
    pub text: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The abstraction over LLM inference backends.
#[async_trait]
pub trait Provider: Send + Sync {
    /// The provider's name (for logging and diagnostics).
    fn name(&self) -> &str;

    /// Submit a prompt and wait for the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError>;
}
