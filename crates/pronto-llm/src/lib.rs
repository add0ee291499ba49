//! # pronto-llm
//!
//! Core abstraction for LLM backends. Every backend implements [`LlmClient`]
//! to expose a single bounded `generate` operation: prompt in, text content
//! and/or structured tool-call requests out.
//!
//! [`NullClient`] is the null-object backend used when no LLM is configured:
//! it fails with [`LlmError::NotConfigured`], and every call site degrades
//! the same way it would for a failing backend. Call sites never branch on
//! whether a "real" client is present.
//!
//! ## Crate Position
//!
//! Depends on `pronto-core` for tool schemas. Consumed by `pronto-runtime`.

#![deny(unsafe_code)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pronto_core::tools::ToolSpec;

/// Result type alias for client operations.
pub type LlmResult<T> = Result<T, LlmError>;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during a generation call.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No backend is configured (the [`NullClient`] case).
    #[error("no LLM client configured")]
    NotConfigured,

    /// Authentication failed (expired token, invalid key, etc.).
    #[error("auth error: {message}")]
    Auth {
        /// Error description.
        message: String,
    },

    /// Rate limited by the backend.
    #[error("rate limited: retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested retry delay in milliseconds.
        retry_after_ms: u64,
        /// Error description.
        message: String,
    },

    /// Backend returned an API error.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
        /// Whether this error can be retried.
        retryable: bool,
    },

    /// The backend's reply could not be interpreted.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Error description.
        message: String,
    },

    /// Backend-specific error.
    #[error("{message}")]
    Other {
        /// Error description.
        message: String,
    },
}

impl LlmError {
    /// Whether this error is retryable. The runtime performs no retries
    /// itself; this informs callers that own a retry policy.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Api { retryable, .. } => *retryable,
            Self::NotConfigured
            | Self::Auth { .. }
            | Self::InvalidResponse { .. }
            | Self::Other { .. } => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request / reply
// ─────────────────────────────────────────────────────────────────────────────

/// A single generation request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmRequest {
    /// User-facing prompt text.
    pub prompt: String,
    /// Optional system prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Tool schemas offered to the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,
}

impl LlmRequest {
    /// Request with only a prompt.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            tools: Vec::new(),
        }
    }

    /// Attach a system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Offer tool schemas to the model.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }
}

/// A tool invocation requested by the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Name of the tool to invoke.
    pub name: String,
    /// Arguments for the invocation.
    pub arguments: serde_json::Map<String, Value>,
}

/// The model's reply: text content and/or tool-call requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmReply {
    /// Generated text.
    pub content: String,
    /// Structured tool calls the model requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
}

impl LlmReply {
    /// Text-only reply.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client trait
// ─────────────────────────────────────────────────────────────────────────────

/// A backend capable of answering generation requests.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for the request.
    async fn generate(&self, request: LlmRequest) -> LlmResult<LlmReply>;

    /// Short identifier for logging.
    fn name(&self) -> &str {
        "llm"
    }
}

/// Null-object backend used when no LLM is configured.
///
/// `generate` always fails with [`LlmError::NotConfigured`]; callers recover
/// exactly as they would from a transient backend failure, so the absence of
/// a client never crashes a request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullClient;

#[async_trait]
impl LlmClient for NullClient {
    async fn generate(&self, _request: LlmRequest) -> LlmResult<LlmReply> {
        Err(LlmError::NotConfigured)
    }

    fn name(&self) -> &str {
        "null"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
