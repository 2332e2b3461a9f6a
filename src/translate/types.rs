//! Wire types for the caller-facing (OpenAI) side of the relay.
//!
//! Upstream payloads are handled as raw `serde_json::Value` because every field
//! the relay reads may be missing or null.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Embeddings response in the OpenAI shape. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    pub object: Value,
    pub data: Value,
    pub model: Value,
    pub usage: EmbeddingsUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsUsage {
    pub prompt_tokens: Value,
    pub total_tokens: Value,
}

impl EmbeddingsUsage {
    /// The upstream only reports a total; prompt tokens mirror it.
    pub fn from_total(total: Value) -> Self {
        Self {
            prompt_tokens: total.clone(),
            total_tokens: total,
        }
    }
}

/// Body of every failure reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
