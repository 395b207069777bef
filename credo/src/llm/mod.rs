//! Chat-completion seam for the free-form fallback.
//!
//! The dialog engine depends on a callable that turns role-tagged messages into one
//! assistant reply; this module defines the trait, a mock, and the Groq-hosted
//! implementation ([`GroqChat`]). Single call, no retries, no conversation memory
//! across calls.

mod groq;
mod mock;

pub use groq::{GroqChat, GROQ_API_BASE};
pub use mock::MockLlm;

use async_trait::async_trait;
use thiserror::Error;

use crate::message::Message;

#[derive(Error, Debug)]
pub enum LlmError {
    /// Request could not be built, sent, or was rejected by the API.
    #[error("chat completion failed: {0}")]
    Api(String),
    /// The API answered but produced no assistant message.
    #[error("chat completion returned no reply")]
    EmptyResponse,
}

/// Chat-completion client: given messages, returns the assistant's text verbatim.
///
/// Implementations: [`MockLlm`] (canned reply, records invocations) and [`GroqChat`]
/// (Groq's OpenAI-compatible API).
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError>;
}
