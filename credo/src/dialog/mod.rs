//! The dialog state machine: session state plus the one transition that drives it.
//!
//! State-in, state-out: [`AssessmentEngine::step`] takes the current [`Session`] and
//! one user input, and returns the updated session with the assistant's reply. There
//! is no other way to mutate a session mid-conversation.
//!
//! # Main types
//!
//! - [`Session`]: cursor, collected answers, completion flag for one conversation.
//! - [`AssessmentEngine`]: owns the injected [`Classifier`](crate::classify::Classifier)
//!   and [`LlmClient`](crate::llm::LlmClient) collaborators and applies the
//!   transition table.

mod engine;
mod session;

pub use engine::{AssessmentEngine, RESTART_TOKENS};
pub use session::Session;
