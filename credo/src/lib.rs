//! # Credo
//!
//! A conversational loan default risk advisor. A fixed sequence of validated
//! questions populates the features of an externally trained classifier; the binary
//! outcome is rendered as an assessment report, and off-script questions after a
//! completed assessment go to a hosted loan-expert chat model.
//!
//! ## Design
//!
//! - **State-in, state-out**: one [`Session`] flows through
//!   [`AssessmentEngine::step`]; each turn returns the updated session and the
//!   reply. No ambient state.
//! - **Collaborators behind traits**: the classifier ([`Classifier`]) and the chat
//!   model ([`LlmClient`]) are injected, with mock implementations for tests and
//!   offline runs.
//! - **Errors recovered locally**: validation, artifact, invocation, and timeout
//!   failures all become plain-text replies; nothing is fatal to the process.
//!
//! ## Main modules
//!
//! - [`dialog`]: [`Session`], [`AssessmentEngine`], the wizard state machine.
//! - [`fields`]: [`Field`], validators, [`CollectedData`]: one enum variant per
//!   prompted field with an explicit successor table.
//! - [`record`]: [`LoanRecord`], categorical domains, [`RiskLabel`].
//! - [`classify`]: [`Classifier`] seam, [`ArtifactClassifier`], [`MockClassifier`].
//! - [`llm`]: [`LlmClient`] seam, [`GroqChat`], [`MockLlm`].
//! - [`report`]: assessment report rendering.
//! - [`prompts`]: greeting / restart / fallback system prompt constants.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use credo::{AssessmentEngine, MockClassifier, MockLlm, RiskLabel, Session};
//!
//! # async fn demo() {
//! let engine = AssessmentEngine::new(
//!     Arc::new(MockClassifier::always(RiskLabel::Low)),
//!     Arc::new(MockLlm::canned("Ask me after the assessment.")),
//! );
//! let session = Session::new();
//! let (session, reply) = engine.step(session, "25").await;
//! assert_eq!(reply, credo::Field::Income.prompt());
//! # let _ = session;
//! # }
//! ```

pub mod classify;
pub mod dialog;
pub mod error;
pub mod fields;
pub mod llm;
pub mod message;
pub mod prompts;
pub mod record;
pub mod report;

pub use classify::{ArtifactClassifier, Classifier, ClassifyError, MockClassifier};
pub use dialog::{AssessmentEngine, Session, RESTART_TOKENS};
pub use error::AdvisorError;
pub use fields::{CollectedData, Field, FieldValue, ValidationError};
pub use llm::{GroqChat, LlmClient, LlmError, MockLlm, GROQ_API_BASE};
pub use message::Message;
pub use record::{
    HomeOwnership, LoanGrade, LoanIntent, LoanRecord, PriorDefault, RiskLabel,
};
