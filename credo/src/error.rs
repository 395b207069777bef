//! Engine-boundary error type.
//!
//! Scoped errors live with their modules ([`ValidationError`](crate::fields::ValidationError),
//! [`ClassifyError`](crate::classify::ClassifyError), [`LlmError`](crate::llm::LlmError));
//! this wrapper is what the dialog engine's internal helpers propagate before every
//! failure is rendered as plain text for the user. Nothing here is fatal to the process.

use thiserror::Error;

use crate::classify::ClassifyError;
use crate::fields::{Field, ValidationError};
use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    /// An external call did not finish within the engine's bounded timeout.
    #[error("the {what} call timed out after {seconds} seconds")]
    Timeout { what: &'static str, seconds: u64 },

    /// Record assembly found a hole the cursor logic should have ruled out.
    #[error("missing collected value for {0}")]
    MissingField(Field),
}
