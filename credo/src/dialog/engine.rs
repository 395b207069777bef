//! The transition function: `(session, input) -> (session', reply)`.
//!
//! One user message yields exactly one reply. Every failure mode is recovered here
//! and rendered as plain text; `step` itself cannot fail.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::classify::Classifier;
use crate::error::AdvisorError;
use crate::fields::CollectedData;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts::{LOAN_EXPERT_SYSTEM_PROMPT, RESTART_GREETING};
use crate::report;

use super::Session;

/// Inputs that start a fresh assessment after a completed one (case-insensitive).
pub const RESTART_TOKENS: &[&str] = &["yes", "y", "sure", "start over", "new"];

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

fn is_restart(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    RESTART_TOKENS.contains(&lower.as_str())
}

/// Drives the field-by-field wizard and the post-assessment fallback.
///
/// The classifier and chat-completion collaborators are injected so tests can
/// substitute deterministic stubs. Both external calls are bounded by
/// `call_timeout`; elapse is rendered as a user-visible message like any other
/// failure.
pub struct AssessmentEngine {
    classifier: Arc<dyn Classifier>,
    llm: Arc<dyn LlmClient>,
    call_timeout: Duration,
}

impl std::fmt::Debug for AssessmentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentEngine")
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

impl AssessmentEngine {
    pub fn new(classifier: Arc<dyn Classifier>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            classifier,
            llm,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Bound for each classifier / chat-completion call (default 30 s).
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Applies one user input to the session and returns the reply.
    ///
    /// - Completed session + restart token: reset, restart greeting.
    /// - Completed session + anything else: free-form fallback, reply verbatim.
    /// - Otherwise: validate the cursor's field. Invalid input re-prompts without
    ///   touching the session; valid input stores the value and either asks the
    ///   successor's question or, after the terminal field, runs the assessment.
    ///
    /// On classifier failure the collected data and cursor are left intact, so
    /// re-entering the terminal field retries without re-collecting everything.
    pub async fn step(&self, mut session: Session, input: &str) -> (Session, String) {
        if session.completed {
            if is_restart(input) {
                session.reset();
                return (session, RESTART_GREETING.to_string());
            }
            let reply = match self.fallback(input).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "fallback completion failed");
                    format!("Sorry, I encountered an error: {e}")
                }
            };
            return (session, reply);
        }

        let field = session.cursor;
        let value = match field.validate(input) {
            Ok(v) => v,
            Err(e) => {
                debug!(field = %field, input, error = %e, "input rejected");
                return (session, e.to_string());
            }
        };
        session.data.insert(field, value);

        match field.successor() {
            Some(next) => {
                session.cursor = next;
                (session, next.prompt().to_string())
            }
            None => match self.assess(&session.data).await {
                Ok(rendered) => {
                    session.completed = true;
                    (session, rendered)
                }
                Err(e) => {
                    warn!(error = %e, "assessment failed");
                    (session, format!("⚠️ Error: {e}"))
                }
            },
        }
    }

    async fn assess(&self, data: &CollectedData) -> Result<String, AdvisorError> {
        let record = data.to_record()?;
        let label = timeout(self.call_timeout, self.classifier.classify(&record))
            .await
            .map_err(|_| AdvisorError::Timeout {
                what: "classifier",
                seconds: self.call_timeout.as_secs(),
            })??;
        debug!(%label, ratio = record.loan_percent_income, "classification complete");
        Ok(report::render(&record, label))
    }

    async fn fallback(&self, input: &str) -> Result<String, AdvisorError> {
        let messages = [
            Message::system(LOAN_EXPERT_SYSTEM_PROMPT),
            Message::user(input),
        ];
        let reply = timeout(self.call_timeout, self.llm.complete(&messages))
            .await
            .map_err(|_| AdvisorError::Timeout {
                what: "chat completion",
                seconds: self.call_timeout.as_secs(),
            })??;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_tokens_match_case_insensitively() {
        for token in ["yes", "YES", " Sure ", "start over", "New", "y"] {
            assert!(is_restart(token), "{token:?} should restart");
        }
    }

    #[test]
    fn non_restart_inputs_do_not_match() {
        for input in ["no", "what is APR?", "yes please", ""] {
            assert!(!is_restart(input), "{input:?} should not restart");
        }
    }
}
