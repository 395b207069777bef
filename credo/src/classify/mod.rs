//! Classifier seam: the external pre-trained model behind a one-method trait.
//!
//! The dialog engine depends on a callable that maps a fully validated
//! [`LoanRecord`] to a [`RiskLabel`]. Implementations: [`MockClassifier`] (fixed
//! label, records inputs) and [`ArtifactClassifier`] (JSON model artifact on disk).

mod artifact;

pub use artifact::ArtifactClassifier;

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::record::{LoanRecord, RiskLabel};

#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The model artifact could not be read at all.
    #[error("model artifact unavailable: {0}")]
    Unavailable(String),
    /// The artifact was read but does not decode into a usable model.
    #[error("model artifact is malformed: {0}")]
    BadArtifact(String),
    /// The model loaded but evaluation failed.
    #[error("classification failed: {0}")]
    Invocation(String),
}

/// The external classifier: one record in, one label out.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, record: &LoanRecord) -> Result<RiskLabel, ClassifyError>;
}

/// Fixed-label [`Classifier`] for tests and `--offline` runs.
///
/// Records every received record so tests can assert on the exact input shape the
/// engine assembled.
pub struct MockClassifier {
    label: RiskLabel,
    seen: Mutex<Vec<LoanRecord>>,
}

impl MockClassifier {
    pub fn always(label: RiskLabel) -> Self {
        Self {
            label,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Records from every `classify` call so far, oldest first.
    pub fn seen(&self) -> Vec<LoanRecord> {
        self.seen.lock().expect("mock lock").clone()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, record: &LoanRecord) -> Result<RiskLabel, ClassifyError> {
        self.seen.lock().expect("mock lock").push(record.clone());
        Ok(self.label)
    }
}
