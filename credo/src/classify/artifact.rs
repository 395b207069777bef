//! Classifier backed by a JSON model artifact on disk.
//!
//! The artifact is the externally trained model: an ordered feature list, per-feature
//! categorical encodings, and an additive tree ensemble. This module only
//! deserializes and walks it; the parameters themselves are opaque. The file is
//! re-read on every invocation, so swapping the artifact takes effect without a
//! restart and a missing file surfaces as [`ClassifyError::Unavailable`] per call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::record::{LoanRecord, RiskLabel};

use super::{Classifier, ClassifyError};

#[derive(Deserialize)]
struct Artifact {
    /// Feature names in the model's column order.
    features: Vec<String>,
    /// Categorical feature -> (code -> encoded value).
    #[serde(default)]
    categories: HashMap<String, HashMap<String, f64>>,
    trees: Vec<Tree>,
    #[serde(default)]
    bias: f64,
    /// Scores at or above this decision threshold classify as high risk.
    threshold: f64,
}

#[derive(Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl Artifact {
    /// Numeric value of one named feature, applying the artifact's own encoding for
    /// categorical columns.
    fn feature_value(&self, name: &str, record: &LoanRecord) -> Result<f64, ClassifyError> {
        let code: &str = match name {
            "person_age" => return Ok(record.person_age as f64),
            "person_income" => return Ok(record.person_income as f64),
            "person_emp_length" => return Ok(record.person_emp_length as f64),
            "loan_amnt" => return Ok(record.loan_amnt as f64),
            "loan_int_rate" => return Ok(record.loan_int_rate),
            "cb_person_cred_hist_length" => return Ok(record.cb_person_cred_hist_length as f64),
            "loan_percent_income" => return Ok(record.loan_percent_income),
            "person_home_ownership" => record.person_home_ownership.code(),
            "loan_intent" => record.loan_intent.code(),
            "loan_grade" => record.loan_grade.code(),
            "cb_person_default_on_file" => record.cb_person_default_on_file.code(),
            other => {
                return Err(ClassifyError::BadArtifact(format!(
                    "unknown feature '{other}'"
                )))
            }
        };
        self.categories
            .get(name)
            .and_then(|encoding| encoding.get(code))
            .copied()
            .ok_or_else(|| {
                ClassifyError::Invocation(format!("no encoding for {name}='{code}'"))
            })
    }

    fn row(&self, record: &LoanRecord) -> Result<Vec<f64>, ClassifyError> {
        self.features
            .iter()
            .map(|name| self.feature_value(name, record))
            .collect()
    }

    fn score(&self, row: &[f64]) -> Result<f64, ClassifyError> {
        let mut score = self.bias;
        for tree in &self.trees {
            score += tree.output(row)?;
        }
        Ok(score)
    }
}

impl Tree {
    fn output(&self, row: &[f64]) -> Result<f64, ClassifyError> {
        let mut index = 0usize;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = *row.get(*feature).ok_or_else(|| {
                        ClassifyError::Invocation(format!(
                            "split references feature {feature} outside the row"
                        ))
                    })?;
                    index = if x < *threshold { *left } else { *right };
                }
                None => {
                    return Err(ClassifyError::Invocation(format!(
                        "split references node {index} outside the tree"
                    )))
                }
            }
        }
        Err(ClassifyError::Invocation(
            "tree walk did not reach a leaf".to_string(),
        ))
    }
}

/// [`Classifier`] that evaluates the JSON model artifact at `path`.
pub struct ArtifactClassifier {
    path: PathBuf,
}

impl ArtifactClassifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Artifact, ClassifyError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ClassifyError::Unavailable(format!("{}: {e}", self.path.display())))?;
        let artifact: Artifact = serde_json::from_str(&content)
            .map_err(|e| ClassifyError::BadArtifact(e.to_string()))?;
        if artifact.features.is_empty() || artifact.trees.is_empty() {
            return Err(ClassifyError::BadArtifact(
                "artifact has no features or no trees".to_string(),
            ));
        }
        Ok(artifact)
    }
}

#[async_trait]
impl Classifier for ArtifactClassifier {
    async fn classify(&self, record: &LoanRecord) -> Result<RiskLabel, ClassifyError> {
        let artifact = self.load().await?;
        let row = artifact.row(record)?;
        let score = artifact.score(&row)?;
        let label = if score >= artifact.threshold {
            RiskLabel::High
        } else {
            RiskLabel::Low
        };
        debug!(
            path = %self.path.display(),
            trees = artifact.trees.len(),
            score,
            threshold = artifact.threshold,
            %label,
            "artifact classification"
        );
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{HomeOwnership, LoanGrade, LoanIntent, PriorDefault};

    fn record() -> LoanRecord {
        LoanRecord {
            person_age: 30,
            person_income: 50_000,
            person_home_ownership: HomeOwnership::Rent,
            person_emp_length: 5,
            loan_intent: LoanIntent::Personal,
            loan_grade: LoanGrade::B,
            loan_amnt: 10_000,
            loan_int_rate: 11.5,
            cb_person_default_on_file: PriorDefault::No,
            cb_person_cred_hist_length: 8,
            loan_percent_income: 20.0,
        }
    }

    /// One tree over loan_percent_income: >= 35 scores 1.0, else 0.0.
    fn ratio_model() -> &'static str {
        r#"{
            "features": ["loan_percent_income", "cb_person_default_on_file"],
            "categories": {
                "cb_person_default_on_file": {"Y": 1.0, "N": 0.0}
            },
            "trees": [
                {"nodes": [
                    {"feature": 0, "threshold": 35.0, "left": 1, "right": 2},
                    {"value": 0.0},
                    {"value": 1.0}
                ]}
            ],
            "bias": 0.0,
            "threshold": 0.5
        }"#
    }

    fn write_model(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("loan_model.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn low_ratio_classifies_low_risk() {
        let dir = tempfile::tempdir().unwrap();
        let clf = ArtifactClassifier::new(write_model(&dir, ratio_model()));

        let label = clf.classify(&record()).await.unwrap();

        assert_eq!(label, RiskLabel::Low);
    }

    #[tokio::test]
    async fn high_ratio_classifies_high_risk() {
        let dir = tempfile::tempdir().unwrap();
        let clf = ArtifactClassifier::new(write_model(&dir, ratio_model()));
        let mut r = record();
        r.loan_percent_income = 40.0;

        let label = clf.classify(&r).await.unwrap();

        assert_eq!(label, RiskLabel::High);
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let clf = ArtifactClassifier::new(dir.path().join("nope.json"));

        let err = clf.classify(&record()).await.unwrap_err();

        assert!(matches!(err, ClassifyError::Unavailable(_)));
    }

    #[tokio::test]
    async fn undecodable_artifact_is_bad_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let clf = ArtifactClassifier::new(write_model(&dir, "not json"));

        let err = clf.classify(&record()).await.unwrap_err();

        assert!(matches!(err, ClassifyError::BadArtifact(_)));
    }

    #[tokio::test]
    async fn empty_model_is_bad_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let clf = ArtifactClassifier::new(write_model(
            &dir,
            r#"{"features": [], "trees": [], "threshold": 0.5}"#,
        ));

        let err = clf.classify(&record()).await.unwrap_err();

        assert!(matches!(err, ClassifyError::BadArtifact(_)));
    }

    #[tokio::test]
    async fn missing_categorical_encoding_is_an_invocation_error() {
        let dir = tempfile::tempdir().unwrap();
        let model = r#"{
            "features": ["person_home_ownership"],
            "categories": {"person_home_ownership": {"OWN": 1.0}},
            "trees": [{"nodes": [{"value": 0.0}]}],
            "threshold": 0.5
        }"#;
        let clf = ArtifactClassifier::new(write_model(&dir, model));

        let err = clf.classify(&record()).await.unwrap_err();

        assert!(matches!(err, ClassifyError::Invocation(_)));
        assert!(err.to_string().contains("RENT"));
    }

    #[tokio::test]
    async fn unknown_feature_name_is_bad_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let model = r#"{
            "features": ["person_shoe_size"],
            "trees": [{"nodes": [{"value": 0.0}]}],
            "threshold": 0.5
        }"#;
        let clf = ArtifactClassifier::new(write_model(&dir, model));

        let err = clf.classify(&record()).await.unwrap_err();

        assert!(matches!(err, ClassifyError::BadArtifact(_)));
    }

    #[tokio::test]
    async fn out_of_bounds_child_index_is_an_invocation_error() {
        let dir = tempfile::tempdir().unwrap();
        let model = r#"{
            "features": ["person_age"],
            "trees": [{"nodes": [
                {"feature": 0, "threshold": 99.0, "left": 7, "right": 7}
            ]}],
            "threshold": 0.5
        }"#;
        let clf = ArtifactClassifier::new(write_model(&dir, model));

        let err = clf.classify(&record()).await.unwrap_err();

        assert!(matches!(err, ClassifyError::Invocation(_)));
    }

    #[tokio::test]
    async fn cyclic_tree_is_an_invocation_error() {
        let dir = tempfile::tempdir().unwrap();
        let model = r#"{
            "features": ["person_age"],
            "trees": [{"nodes": [
                {"feature": 0, "threshold": 99.0, "left": 0, "right": 0}
            ]}],
            "threshold": 0.5
        }"#;
        let clf = ArtifactClassifier::new(write_model(&dir, model));

        let err = clf.classify(&record()).await.unwrap_err();

        assert!(matches!(err, ClassifyError::Invocation(_)));
    }

    #[tokio::test]
    async fn bias_alone_can_cross_the_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let model = r#"{
            "features": ["person_age"],
            "trees": [{"nodes": [{"value": 0.0}]}],
            "bias": 0.9,
            "threshold": 0.5
        }"#;
        let clf = ArtifactClassifier::new(write_model(&dir, model));

        let label = clf.classify(&record()).await.unwrap();

        assert_eq!(label, RiskLabel::High);
    }
}
