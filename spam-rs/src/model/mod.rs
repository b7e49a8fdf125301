//! Statistical classifier behind the heuristic scorer
//!
//! The scorer only needs a spam probability for a message. Anything that can
//! produce one implements [`ProbabilityClassifier`]; the bundled
//! implementation is a TF-IDF vectorizer feeding a multinomial naive Bayes
//! model, both read from JSON artifacts at startup.

pub mod naive_bayes;
pub mod tfidf;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SpamError};

pub use naive_bayes::{ClassLabel, MultinomialNb, TfidfNaiveBayes};
pub use tfidf::{Norm, TfidfVectorizer};

/// Capability to estimate P(spam | message)
#[cfg_attr(test, mockall::automock)]
pub trait ProbabilityClassifier: Send + Sync {
    /// Probability of the spam class, in [0, 1]
    fn score_probability(&self, message: &str) -> Result<f64>;
}

/// Location of the model artifacts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Directory holding the artifacts
    #[serde(default = "default_models_dir")]
    pub models_dir: String,
    /// Fitted TF-IDF vectorizer (JSON)
    #[serde(default = "default_vectorizer_file")]
    pub vectorizer_file: String,
    /// Fitted naive Bayes classifier (JSON)
    #[serde(default = "default_classifier_file")]
    pub classifier_file: String,
}

fn default_models_dir() -> String {
    "models".to_string()
}

fn default_vectorizer_file() -> String {
    "tfidf.json".to_string()
}

fn default_classifier_file() -> String {
    "nb_model.json".to_string()
}

impl ModelConfig {
    pub fn vectorizer_path(&self) -> PathBuf {
        PathBuf::from(&self.models_dir).join(&self.vectorizer_file)
    }

    pub fn classifier_path(&self) -> PathBuf {
        PathBuf::from(&self.models_dir).join(&self.classifier_file)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            vectorizer_file: default_vectorizer_file(),
            classifier_file: default_classifier_file(),
        }
    }
}

/// Outcome of loading the classifier at startup
#[derive(Clone)]
pub enum ModelHandle {
    /// Classifier ready for scoring
    Loaded(Arc<dyn ProbabilityClassifier>),
    /// Loading failed; every classification reports this reason
    Unavailable { reason: String },
}

impl ModelHandle {
    /// Wrap an already constructed classifier
    pub fn loaded<C>(classifier: C) -> Self
    where
        C: ProbabilityClassifier + 'static,
    {
        ModelHandle::Loaded(Arc::new(classifier))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        ModelHandle::Unavailable {
            reason: reason.into(),
        }
    }

    /// Load the TF-IDF + naive Bayes artifacts.
    ///
    /// A load failure does not abort the process: the failure is kept in the
    /// handle and surfaces on each classification attempt.
    pub fn load(config: &ModelConfig) -> Self {
        let vectorizer_path = config.vectorizer_path();
        let classifier_path = config.classifier_path();

        match TfidfNaiveBayes::load(&vectorizer_path, &classifier_path) {
            Ok(model) => {
                info!(
                    "Model loaded from {} ({} features, {} classes)",
                    config.models_dir,
                    model.n_features(),
                    model.n_classes()
                );
                Self::loaded(model)
            }
            Err(e) => {
                let reason = match e {
                    SpamError::ModelLoad(detail) => detail,
                    other => other.to_string(),
                };
                warn!("Model unavailable: {}", reason);
                Self::unavailable(reason)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelHandle::Loaded(_))
    }

    /// Reason the model could not be loaded, if any
    pub fn load_error(&self) -> Option<&str> {
        match self {
            ModelHandle::Loaded(_) => None,
            ModelHandle::Unavailable { reason } => Some(reason),
        }
    }

    /// Borrow the classifier or fail with `ModelUnavailable`
    pub fn classifier(&self) -> Result<&dyn ProbabilityClassifier> {
        match self {
            ModelHandle::Loaded(classifier) => Ok(classifier.as_ref()),
            ModelHandle::Unavailable { reason } => {
                Err(SpamError::ModelUnavailable(reason.clone()))
            }
        }
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelHandle::Loaded(_) => f.write_str("ModelHandle::Loaded"),
            ModelHandle::Unavailable { reason } => f
                .debug_struct("ModelHandle::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_paths() {
        let config = ModelConfig::default();
        assert_eq!(config.vectorizer_path(), PathBuf::from("models/tfidf.json"));
        assert_eq!(config.classifier_path(), PathBuf::from("models/nb_model.json"));
    }

    #[test]
    fn test_load_missing_artifacts_is_unavailable() {
        let config = ModelConfig {
            models_dir: "/nonexistent/spam-rs-models".to_string(),
            ..ModelConfig::default()
        };

        let handle = ModelHandle::load(&config);
        assert!(!handle.is_loaded());
        assert!(handle.load_error().unwrap().contains("tfidf.json"));
        assert!(matches!(
            handle.classifier(),
            Err(SpamError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_loaded_handle_exposes_classifier() {
        let mut mock = MockProbabilityClassifier::new();
        mock.expect_score_probability().returning(|_| Ok(0.25));

        let handle = ModelHandle::loaded(mock);
        assert!(handle.is_loaded());
        assert!(handle.load_error().is_none());
        assert_eq!(handle.classifier().unwrap().score_probability("hi").unwrap(), 0.25);
    }
}
