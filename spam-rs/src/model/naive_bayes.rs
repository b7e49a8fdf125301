//! Multinomial naive Bayes over TF-IDF features

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::tfidf::{SparseRow, TfidfVectorizer};
use super::ProbabilityClassifier;
use crate::error::{Result, SpamError};

/// Class label as stored in the model file (integer or text)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Int(i64),
    Text(String),
}

impl ClassLabel {
    fn is_spam(&self) -> bool {
        match self {
            ClassLabel::Int(value) => *value == 1,
            ClassLabel::Text(text) => {
                let text = text.trim();
                text == "1" || text.eq_ignore_ascii_case("spam")
            }
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Int(value) => write!(f, "{}", value),
            ClassLabel::Text(text) => f.write_str(text),
        }
    }
}

/// Fitted multinomial naive Bayes parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    classes: Vec<ClassLabel>,
    class_log_prior: Vec<f64>,
    /// One row per class, one column per feature
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub fn new(
        classes: Vec<ClassLabel>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let model = Self {
            classes,
            class_log_prior,
            feature_log_prob,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    /// Check shapes and that every parameter is finite
    pub fn validate(&self) -> Result<()> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(SpamError::ModelLoad(format!(
                "Classifier needs at least 2 classes, found {}",
                n_classes
            )));
        }

        if self.class_log_prior.len() != n_classes || self.feature_log_prob.len() != n_classes {
            return Err(SpamError::ModelLoad(format!(
                "Classifier shape mismatch: {} classes, {} priors, {} feature rows",
                n_classes,
                self.class_log_prior.len(),
                self.feature_log_prob.len()
            )));
        }

        let n_features = self.n_features();
        if self.feature_log_prob.iter().any(|row| row.len() != n_features) {
            return Err(SpamError::ModelLoad(
                "Classifier feature rows have different lengths".to_string(),
            ));
        }

        let all_finite = self.class_log_prior.iter().all(|p| p.is_finite())
            && self.feature_log_prob.iter().flatten().all(|p| p.is_finite());
        if !all_finite {
            return Err(SpamError::ModelLoad(
                "Classifier parameters must be finite".to_string(),
            ));
        }

        Ok(())
    }

    /// Index of the spam class.
    ///
    /// A class labelled `1` or `spam` wins; otherwise a two-class model uses
    /// its second class, matching the sorted `[ham, spam]` convention.
    pub fn positive_class(&self) -> Result<usize> {
        if let Some(index) = self.classes.iter().position(ClassLabel::is_spam) {
            return Ok(index);
        }

        if self.classes.len() == 2 {
            return Ok(1);
        }

        let labels: Vec<String> = self.classes.iter().map(ToString::to_string).collect();
        Err(SpamError::ModelLoad(format!(
            "Cannot identify the spam class among [{}]",
            labels.join(", ")
        )))
    }

    /// Per-class log likelihood of a feature row, before normalization
    fn joint_log_likelihood(&self, row: &[(usize, f64)]) -> Result<Vec<f64>> {
        let n_features = self.n_features();
        if let Some((column, _)) = row.iter().find(|(column, _)| *column >= n_features) {
            return Err(SpamError::Scoring(format!(
                "Feature column {} out of range for {} features",
                column, n_features
            )));
        }

        Ok(self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_prob)| {
                prior
                    + row
                        .iter()
                        .map(|&(column, value)| value * log_prob[column])
                        .sum::<f64>()
            })
            .collect())
    }

    /// Class probabilities for a feature row, in class order
    pub fn predict_proba(&self, row: &[(usize, f64)]) -> Result<Vec<f64>> {
        let jll = self.joint_log_likelihood(row)?;

        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + jll.iter().map(|l| (l - max).exp()).sum::<f64>().ln();

        Ok(jll.iter().map(|l| (l - log_norm).exp()).collect())
    }
}

/// TF-IDF vectorizer and naive Bayes model scored as one classifier
#[derive(Debug, Clone)]
pub struct TfidfNaiveBayes {
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
    positive: usize,
}

impl TfidfNaiveBayes {
    pub fn new(vectorizer: TfidfVectorizer, model: MultinomialNb) -> Result<Self> {
        vectorizer.validate()?;
        model.validate()?;

        if vectorizer.n_features() != model.n_features() {
            return Err(SpamError::ModelLoad(format!(
                "Vectorizer produces {} features but classifier expects {}",
                vectorizer.n_features(),
                model.n_features()
            )));
        }

        let positive = model.positive_class()?;
        Ok(Self {
            vectorizer,
            model,
            positive,
        })
    }

    /// Read both artifacts from JSON files
    pub fn load(vectorizer_path: &Path, classifier_path: &Path) -> Result<Self> {
        let vectorizer: TfidfVectorizer = read_json(vectorizer_path)?;
        let model: MultinomialNb = read_json(classifier_path)?;
        Self::new(vectorizer, model)
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    pub fn n_classes(&self) -> usize {
        self.model.classes().len()
    }

    pub fn vectorize(&self, message: &str) -> SparseRow {
        self.vectorizer.transform(message)
    }
}

impl ProbabilityClassifier for TfidfNaiveBayes {
    fn score_probability(&self, message: &str) -> Result<f64> {
        let row = self.vectorize(message);
        let probabilities = self.model.predict_proba(&row)?;

        let probability = probabilities[self.positive];
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(SpamError::Scoring(format!(
                "Classifier produced invalid probability {}",
                probability
            )));
        }

        Ok(probability)
    }
}

fn read_json<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let file = File::open(path)
        .map_err(|e| SpamError::ModelLoad(format!("{}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SpamError::ModelLoad(format!("{}: {}", path.display(), e)))
}
