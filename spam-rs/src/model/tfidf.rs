//! TF-IDF text vectorizer
//!
//! Applies a fitted vocabulary and idf weights to a message, producing a
//! sparse feature row. Fitting happens offline; this side only reads.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{Result, SpamError};

/// Row normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Sparse feature row: `(column, value)` sorted by column
pub type SparseRow = Vec<(usize, f64)>;

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term (or space-joined n-gram) to column index
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    /// Use `1 + ln(tf)` instead of the raw count
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    stop_words: HashSet<String>,
}

fn default_lowercase() -> bool {
    true
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

impl TfidfVectorizer {
    /// Create a unigram, L2-normalized vectorizer
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self> {
        let vectorizer = Self {
            vocabulary,
            idf,
            lowercase: default_lowercase(),
            sublinear_tf: false,
            norm: default_norm(),
            ngram_range: default_ngram_range(),
            stop_words: HashSet::new(),
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn with_norm(mut self, norm: Option<Norm>) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Result<Self> {
        self.ngram_range = (min_n, max_n);
        self.validate()?;
        Ok(self)
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Check the fitted parameters are consistent
    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SpamError::ModelLoad(format!(
                "Invalid n-gram range ({}, {})",
                min_n, max_n
            )));
        }

        if let Some((term, &column)) = self
            .vocabulary
            .iter()
            .find(|(_, &column)| column >= self.idf.len())
        {
            return Err(SpamError::ModelLoad(format!(
                "Vocabulary term '{}' maps to column {} but only {} idf weights exist",
                term,
                column,
                self.idf.len()
            )));
        }

        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(SpamError::ModelLoad(
                "Vectorizer idf weights must be finite".to_string(),
            ));
        }

        Ok(())
    }

    /// Turn a message into a sparse TF-IDF row
    pub fn transform(&self, text: &str) -> SparseRow {
        let mut counts: HashMap<usize, f64> = HashMap::new();

        for term in self.terms(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseRow = counts
            .into_iter()
            .map(|(column, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (column, tf * self.idf[column])
            })
            .collect();
        row.sort_by_key(|(column, _)| *column);

        let norm = match self.norm {
            Some(Norm::L1) => row.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            Some(Norm::L2) => row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            None => 0.0,
        };
        if norm > 0.0 {
            for (_, value) in row.iter_mut() {
                *value /= norm;
            }
        }

        row
    }

    /// Word n-grams of the message after stop-word removal
    fn terms(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = tokenize(&text)
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n == 1 {
                terms.extend(tokens.iter().map(|t| t.to_string()));
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }
}

/// Runs of two or more word characters
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() >= 2)
}
