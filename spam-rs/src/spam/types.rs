//! Spam types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SpamError};

/// Default threshold on the adjusted probability for a SPAM label
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Built-in spam-indicative phrases, in catalog order
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "urgent",
    "verify",
    "verification",
    "account locked",
    "account has been",
    "immediate attention",
    "click",
    "claim",
    "congratulations",
    "winner",
    "won",
    "free",
    "prize",
    "limited offer",
    "bank account",
    "update your information",
    "verify your",
    "verify now",
    "reset",
    "secure your account",
    "payment overdue",
    "loan approval",
    "final notice",
];

/// Final classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    /// Adjusted probability reached the threshold
    Spam,
    /// Adjusted probability stayed below the threshold
    Safe,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Spam => "SPAM",
            Label::Safe => "SAFE",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring result for one message
///
/// All probabilities and scores are rounded to 4 decimal places. The label
/// is decided on the unrounded adjusted probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Classifier probability of the spam class
    pub raw_prob: f64,
    /// Keyword signal in [0, 1]
    pub keyword_score: f64,
    /// Catalog phrases found in the message, in catalog order
    pub matched_keywords: Vec<String>,
    /// Capitalization signal in [0, 1]
    pub uppercase_score: f64,
    /// Heuristic boost added to the raw probability
    pub boost: f64,
    /// Raw probability plus boost, capped at 1.0
    pub adjusted_prob: f64,
    /// Final label
    pub final_label: Label,
}

impl ScoreResult {
    pub fn is_spam(&self) -> bool {
        self.final_label == Label::Spam
    }
}

/// Ordered, read-only list of spam-indicative phrases
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordCatalog {
    phrases: Vec<String>,
    needles: Vec<String>,
}

impl KeywordCatalog {
    /// Build a catalog from configured phrases.
    ///
    /// Phrases are trimmed; an empty phrase would match every message and is
    /// rejected.
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self {
            phrases: Vec::new(),
            needles: Vec::new(),
        };

        for phrase in phrases {
            let phrase = phrase.as_ref().trim();
            if phrase.is_empty() {
                return Err(SpamError::Config(
                    "Keyword catalog contains an empty phrase".to_string(),
                ));
            }
            catalog.needles.push(phrase.to_lowercase());
            catalog.phrases.push(phrase.to_string());
        }

        Ok(catalog)
    }

    /// Number of phrases in the catalog
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Phrases as configured, in catalog order
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Iterate `(configured phrase, lowercase form)` pairs in catalog order
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.phrases
            .iter()
            .map(String::as_str)
            .zip(self.needles.iter().map(String::as_str))
    }
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            needles: DEFAULT_KEYWORDS.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// Process-wide scoring configuration, shared read-only by every request
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    threshold: f64,
    catalog: KeywordCatalog,
}

impl ScoringConfig {
    /// Create a scoring configuration; the threshold must lie in [0, 1]
    pub fn new(threshold: f64, catalog: KeywordCatalog) -> Result<Self> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(SpamError::Config(format!(
                "Threshold must be between 0.0 and 1.0, got {}",
                threshold
            )));
        }

        Ok(Self { threshold, catalog })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn catalog(&self) -> &KeywordCatalog {
        &self.catalog
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            catalog: KeywordCatalog::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let catalog = KeywordCatalog::default();
        assert_eq!(catalog.len(), DEFAULT_KEYWORDS.len());
        assert_eq!(catalog.phrases()[0], "urgent");
        assert_eq!(catalog.phrases().last().unwrap(), "final notice");
    }

    #[test]
    fn test_catalog_rejects_empty_phrase() {
        assert!(KeywordCatalog::new(["free", "  "]).is_err());
    }

    #[test]
    fn test_catalog_keeps_configured_case() {
        let catalog = KeywordCatalog::new([" Act Now "]).unwrap();
        let entries: Vec<_> = catalog.entries().collect();
        assert_eq!(entries, vec![("Act Now", "act now")]);
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(ScoringConfig::new(0.0, KeywordCatalog::default()).is_ok());
        assert!(ScoringConfig::new(1.0, KeywordCatalog::default()).is_ok());
        assert!(ScoringConfig::new(1.01, KeywordCatalog::default()).is_err());
        assert!(ScoringConfig::new(-0.1, KeywordCatalog::default()).is_err());
        assert!(ScoringConfig::new(f64::NAN, KeywordCatalog::default()).is_err());
    }

    #[test]
    fn test_label_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Label::Spam).unwrap(), "\"SPAM\"");
        assert_eq!(Label::Safe.to_string(), "SAFE");
    }
}
