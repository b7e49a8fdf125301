//! Spam scoring engine
//!
//! Combines the classifier's spam probability with the keyword and
//! capitalization signals, then applies the threshold.

use std::sync::Arc;
use tracing::{debug, error};

use super::heuristics::{keyword_score, uppercase_score};
use super::types::*;
use crate::error::{Result, SpamError};
use crate::model::ModelHandle;

/// Weight of the keyword signal in the boost
pub const KEYWORD_WEIGHT: f64 = 0.5;

/// Weight of the capitalization signal in the boost
pub const UPPERCASE_WEIGHT: f64 = 0.3;

/// Spam scorer engine
#[derive(Debug, Clone)]
pub struct SpamScorer {
    config: Arc<ScoringConfig>,
    model: ModelHandle,
}

impl SpamScorer {
    /// Create a new spam scorer
    pub fn new(config: Arc<ScoringConfig>, model: ModelHandle) -> Self {
        Self { config, model }
    }

    /// Get current config
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Classify a message.
    ///
    /// Fails with `ModelUnavailable` before any scoring when the classifier
    /// did not load, and with `Scoring` when it cannot score this message.
    pub fn classify(&self, message: &str) -> Result<ScoreResult> {
        let classifier = self.model.classifier()?;

        let raw_prob = classifier.score_probability(message).map_err(|e| {
            error!("Classifier failed to score message: {}", e);
            match e {
                SpamError::Scoring(detail) => SpamError::Scoring(detail),
                other => SpamError::Scoring(other.to_string()),
            }
        })?;

        let (k_score, matched) = keyword_score(message, self.config.catalog());
        let up_score = uppercase_score(message);

        let boost = combine_boost(k_score, up_score);
        let adjusted_prob = adjust_probability(raw_prob, boost);
        let final_label = decide(adjusted_prob, self.config.threshold());

        debug!(
            raw_prob,
            keyword_score = k_score,
            matched = matched.len(),
            uppercase_score = up_score,
            boost,
            adjusted_prob,
            label = %final_label,
            "Message scored"
        );

        Ok(ScoreResult {
            raw_prob: round4(raw_prob),
            keyword_score: round4(k_score),
            matched_keywords: matched,
            uppercase_score: round4(up_score),
            boost: round4(boost),
            adjusted_prob: round4(adjusted_prob),
            final_label,
        })
    }
}

/// Weighted sum of the heuristic signals; not clamped
pub fn combine_boost(keyword_score: f64, uppercase_score: f64) -> f64 {
    KEYWORD_WEIGHT * keyword_score + UPPERCASE_WEIGHT * uppercase_score
}

/// Raw probability plus boost, capped at 1.0
pub fn adjust_probability(raw_prob: f64, boost: f64) -> f64 {
    (raw_prob + boost).min(1.0)
}

/// Inclusive threshold comparison on the unrounded probability
pub fn decide(adjusted_prob: f64, threshold: f64) -> Label {
    if adjusted_prob >= threshold {
        Label::Spam
    } else {
        Label::Safe
    }
}

/// Round to 4 decimal places for reporting.
///
/// Rounds the exact binary value through decimal formatting; scaling by
/// 10_000 first can land a value just below a tie on the tie itself.
pub fn round4(value: f64) -> f64 {
    format!("{:.4}", value).parse().unwrap_or(value)
}
