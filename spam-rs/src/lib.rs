//! spam-rs: heuristic-boosted spam classifier
//!
//! Classifies a free-text message as SPAM or SAFE by combining a
//! pre-trained classifier's spam probability with two deterministic
//! signals: known spam phrases and excessive capitalization.
//!
//! # Scoring
//!
//! - keyword score: distinct catalog phrases found, saturating at 4
//! - uppercase score: all-caps words of 2+ letters, saturating at 3
//! - boost: `0.5 * keyword + 0.3 * uppercase`
//! - adjusted probability: `min(1.0, raw + boost)`, SPAM when `>= threshold`
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::config::Config;
//! use spam_rs::model::ModelHandle;
//! use spam_rs::spam::SpamScorer;
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let scorer = SpamScorer::new(
//!         Arc::new(config.scoring_config()?),
//!         ModelHandle::load(&config.model),
//!     );
//!
//!     let result = scorer.classify("URGENT: verify your account now")?;
//!     println!("{} ({})", result.final_label, result.adjusted_prob);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`spam`]: heuristic signals and the scoring engine
//! - [`model`]: classifier interface and TF-IDF + naive Bayes loader
//! - [`api`]: HTTP form and JSON API
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod spam;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpamError};
pub use spam::{Label, ScoreResult, SpamScorer};
