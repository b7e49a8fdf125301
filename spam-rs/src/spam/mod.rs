//! Spam scoring module
//!
//! Heuristic keyword and capitalization signals layered on top of a
//! statistical classifier's spam probability.

pub mod heuristics;
pub mod scorer;
pub mod types;

pub use heuristics::{keyword_score, uppercase_score};
pub use scorer::SpamScorer;
pub use types::*;
