//! Fuzzy Equality Scoring
//!
//! Combines a selectable subset of string metrics into one dissimilarity
//! score in `[0, 1]` (0 = identical) and gates it with a tolerance tier.
//!
//! Every metric is converted to a distance before averaging:
//!
//! - similarities (Jaro, Jaro-Winkler, Overlap, Ratcliff/Obershelp, Tanimoto) as `1 - similarity`
//! - Levenshtein as `distance / upper_bound`
//! - normalized Levenshtein as `(distance - lower) / (upper - lower)`
//! - LCSubsequence/LCSubstring as `1 - length / min(len)`
//! - Hamming as `count / len`, skipped when lengths differ
//!
//! # Example
//!
//! ```rust
//! use buildscope_core::fuzzy::{approximately_equals, MetricOptionSet, Tolerance};
//! use buildscope_core::metrics::MetricTag;
//!
//! let options = MetricOptionSet::from_tags([MetricTag::Jaro]);
//! assert!(approximately_equals("abc", "abc", Tolerance::Strong, &options));
//! assert!(!approximately_equals("abc", "xyz", Tolerance::Strong, &options));
//! ```

mod options;
mod scorer;

pub use options::{MetricOptionSet, Tolerance};
pub use scorer::{approximately_equals, contribution, fuzzy_score, FuzzyScorer};
