//! String Metrics
//!
//! Pairwise string distance and similarity algorithms. Every metric counts
//! Unicode scalar values, never bytes.
//!
//! | Metric | Kind | Range |
//! |---|---|---|
//! | Hamming | distance | `0..=len` (equal lengths only) |
//! | Jaccard | distance | `0.0..=1.0` |
//! | Jaro, Jaro-Winkler | similarity | `0.0..=1.0` |
//! | Levenshtein | distance | `lower_bound..=upper_bound` |
//! | Normalized Levenshtein | distance | `0..=upper - lower` |
//! | LCSubsequence, LCSubstring | length | `0..=min(len)` |
//! | Sørensen-Dice | distance | `0.0..=1.0` |
//! | Overlap, Ratcliff/Obershelp, Tanimoto | similarity | `0.0..=1.0` |
//!
//! # Example
//!
//! ```rust
//! use buildscope_core::metrics::{score_distance, MetricTag, StringPair};
//!
//! let pair = StringPair::new(Some("kitten"), Some("sitting")).unwrap();
//! assert_eq!(score_distance(&pair, MetricTag::Levenshtein).unwrap(), 3.0);
//! ```

mod bags;
mod edit;
mod jaro;
mod sequence;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use bags::{jaccard_distance, overlap_coefficient, sorensen_dice_distance, tanimoto_coefficient};
pub use edit::{
    hamming_distance, levenshtein_distance, levenshtein_lower_bound, levenshtein_upper_bound,
    normalized_levenshtein_distance,
};
pub use jaro::{jaro_similarity, jaro_winkler_similarity};
pub use sequence::{longest_common_subsequence, longest_common_substring, ratcliff_obershelp_similarity};

/// Closed set of metrics a fuzzy score can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricTag {
    Hamming,
    Jaccard,
    Jaro,
    JaroWinkler,
    Levenshtein,
    NormalizedLevenshtein,
    LongestCommonSubsequence,
    LongestCommonSubstring,
    SorensenDice,
    OverlapCoefficient,
    RatcliffObershelp,
    Tanimoto,
}

impl MetricTag {
    /// All tags in declaration order
    pub const ALL: [MetricTag; 12] = [
        MetricTag::Hamming,
        MetricTag::Jaccard,
        MetricTag::Jaro,
        MetricTag::JaroWinkler,
        MetricTag::Levenshtein,
        MetricTag::NormalizedLevenshtein,
        MetricTag::LongestCommonSubsequence,
        MetricTag::LongestCommonSubstring,
        MetricTag::SorensenDice,
        MetricTag::OverlapCoefficient,
        MetricTag::RatcliffObershelp,
        MetricTag::Tanimoto,
    ];

    /// Whether the raw value grows as strings become more alike
    pub fn is_similarity(&self) -> bool {
        matches!(
            self,
            Self::Jaro
                | Self::JaroWinkler
                | Self::OverlapCoefficient
                | Self::RatcliffObershelp
                | Self::Tanimoto
        )
    }

    /// Whether the metric is guaranteed to give the same value with source and
    /// target swapped.
    ///
    /// Ratcliff/Obershelp picks the first of several equally long matching
    /// blocks, so swapping arguments can change which blocks recurse. Jaro
    /// assigns matches greedily from the source side, which can pair different
    /// characters (and so count different transpositions) after a swap.
    pub fn is_symmetric(&self) -> bool {
        !matches!(self, Self::RatcliffObershelp | Self::Jaro | Self::JaroWinkler)
    }

    pub(crate) fn bit(&self) -> u16 {
        1 << (*self as u16)
    }
}

impl std::fmt::Display for MetricTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Hamming => "hamming",
            Self::Jaccard => "jaccard",
            Self::Jaro => "jaro",
            Self::JaroWinkler => "jaro_winkler",
            Self::Levenshtein => "levenshtein",
            Self::NormalizedLevenshtein => "normalized_levenshtein",
            Self::LongestCommonSubsequence => "longest_common_subsequence",
            Self::LongestCommonSubstring => "longest_common_substring",
            Self::SorensenDice => "sorensen_dice",
            Self::OverlapCoefficient => "overlap_coefficient",
            Self::RatcliffObershelp => "ratcliff_obershelp",
            Self::Tanimoto => "tanimoto",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for MetricTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MetricTag::ALL
            .into_iter()
            .find(|tag| tag.to_string() == s)
            .ok_or_else(|| format!("unknown metric: {}", s))
    }
}

/// Two strings compared by a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringPair<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

impl<'a> StringPair<'a> {
    /// Build a pair, rejecting absent strings with `Error::InvalidInput`.
    pub fn new(source: Option<&'a str>, target: Option<&'a str>) -> Result<Self> {
        let source = source.ok_or(Error::InvalidInput("source"))?;
        let target = target.ok_or(Error::InvalidInput("target"))?;
        Ok(Self { source, target })
    }
}

impl<'a> From<(&'a str, &'a str)> for StringPair<'a> {
    fn from((source, target): (&'a str, &'a str)) -> Self {
        Self { source, target }
    }
}

/// Raw metric value for a pair, in the metric's own units.
///
/// Only Hamming can fail, and only when the lengths differ.
pub fn score_distance(pair: &StringPair<'_>, tag: MetricTag) -> Result<f64> {
    let StringPair { source, target } = *pair;
    let value = match tag {
        MetricTag::Hamming => hamming_distance(source, target)? as f64,
        MetricTag::Jaccard => jaccard_distance(source, target),
        MetricTag::Jaro => jaro_similarity(source, target),
        MetricTag::JaroWinkler => jaro_winkler_similarity(source, target),
        MetricTag::Levenshtein => levenshtein_distance(source, target) as f64,
        MetricTag::NormalizedLevenshtein => normalized_levenshtein_distance(source, target) as f64,
        MetricTag::LongestCommonSubsequence => longest_common_subsequence(source, target) as f64,
        MetricTag::LongestCommonSubstring => longest_common_substring(source, target) as f64,
        MetricTag::SorensenDice => sorensen_dice_distance(source, target),
        MetricTag::OverlapCoefficient => overlap_coefficient(source, target),
        MetricTag::RatcliffObershelp => ratcliff_obershelp_similarity(source, target),
        MetricTag::Tanimoto => tanimoto_coefficient(source, target),
    };
    Ok(value)
}

#[inline]
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
