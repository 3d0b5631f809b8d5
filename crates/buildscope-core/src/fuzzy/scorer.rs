//! Fuzzy score computation

use std::borrow::Cow;

use tracing::trace;

use super::options::{MetricOptionSet, Tolerance};
use crate::error::{Error, Result};
use crate::metrics::{self, char_len, MetricTag};

/// One metric's distance contribution in `[0, 1]`.
///
/// Returns `None` only for Hamming on strings of different lengths, which is
/// excluded from the average rather than treated as an error.
pub fn contribution(tag: MetricTag, source: &str, target: &str) -> Option<f64> {
    let (len_s, len_t) = (char_len(source), char_len(target));
    let value = match tag {
        MetricTag::Hamming => {
            let count = metrics::hamming_distance(source, target).ok()?;
            ratio_or_zero(count, len_t)
        }
        MetricTag::Jaccard => metrics::jaccard_distance(source, target),
        MetricTag::Jaro => 1.0 - metrics::jaro_similarity(source, target),
        MetricTag::JaroWinkler => 1.0 - metrics::jaro_winkler_similarity(source, target),
        MetricTag::Levenshtein => {
            let upper = metrics::levenshtein_upper_bound(source, target);
            ratio_or_zero(metrics::levenshtein_distance(source, target), upper)
        }
        MetricTag::NormalizedLevenshtein => {
            let upper = metrics::levenshtein_upper_bound(source, target);
            let span = upper - metrics::levenshtein_lower_bound(source, target);
            match (span, upper) {
                (0, 0) => 0.0,
                // one side empty: nothing in common
                (0, _) => 1.0,
                _ => metrics::normalized_levenshtein_distance(source, target) as f64 / span as f64,
            }
        }
        MetricTag::LongestCommonSubsequence => {
            length_distance(metrics::longest_common_subsequence(source, target), len_s, len_t)
        }
        MetricTag::LongestCommonSubstring => {
            length_distance(metrics::longest_common_substring(source, target), len_s, len_t)
        }
        MetricTag::SorensenDice => metrics::sorensen_dice_distance(source, target),
        MetricTag::OverlapCoefficient => 1.0 - metrics::overlap_coefficient(source, target),
        MetricTag::RatcliffObershelp => 1.0 - metrics::ratcliff_obershelp_similarity(source, target),
        MetricTag::Tanimoto => 1.0 - metrics::tanimoto_coefficient(source, target),
    };
    Some(value.clamp(0.0, 1.0))
}

fn ratio_or_zero(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// `1 - length / min(len)`, 0 for two empty strings, 1 if only one is empty
fn length_distance(length: usize, len_s: usize, len_t: usize) -> f64 {
    match len_s.min(len_t) {
        0 if len_s == len_t => 0.0,
        0 => 1.0,
        shorter => 1.0 - length as f64 / shorter as f64,
    }
}

/// Mean distance over the selected metrics, in `[0, 1]` (0 = identical).
///
/// Both strings are lowercased unless the set is case-sensitive. When both
/// Levenshtein variants are selected only the normalized one runs. Fails with
/// `Error::EmptyOptionSet` when no metric contributed.
pub fn fuzzy_score(source: &str, target: &str, options: &MetricOptionSet) -> Result<f64> {
    let (source, target) = fold_case(source, target, options.is_case_sensitive());

    let skip_plain_levenshtein = options.contains(MetricTag::NormalizedLevenshtein);
    let mut total = 0.0;
    let mut count = 0usize;

    for tag in options.iter() {
        if tag == MetricTag::Levenshtein && skip_plain_levenshtein {
            continue;
        }
        if let Some(value) = contribution(tag, &source, &target) {
            trace!(metric = %tag, value, "metric contribution");
            total += value;
            count += 1;
        }
    }

    if count == 0 {
        return Err(Error::EmptyOptionSet);
    }
    Ok(total / count as f64)
}

/// Whether two strings are close enough under `tolerance`.
///
/// An empty option set (or one that yields no contribution) is never a match.
pub fn approximately_equals(
    source: &str,
    target: &str,
    tolerance: Tolerance,
    options: &MetricOptionSet,
) -> bool {
    if options.is_empty() {
        return false;
    }
    match fuzzy_score(source, target, options) {
        Ok(score) => tolerance.accepts(score),
        Err(_) => false,
    }
}

fn fold_case<'a>(source: &'a str, target: &'a str, case_sensitive: bool) -> (Cow<'a, str>, Cow<'a, str>) {
    if case_sensitive {
        (Cow::Borrowed(source), Cow::Borrowed(target))
    } else {
        (Cow::Owned(source.to_lowercase()), Cow::Owned(target.to_lowercase()))
    }
}

/// Metric selection bundled with a tolerance tier
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyScorer {
    pub options: MetricOptionSet,
    pub tolerance: Tolerance,
}

impl FuzzyScorer {
    pub fn new(options: MetricOptionSet, tolerance: Tolerance) -> Self {
        Self { options, tolerance }
    }

    pub fn score(&self, source: &str, target: &str) -> Result<f64> {
        fuzzy_score(source, target, &self.options)
    }

    pub fn matches(&self, source: &str, target: &str) -> bool {
        approximately_equals(source, target, self.tolerance, &self.options)
    }
}
