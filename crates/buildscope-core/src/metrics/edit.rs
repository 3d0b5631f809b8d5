//! Edit distances: Hamming and Levenshtein

use crate::error::{Error, Result};

use super::char_len;

/// Number of positions at which two equal-length strings differ.
///
/// Undefined for strings of different lengths, reported as
/// `Error::HammingLengthMismatch`.
pub fn hamming_distance(source: &str, target: &str) -> Result<usize> {
    strsim::hamming(source, target).map_err(|_| Error::HammingLengthMismatch {
        source_len: char_len(source),
        target_len: char_len(target),
    })
}

/// Classic unit-cost edit distance (insert, delete, substitute)
#[inline]
pub fn levenshtein_distance(source: &str, target: &str) -> usize {
    strsim::levenshtein(source, target)
}

/// Smallest possible edit distance: the length difference
#[inline]
pub fn levenshtein_lower_bound(source: &str, target: &str) -> usize {
    char_len(source).abs_diff(char_len(target))
}

/// Largest possible edit distance: the longer length
#[inline]
pub fn levenshtein_upper_bound(source: &str, target: &str) -> usize {
    char_len(source).max(char_len(target))
}

/// Edit distance above the lower bound, in `0..=upper - lower`
pub fn normalized_levenshtein_distance(source: &str, target: &str) -> usize {
    levenshtein_distance(source, target) - levenshtein_lower_bound(source, target)
}
