//! Jaro and Jaro-Winkler similarity

/// Jaro similarity, 1.0 for identical strings and for two empty strings
#[inline]
pub fn jaro_similarity(source: &str, target: &str) -> f64 {
    strsim::jaro(source, target)
}

/// Jaro similarity boosted by the shared prefix (up to 4 chars, scale 0.1).
///
/// The prefix boost is order independent, but the underlying Jaro match
/// assignment is greedy, so swapping arguments is not guaranteed to give the
/// same value.
#[inline]
pub fn jaro_winkler_similarity(source: &str, target: &str) -> f64 {
    strsim::jaro_winkler(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jaro_known_values() {
        assert!((jaro_similarity("martha", "marhta") - 0.944).abs() < 0.001);
        assert_eq!(jaro_similarity("abc", "abc"), 1.0);
        assert_eq!(jaro_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_jaro_winkler_rewards_prefix() {
        let jw = jaro_winkler_similarity("martha", "marhta");
        assert!(jw > jaro_similarity("martha", "marhta"));
        assert!((jw - 0.961).abs() < 0.001);
    }

    #[test]
    fn test_jaro_winkler_swapped_known_pair() {
        assert_eq!(
            jaro_winkler_similarity("dixon", "dicksonx"),
            jaro_winkler_similarity("dicksonx", "dixon")
        );
    }

    #[test]
    fn test_jaro_empty_boundaries() {
        assert_eq!(jaro_similarity("", ""), 1.0);
        assert_eq!(jaro_similarity("abc", ""), 0.0);
        assert_eq!(jaro_winkler_similarity("", "abc"), 0.0);
    }
}
