//! Set-based metrics over character multisets
//!
//! Each string is reduced to a bag of characters (a char may occur several
//! times). Intersection takes the smaller count per char, union the larger.

use ahash::AHashMap;

struct CharBag {
    counts: AHashMap<char, usize>,
    len: usize,
}

impl CharBag {
    fn new(s: &str) -> Self {
        let mut counts = AHashMap::new();
        let mut len = 0;
        for c in s.chars() {
            *counts.entry(c).or_insert(0) += 1;
            len += 1;
        }
        Self { counts, len }
    }

    fn intersection(&self, other: &CharBag) -> usize {
        self.counts
            .iter()
            .map(|(c, n)| other.counts.get(c).map_or(0, |m| (*n).min(*m)))
            .sum()
    }

    fn union(&self, other: &CharBag) -> usize {
        self.len + other.len - self.intersection(other)
    }
}

/// `1 - |A ∩ B| / |A ∪ B|`; 0.0 for two empty strings
pub fn jaccard_distance(source: &str, target: &str) -> f64 {
    let (a, b) = (CharBag::new(source), CharBag::new(target));
    let union = a.union(&b);
    if union == 0 {
        return 0.0;
    }
    1.0 - a.intersection(&b) as f64 / union as f64
}

/// `1 - 2|A ∩ B| / (|A| + |B|)`; 0.0 for two empty strings
pub fn sorensen_dice_distance(source: &str, target: &str) -> f64 {
    let (a, b) = (CharBag::new(source), CharBag::new(target));
    let total = a.len + b.len;
    if total == 0 {
        return 0.0;
    }
    1.0 - (2 * a.intersection(&b)) as f64 / total as f64
}

/// `|A ∩ B| / min(|A|, |B|)`; 1.0 for two empty strings, 0.0 if only one is empty
pub fn overlap_coefficient(source: &str, target: &str) -> f64 {
    let (a, b) = (CharBag::new(source), CharBag::new(target));
    match (a.len, b.len) {
        (0, 0) => 1.0,
        (0, _) | (_, 0) => 0.0,
        (la, lb) => a.intersection(&b) as f64 / la.min(lb) as f64,
    }
}

/// `|A ∩ B| / (|A| + |B| - |A ∩ B|)`; 1.0 for two empty strings
pub fn tanimoto_coefficient(source: &str, target: &str) -> f64 {
    let (a, b) = (CharBag::new(source), CharBag::new(target));
    let common = a.intersection(&b);
    let denominator = a.len + b.len - common;
    if denominator == 0 {
        return 1.0;
    }
    common as f64 / denominator as f64
}
