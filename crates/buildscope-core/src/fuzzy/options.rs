//! Metric selection and tolerance tiers

use serde::{Deserialize, Serialize};

use crate::metrics::MetricTag;

/// Set of metrics to run, plus the case-sensitivity flag.
///
/// Stored as a bitset over `MetricTag`, so membership is unique and
/// insertion order is irrelevant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "OptionSetRepr", into = "OptionSetRepr")]
pub struct MetricOptionSet {
    bits: u16,
    case_sensitive: bool,
}

impl MetricOptionSet {
    /// Empty set, case-insensitive
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tags(tags: impl IntoIterator<Item = MetricTag>) -> Self {
        tags.into_iter().collect()
    }

    /// Metrics used to match and rank asset names in search
    pub fn search_default() -> Self {
        Self::from_tags([
            MetricTag::OverlapCoefficient,
            MetricTag::LongestCommonSubsequence,
            MetricTag::LongestCommonSubstring,
        ])
    }

    pub fn with(mut self, tag: MetricTag) -> Self {
        self.insert(tag);
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn insert(&mut self, tag: MetricTag) {
        self.bits |= tag.bit();
    }

    pub fn remove(&mut self, tag: MetricTag) {
        self.bits &= !tag.bit();
    }

    pub fn contains(&self, tag: MetricTag) -> bool {
        self.bits & tag.bit() != 0
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// True when no metric is selected (the case flag alone does not count)
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Selected metrics in declaration order
    pub fn iter(&self) -> impl Iterator<Item = MetricTag> + '_ {
        MetricTag::ALL.into_iter().filter(|tag| self.contains(*tag))
    }
}

impl FromIterator<MetricTag> for MetricOptionSet {
    fn from_iter<I: IntoIterator<Item = MetricTag>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

#[derive(Serialize, Deserialize)]
struct OptionSetRepr {
    #[serde(default)]
    metrics: Vec<MetricTag>,
    #[serde(default)]
    case_sensitive: bool,
}

impl From<OptionSetRepr> for MetricOptionSet {
    fn from(repr: OptionSetRepr) -> Self {
        MetricOptionSet::from_tags(repr.metrics).case_sensitive(repr.case_sensitive)
    }
}

impl From<MetricOptionSet> for OptionSetRepr {
    fn from(set: MetricOptionSet) -> Self {
        OptionSetRepr {
            metrics: set.iter().collect(),
            case_sensitive: set.case_sensitive,
        }
    }
}

/// Acceptance threshold for approximate equality
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tolerance {
    /// score < 0.25
    #[default]
    Strong,
    /// score < 0.5
    Normal,
    /// score < 0.75
    Weak,
    /// score > 0.6 (the comparison is inverted for this tier)
    Manual,
}

impl Tolerance {
    /// Whether a fuzzy score passes this tier
    pub fn accepts(&self, score: f64) -> bool {
        match self {
            Self::Strong => score < 0.25,
            Self::Normal => score < 0.5,
            Self::Weak => score < 0.75,
            Self::Manual => score > 0.6,
        }
    }
}

impl std::str::FromStr for Tolerance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strong" => Ok(Self::Strong),
            "normal" => Ok(Self::Normal),
            "weak" => Ok(Self::Weak),
            "manual" => Ok(Self::Manual),
            other => Err(format!("unknown tolerance: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_is_unique_and_unordered() {
        let a = MetricOptionSet::from_tags([MetricTag::Jaro, MetricTag::Jaccard, MetricTag::Jaro]);
        let b = MetricOptionSet::from_tags([MetricTag::Jaccard, MetricTag::Jaro]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![MetricTag::Jaccard, MetricTag::Jaro]);
    }

    #[test]
    fn test_case_flag_is_not_a_metric() {
        let set = MetricOptionSet::new().case_sensitive(true);
        assert!(set.is_empty());
        assert!(set.is_case_sensitive());
    }

    #[test]
    fn test_remove() {
        let mut set = MetricOptionSet::search_default();
        set.remove(MetricTag::OverlapCoefficient);
        assert!(!set.contains(MetricTag::OverlapCoefficient));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_serde_shape() {
        let set = MetricOptionSet::from_tags([MetricTag::Jaro]).case_sensitive(true);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"metrics":["jaro"],"case_sensitive":true}"#);
        let back: MetricOptionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_tolerance_thresholds() {
        assert!(Tolerance::Strong.accepts(0.2));
        assert!(!Tolerance::Strong.accepts(0.25));
        assert!(Tolerance::Normal.accepts(0.49));
        assert!(!Tolerance::Normal.accepts(0.5));
        assert!(Tolerance::Weak.accepts(0.7));
        assert!(!Tolerance::Weak.accepts(0.75));
    }

    #[test]
    fn test_manual_tolerance_is_inverted() {
        assert!(Tolerance::Manual.accepts(0.61));
        assert!(!Tolerance::Manual.accepts(0.6));
        assert!(!Tolerance::Manual.accepts(0.0));
    }
}
