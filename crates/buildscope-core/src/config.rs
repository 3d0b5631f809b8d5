//! Explicit configuration passed into the search and list entry points
//!
//! Every struct deserializes with defaults for missing keys, so a partial
//! JSON file only needs the settings it changes.

use serde::{Deserialize, Serialize};

use crate::fuzzy::{MetricOptionSet, Tolerance};
use crate::search::SearchMode;
use crate::sort::SortSpec;

/// Default number of entries kept in the top-largest list
pub const DEFAULT_TOP_LARGEST: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub mode: SearchMode,
    /// Match against the file name instead of the full path
    pub filename_only: bool,
    /// Ignored by fuzzy search, which always folds case
    pub case_sensitive: bool,
    /// Tolerance used by fuzzy search
    pub tolerance: Tolerance,
    /// Metrics used by fuzzy search and result ranking
    pub metrics: MetricOptionSet,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::Basic,
            filename_only: false,
            case_sensitive: false,
            tolerance: Tolerance::Strong,
            metrics: MetricOptionSet::search_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub number_of_top_largest: usize,
    /// Sort applied when a list is first built
    pub default_sort: SortSpec,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            number_of_top_largest: DEFAULT_TOP_LARGEST,
            default_sort: SortSpec::default(),
        }
    }
}

/// Everything the asset browser needs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub search: SearchConfig,
    pub list: ListConfig,
}

impl BrowserConfig {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
