//! buildscope Core Engine
//!
//! String similarity metrics, fuzzy equality scoring and the sortable,
//! searchable asset lists of a build-report browser. Everything here is
//! synchronous, in-memory and free of global state: configuration is passed
//! in explicitly.
//!
//! # Example
//!
//! ```rust
//! use buildscope_core::config::{ListConfig, SearchConfig};
//! use buildscope_core::list::{Partition, RecordList};
//! use buildscope_core::records::AssetEntry;
//! use buildscope_core::search::search;
//!
//! let all = vec![
//!     AssetEntry::new("Assets/cat.png", 1200),
//!     AssetEntry::new("Assets/dog.png", 800),
//! ];
//! let list = RecordList::new(all, vec![], &ListConfig::default(), Partition::All).unwrap();
//! assert_eq!(list.top_largest()[0].name, "Assets/cat.png");
//!
//! let found = search(list.all(), "*dog*", &SearchConfig::default());
//! assert_eq!(found.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod fuzzy;
pub mod json;
pub mod list;
pub mod metrics;
pub mod records;
pub mod search;
pub mod sort;
pub mod view;

// Re-export main types at crate root
pub use config::{BrowserConfig, ListConfig, SearchConfig};
pub use error::{Error, Result};
pub use fuzzy::{approximately_equals, fuzzy_score, FuzzyScorer, MetricOptionSet, Tolerance};
pub use json::{score_json, search_json, sort_json};
pub use list::{Partition, RecordList};
pub use metrics::{score_distance, MetricTag, StringPair};
pub use records::{file_name_only, AssetEntry, AuxField, AuxKind, AuxSource, AuxTable, AuxValue, NoAux, Record};
pub use search::{rank_by_search, rank_by_search_in_place, search, SearchMode};
pub use sort::{sort_records, SortField, SortOrder, SortSpec, SortState};
pub use view::AssetView;
