//! Asset records and the auxiliary metadata attached to them
//!
//! The list and sort layers are generic over [`Record`]; [`AssetEntry`] is the
//! concrete, serde-friendly record the CLI and JSON entry points use.
//! Per-record metadata owned by other subsystems (texture import settings,
//! mesh stats) is reached through an [`AuxSource`] keyed by record name.

mod aux;

pub use aux::{AuxField, AuxKind, AuxSource, AuxTable, AuxValue, NoAux, NPOT_SCALE_NONE_NOT_POT};

use serde::{Deserialize, Serialize};

/// A sized asset identified by its full path.
///
/// `name` is the unique key: selection, auxiliary lookups and scratch sort
/// keys are all indexed by it.
pub trait Record {
    /// Full asset path
    fn name(&self) -> &str;

    /// Size used for totals, percentages and the raw-size sort
    fn usable_size(&self) -> u64;

    fn imported_size(&self) -> Option<u64>;

    fn size_before_build(&self) -> Option<u64>;

    /// Imported size when known, else the usable size
    fn imported_size_or_raw_size(&self) -> u64 {
        self.imported_size().unwrap_or_else(|| self.usable_size())
    }

    /// Share of the total size, in percent
    fn percentage(&self) -> f64;

    fn set_percentage(&mut self, percentage: f64);
}

/// One entry of a build report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub name: String,
    pub raw_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_before_build: Option<u64>,
    #[serde(default)]
    pub percentage: f64,
}

impl AssetEntry {
    pub fn new(name: impl Into<String>, raw_size: u64) -> Self {
        Self {
            name: name.into(),
            raw_size,
            imported_size: None,
            size_before_build: None,
            percentage: 0.0,
        }
    }

    pub fn with_imported_size(mut self, size: u64) -> Self {
        self.imported_size = Some(size);
        self
    }

    pub fn with_size_before_build(mut self, size: u64) -> Self {
        self.size_before_build = Some(size);
        self
    }

    pub fn file_name(&self) -> &str {
        file_name_only(&self.name)
    }
}

impl Record for AssetEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn usable_size(&self) -> u64 {
        self.raw_size
    }

    fn imported_size(&self) -> Option<u64> {
        self.imported_size
    }

    fn size_before_build(&self) -> Option<u64> {
        self.size_before_build
    }

    fn percentage(&self) -> f64 {
        self.percentage
    }

    fn set_percentage(&mut self, percentage: f64) {
        self.percentage = percentage;
    }
}

/// Text after the last `/` or `\` separator (the whole string if there is none)
pub fn file_name_only(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
