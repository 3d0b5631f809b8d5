use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::records::AuxField;

/// Field a record list can be ordered by
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    AssetFullPath,
    AssetFilename,
    RawSize,
    ImportedSize,
    ImportedSizeOrRawSize,
    SizeBeforeBuild,
    PercentSize,
    /// Externally supplied metadata (texture or mesh data)
    Aux(AuxField),
}

impl SortField {
    pub fn is_aux(&self) -> bool {
        matches!(self, Self::Aux(_))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetFullPath => f.write_str("asset_full_path"),
            Self::AssetFilename => f.write_str("asset_filename"),
            Self::RawSize => f.write_str("raw_size"),
            Self::ImportedSize => f.write_str("imported_size"),
            Self::ImportedSizeOrRawSize => f.write_str("imported_size_or_raw_size"),
            Self::SizeBeforeBuild => f.write_str("size_before_build"),
            Self::PercentSize => f.write_str("percent_size"),
            Self::Aux(field) => write!(f, "aux:{}", field.id),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    /// Parses the built-in fields; auxiliary fields need a kind and are
    /// constructed directly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "asset_full_path" | "path" => Ok(Self::AssetFullPath),
            "asset_filename" | "filename" => Ok(Self::AssetFilename),
            "raw_size" | "size" => Ok(Self::RawSize),
            "imported_size" => Ok(Self::ImportedSize),
            "imported_size_or_raw_size" => Ok(Self::ImportedSizeOrRawSize),
            "size_before_build" => Ok(Self::SizeBeforeBuild),
            "percent_size" | "percent" => Ok(Self::PercentSize),
            other => Err(format!("unknown sort field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// A field plus a direction. "No sort" is modeled as `Option<SortSpec>::None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn descending(field: SortField) -> Self {
        Self::new(field, SortOrder::Descending)
    }

    pub fn ascending(field: SortField) -> Self {
        Self::new(field, SortOrder::Ascending)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::descending(SortField::RawSize)
    }
}
