//! Auxiliary per-record metadata used by the extra sort fields

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Non-power-of-two scale value of a texture that is already a power of two.
/// Pinned to the front of the descending scale sort.
pub const NPOT_SCALE_NONE_NOT_POT: &str = "None (Not Power of 2)";

/// A typed metadata value for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuxValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AuxValue {
    /// Integer view; booleans coerce to 0/1, floats truncate
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Float(f) => Some(*f as i64),
            Self::Text(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(v) => Some(*v as f64),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// How an auxiliary field compares
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuxKind {
    Int,
    Float,
    Text,
    /// Text where `sentinel` always sorts first in descending order
    PinnedText { sentinel: String },
}

/// An externally defined sort field, e.g. `texture_max_size`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuxField {
    pub id: String,
    pub kind: AuxKind,
}

impl AuxField {
    pub fn new(id: impl Into<String>, kind: AuxKind) -> Self {
        Self { id: id.into(), kind }
    }

    pub fn int(id: impl Into<String>) -> Self {
        Self::new(id, AuxKind::Int)
    }

    pub fn float(id: impl Into<String>) -> Self {
        Self::new(id, AuxKind::Float)
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, AuxKind::Text)
    }

    /// The non-power-of-two scale field with its usual sentinel
    pub fn npot_scale(id: impl Into<String>) -> Self {
        Self::new(
            id,
            AuxKind::PinnedText {
                sentinel: NPOT_SCALE_NONE_NOT_POT.to_string(),
            },
        )
    }
}

/// Lookup from record name and field id to a metadata value.
///
/// Absent values are fine: int and float fields read them as zero, text
/// fields as "no text".
pub trait AuxSource {
    fn lookup(&self, record: &str, field: &str) -> Option<AuxValue>;
}

/// Source with no metadata at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAux;

impl AuxSource for NoAux {
    fn lookup(&self, _record: &str, _field: &str) -> Option<AuxValue> {
        None
    }
}

/// In-memory metadata table: record name -> field id -> value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuxTable {
    entries: AHashMap<String, AHashMap<String, AuxValue>>,
}

impl AuxTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: impl Into<String>, field: impl Into<String>, value: AuxValue) {
        self.entries
            .entry(record.into())
            .or_default()
            .insert(field.into(), value);
    }

    pub fn with(mut self, record: impl Into<String>, field: impl Into<String>, value: AuxValue) -> Self {
        self.insert(record, field, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AuxSource for AuxTable {
    fn lookup(&self, record: &str, field: &str) -> Option<AuxValue> {
        self.entries.get(record)?.get(field).cloned()
    }
}

impl<T: AuxSource + ?Sized> AuxSource for &T {
    fn lookup(&self, record: &str, field: &str) -> Option<AuxValue> {
        (**self).lookup(record, field)
    }
}
