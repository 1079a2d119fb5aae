//! Core data structures produced by the CTF header parser.
//!
//! Defines metadata entries and values, the parsed header aggregate,
//! phase records and the closed Laue group enumeration.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value carried by a metadata entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Triplet([f64; 3]),
    /// A recognised keyword with no payload
    Absent,
}

impl MetadataValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, MetadataValue::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_triplet(&self) -> Option<[f64; 3]> {
        match self {
            MetadataValue::Triplet(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(s) => write!(f, "{}", s),
            MetadataValue::Integer(v) => write!(f, "{}", v),
            MetadataValue::Float(v) => write!(f, "{}", v),
            MetadataValue::Triplet([a, b, c]) => write!(f, "({}, {}, {})", a, b, c),
            MetadataValue::Absent => write!(f, "<absent>"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

impl From<[f64; 3]> for MetadataValue {
    fn from(value: [f64; 3]) -> Self {
        MetadataValue::Triplet(value)
    }
}

/// A single (key path, value, annotation, unit) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    key: String,
    value: MetadataValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
}

impl MetadataEntry {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<MetadataValue>,
        annotation: Option<String>,
        unit: Option<&str>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            annotation,
            unit: unit.map(str::to_string),
        }
    }

    /// Entry with neither annotation nor unit
    pub fn plain(key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self::new(key, value, None, None)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &MetadataValue {
        &self.value
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }
}

/// Laue group codes as written in the fourth field of a phase row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaueGroup {
    Triclinic = 1,
    Monoclinic = 2,
    Orthorhombic = 3,
    TetragonalLow = 4,
    TetragonalHigh = 5,
    TrigonalLow = 6,
    TrigonalHigh = 7,
    HexagonalLow = 8,
    HexagonalHigh = 9,
    CubicLow = 10,
    CubicHigh = 11,
    UnknownSymmetry = 12,
}

impl LaueGroup {
    pub const ALL: [LaueGroup; 12] = [
        LaueGroup::Triclinic,
        LaueGroup::Monoclinic,
        LaueGroup::Orthorhombic,
        LaueGroup::TetragonalLow,
        LaueGroup::TetragonalHigh,
        LaueGroup::TrigonalLow,
        LaueGroup::TrigonalHigh,
        LaueGroup::HexagonalLow,
        LaueGroup::HexagonalHigh,
        LaueGroup::CubicLow,
        LaueGroup::CubicHigh,
        LaueGroup::UnknownSymmetry,
    ];

    pub fn code(self) -> i64 {
        self as i64
    }

    /// Symbolic name, as emitted in the `LaueGroup` metadata entry
    pub fn name(self) -> &'static str {
        match self {
            LaueGroup::Triclinic => "TRICLINIC",
            LaueGroup::Monoclinic => "MONOCLINIC",
            LaueGroup::Orthorhombic => "ORTHORHOMBIC",
            LaueGroup::TetragonalLow => "TETRAGONAL_LOW",
            LaueGroup::TetragonalHigh => "TETRAGONAL_HIGH",
            LaueGroup::TrigonalLow => "TRIGONAL_LOW",
            LaueGroup::TrigonalHigh => "TRIGONAL_HIGH",
            LaueGroup::HexagonalLow => "HEXAGONAL_LOW",
            LaueGroup::HexagonalHigh => "HEXAGONAL_HIGH",
            LaueGroup::CubicLow => "CUBIC_LOW",
            LaueGroup::CubicHigh => "CUBIC_HIGH",
            LaueGroup::UnknownSymmetry => "UNKNOWN_SYMMETRY",
        }
    }
}

impl TryFrom<i64> for LaueGroup {
    type Error = FieldError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        LaueGroup::ALL
            .iter()
            .copied()
            .find(|group| group.code() == code)
            .ok_or(FieldError::UnknownLaueGroup { code })
    }
}

impl fmt::Display for LaueGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the phase table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Position in the phase table, starting at 1
    pub index: u32,
    /// a, b, c in angstrom
    pub lattice_constants: [f64; 3],
    /// alpha, beta, gamma in degrees
    pub lattice_angles: [f64; 3],
    pub name: String,
    pub laue_group: LaueGroup,
    pub space_group: i64,
    pub comment: String,
    pub internal1: String,
    pub internal2: String,
}

/// Everything extracted from the header section of one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub entries: Vec<MetadataEntry>,
    pub unknown_entries: Vec<MetadataEntry>,
    pub phases: BTreeMap<u32, Phase>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// First recognised entry with the given key
    pub fn entry(&self, key: &str) -> Option<&MetadataEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }
}
