//! Keyword dispatch table for single-value header lines.

use crate::constants::*;
use crate::error::FieldError;
use crate::models::MetadataValue;
use crate::numeric::{parse_float, parse_integer};
use std::collections::HashMap;
use std::sync::LazyLock;

pub type Coercion = fn(&str) -> Result<MetadataValue, FieldError>;

/// How a recognised keyword's payload is coerced, and its unit
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub coerce: Coercion,
    pub unit: Option<&'static str>,
}

fn text(payload: &str) -> Result<MetadataValue, FieldError> {
    Ok(MetadataValue::Text(payload.to_string()))
}

fn integer(payload: &str) -> Result<MetadataValue, FieldError> {
    parse_integer(payload).map(MetadataValue::Integer)
}

fn float(payload: &str) -> Result<MetadataValue, FieldError> {
    parse_float(payload).map(MetadataValue::Float)
}

static KEYWORD_TABLE: LazyLock<HashMap<&'static str, FieldRule>> = LazyLock::new(|| {
    let rule = |coerce: Coercion, unit: Option<&'static str>| FieldRule { coerce, unit };

    HashMap::from([
        (CTF_AUTHOR, rule(text, None)),
        (CTF_JOB_MODE, rule(text, None)),
        (CTF_X_CELLS, rule(integer, None)),
        (CTF_Y_CELLS, rule(integer, None)),
        (CTF_Z_CELLS, rule(integer, None)),
        (CTF_X_STEP, rule(float, Some(units::MICRONS))),
        (CTF_Y_STEP, rule(float, Some(units::MICRONS))),
        (CTF_Z_STEP, rule(float, Some(units::MICRONS))),
        (CTF_ACQ_E1, rule(float, None)),
        (CTF_ACQ_E2, rule(float, None)),
        (CTF_ACQ_E3, rule(float, None)),
        (CTF_EULER, rule(text, None)),
    ])
});

/// Look up the rule for a header keyword
pub fn lookup(keyword: &str) -> Option<&'static FieldRule> {
    KEYWORD_TABLE.get(keyword)
}

impl FieldRule {
    /// Coerce a payload; `None` means the line carried no payload token
    pub fn apply(&self, payload: Option<&str>) -> Result<MetadataValue, FieldError> {
        match payload {
            Some(p) => (self.coerce)(p),
            None => Ok(MetadataValue::Absent),
        }
    }
}
