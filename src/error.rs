//! Error handling for CTF header parsing.
//!
//! Field-level coercion failures are reported as [`FieldError`] and lifted
//! into [`CtfError::InvalidFormat`] by the classifier, which knows the line
//! number and content the field came from.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single field or token could not be coerced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("'{text}' is not a valid integer")]
    InvalidInteger {
        text: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("'{text}' is not a valid decimal number")]
    InvalidFloat {
        text: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("'{text}' is not a ';'-separated triplet (found {found} parts)")]
    InvalidTriplet { text: String, found: usize },

    #[error("'{text}' is not a finite number")]
    NonFiniteValue { text: String },

    #[error("'{text}' does not fit in a 64-bit integer")]
    IntegerOutOfRange { text: String },

    #[error("Laue group code {code} is outside 1..=12")]
    UnknownLaueGroup { code: i64 },

    #[error("{what} needs at least {expected} fields, found {found}")]
    MissingFields {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("phase marker has no count field")]
    MissingPhaseCount,

    #[error("phase count {count} is negative")]
    NegativePhaseCount { count: i64 },

    #[error("phase count {count} exceeds {}", u32::MAX)]
    PhaseCountTooLarge { count: i64 },
}

#[derive(Error, Debug)]
pub enum CtfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid CTF format at line {line}: {source} (line: '{content}')")]
    InvalidFormat {
        line: usize,
        content: String,
        #[source]
        source: FieldError,
    },

    #[error("Phase table truncated: {declared} phases declared, input ended after {found}")]
    TruncatedPhaseTable { declared: u32, found: u32 },

    #[error("Header parsing failed for file: {path} - {source}")]
    HeaderParsingFailed {
        path: PathBuf,
        #[source]
        source: Box<CtfError>,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl CtfError {
    /// Attach line context to a field failure
    pub fn invalid_format(line: usize, content: impl Into<String>, source: FieldError) -> Self {
        Self::InvalidFormat {
            line,
            content: content.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for malformed input, as opposed to I/O or configuration failures
    pub fn is_format_error(&self) -> bool {
        match self {
            Self::InvalidFormat { .. } | Self::TruncatedPhaseTable { .. } => true,
            Self::HeaderParsingFailed { source, .. } => source.is_format_error(),
            Self::Io(_) | Self::Configuration { .. } => false,
        }
    }

    /// Line number of the offending input, if known
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidFormat { line, .. } => Some(*line),
            Self::HeaderParsingFailed { source, .. } => source.line(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CtfError>;
