//! CTF Header Library
//!
//! A Rust library for extracting structured metadata from the header section
//! of EBSD Channel Text Files (CTF) ahead of the per-pixel orientation data.
//!
//! This library provides tools for:
//! - Classifying header lines by keyword and coercing their values
//! - Accepting both period and comma decimal separators
//! - Decoding the fixed-offset instrument line (magnification, voltage, tilt)
//! - Reading the variable-shape phase table that follows the `Phases` marker
//! - Flattening everything into an ordered sequence of metadata entries
//!
//! ```rust
//! use ctf_header::{LineCursor, parse_header};
//!
//! let text = "Channel Text File\nXStep\t0,5\nPhases\t1\n\
//!             3.52;3.52;3.52\t90;90;90\tNickel\t11\t225\t\t\tFCC Nickel\n";
//! let entries = parse_header(&mut LineCursor::from_text(text))?;
//!
//! assert_eq!(entries[0].key(), "SOURCE/XStep");
//! assert_eq!(entries.len(), 1 + 8);
//! # Ok::<(), ctf_header::CtfError>(())
//! ```

pub mod config;
pub mod constants;
pub mod emitter;
pub mod error;
pub mod header;
pub mod keywords;
pub mod models;
pub mod numeric;
pub mod phases;
pub mod source;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::Config;
pub use emitter::{ClassNameLookup, LaueClassTable, emit_metadata};
pub use error::{CtfError, FieldError, Result};
pub use header::{
    accepts_extension, build_header, parse_header, parse_header_file, parse_header_with,
    read_header_file,
};
pub use models::{Header, LaueGroup, MetadataEntry, MetadataValue, Phase};
pub use phases::parse_phases;
pub use source::LineCursor;
