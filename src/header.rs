//! CTF header parsing and metadata extraction.
//!
//! Walks the header section of a Channel Text File one line at a time,
//! classifying each line by its leading keyword. The pass ends as soon as
//! the phase table announced by the `Phases` line has been consumed; the
//! orientation data body that follows is left unread.

use crate::constants::*;
use crate::emitter::{ClassNameLookup, LaueClassTable, emit_metadata};
use crate::error::{CtfError, FieldError, Result};
use crate::keywords;
use crate::models::{Header, MetadataEntry};
use crate::numeric::{parse_float, parse_integer, parse_truncated_integer};
use crate::phases::parse_phases;
use crate::source::{Line, LineCursor};
use std::path::Path;
use tracing::{debug, trace};

/// Parse a header and flatten it into the ordered metadata sequence
pub fn parse_header(source: &mut LineCursor<'_>) -> Result<Vec<MetadataEntry>> {
    parse_header_with(source, &LaueClassTable)
}

/// As [`parse_header`], with a caller-supplied phase class-name lookup
pub fn parse_header_with(
    source: &mut LineCursor<'_>,
    lookup: &dyn ClassNameLookup,
) -> Result<Vec<MetadataEntry>> {
    let header = build_header(source)?;
    Ok(emit_metadata(&header, lookup))
}

/// Build the [`Header`] aggregate, consuming lines up to the end of the phase table
pub fn build_header(source: &mut LineCursor<'_>) -> Result<Header> {
    let mut builder = HeaderBuilder::new();

    while let Some(line) = source.next_line()? {
        match builder.parse_line(&line)? {
            LineOutcome::Continue => {}
            LineOutcome::PhaseTable(count) => {
                let phases = parse_phases(source, count)?;
                builder.set_phases(phases.into_iter().map(|p| (p.index, p)));
                // The cursor now sits on the data body
                break;
            }
        }
    }

    let header = builder.build();
    debug!(
        "Parsed header: {} entries, {} unknown, {} phases, {} lines read",
        header.entries.len(),
        header.unknown_entries.len(),
        header.phases.len(),
        source.consumed()
    );
    Ok(header)
}

/// Read the header of a CTF file on disk
pub fn read_header_file(file_path: &Path) -> Result<Header> {
    let wrap = |source: CtfError| CtfError::HeaderParsingFailed {
        path: file_path.to_path_buf(),
        source: Box::new(source),
    };

    let mut cursor = LineCursor::open(file_path).map_err(wrap)?;
    build_header(&mut cursor).map_err(wrap)
}

/// Read a CTF file on disk and flatten its header into metadata entries
pub fn parse_header_file(file_path: &Path) -> Result<Vec<MetadataEntry>> {
    let header = read_header_file(file_path)?;
    Ok(emit_metadata(&header, &LaueClassTable))
}

/// Whether a path has one of the given extensions (case-insensitive, without the dot)
pub fn accepts_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions.iter().any(|accepted| {
                accepted
                    .as_ref()
                    .trim_start_matches('.')
                    .eq_ignore_ascii_case(ext)
            })
        })
}

fn source_key(name: &str) -> String {
    format!("{}/{}", KEY_PREFIX, name)
}

/// What the header loop should do after a line has been classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    /// The phase marker was seen; this many rows follow
    PhaseTable(u32),
}

/// Accumulates entries while the header is being walked
struct HeaderBuilder {
    header: Header,
}

impl HeaderBuilder {
    fn new() -> Self {
        Self {
            header: Header::new(),
        }
    }

    fn parse_line(&mut self, line: &Line) -> Result<LineOutcome> {
        self.classify(&line.text)
            .map_err(|source| CtfError::invalid_format(line.number, line.text.clone(), source))
    }

    fn classify(&mut self, text: &str) -> std::result::Result<LineOutcome, FieldError> {
        let tokens: Vec<&str> = text.split(CTF_DELIMITER).collect();
        let keyword = tokens[0];

        if text.starts_with(CTF_CHANNEL_TEXT_FILE) || text.starts_with(CTF_COLON_CHANNEL_TEXT_FILE)
        {
            trace!("signature line");
        } else if let Some(rest) = text.strip_prefix(CTF_PRJ) {
            trace!("project line");
            self.header
                .entries
                .push(MetadataEntry::plain(source_key(CTF_PRJ), strip_separator(rest)));
        } else if text.starts_with(CTF_LONG_TEXT) {
            trace!("instrument line");
            let entries = parse_long_text(&tokens)?;
            self.header.entries.extend(entries);
        } else if text.starts_with(CTF_PHASES) {
            let count = parse_phase_count(&tokens)?;
            trace!(count, "phase marker");
            return Ok(LineOutcome::PhaseTable(count));
        } else if let Some(rule) = keywords::lookup(keyword) {
            trace!(keyword, "header keyword");
            let payload = remainder(&tokens);
            let value = rule.apply(payload.as_deref())?;
            self.header.entries.push(MetadataEntry::new(
                source_key(keyword),
                value,
                None,
                rule.unit,
            ));
        } else {
            debug!(keyword, "unrecognised header keyword");
            let payload = remainder(&tokens).unwrap_or_default();
            self.header
                .unknown_entries
                .push(MetadataEntry::plain(source_key(keyword), payload));
        }

        Ok(LineOutcome::Continue)
    }

    fn set_phases(&mut self, phases: impl IntoIterator<Item = (u32, crate::models::Phase)>) {
        self.header.phases.extend(phases);
    }

    fn build(self) -> Header {
        self.header
    }
}

/// Fields after the keyword, rejoined; `None` if the keyword stands alone
fn remainder(tokens: &[&str]) -> Option<String> {
    if tokens.len() > 1 {
        Some(tokens[1..].join(&CTF_DELIMITER.to_string()))
    } else {
        None
    }
}

/// Drop exactly one separator character after the `Prj` prefix
fn strip_separator(rest: &str) -> &str {
    let mut chars = rest.chars();
    chars.next();
    chars.as_str()
}

fn parse_phase_count(tokens: &[&str]) -> std::result::Result<u32, FieldError> {
    let field = tokens.get(1).ok_or(FieldError::MissingPhaseCount)?;
    let count = parse_integer(field)?;
    if count < 0 {
        return Err(FieldError::NegativePhaseCount { count });
    }
    u32::try_from(count).map_err(|_| FieldError::PhaseCountTooLarge { count })
}

/// Decode the instrument line that packs six values at fixed token offsets
pub fn parse_long_text(tokens: &[&str]) -> std::result::Result<Vec<MetadataEntry>, FieldError> {
    if tokens.len() < LONG_TEXT_MIN_TOKENS {
        return Err(FieldError::MissingFields {
            what: "long-text instrument line",
            expected: LONG_TEXT_MIN_TOKENS,
            found: tokens.len(),
        });
    }

    let [mag, coverage, device, kv, tilt_angle, tilt_axis] = LONG_TEXT_OFFSETS.map(|i| tokens[i]);

    Ok(vec![
        MetadataEntry::plain(source_key(CTF_MAG), parse_integer(mag)?),
        MetadataEntry::plain(source_key(CTF_COVERAGE), parse_integer(coverage)?),
        MetadataEntry::plain(source_key(CTF_DEVICE), parse_integer(device)?),
        // Some instruments write the voltage with a decimal point
        MetadataEntry::plain(source_key(CTF_KV), parse_truncated_integer(kv)?),
        MetadataEntry::plain(source_key(CTF_TILT_ANGLE), parse_float(tilt_angle)?),
        MetadataEntry::plain(source_key(CTF_TILT_AXIS), parse_float(tilt_axis)?),
    ])
}
