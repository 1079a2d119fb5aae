//! Phase table parsing.
//!
//! The phase table follows the `Phases<TAB>N` marker and consists of exactly
//! N tab-delimited rows. Rows come in two shapes:
//!
//! ```text
//! constants  angles  name  laue  comment                                     (5 fields)
//! constants  angles  name  laue  space_group  internal1  internal2  comment  (8 fields)
//! ```
//!
//! Any other field count past the mandatory four leaves the optional values
//! at their defaults.

use crate::constants::*;
use crate::error::{CtfError, FieldError, Result};
use crate::models::{LaueGroup, Phase};
use crate::numeric::{parse_integer, parse_triplet};
use crate::source::{Line, LineCursor};
use tracing::{debug, trace};

/// Read `count` phase rows from the cursor, numbering them from 1
///
/// The count is taken from the file, so nothing is reserved up front; a
/// bogus count ends as [`CtfError::TruncatedPhaseTable`] at end of input.
pub fn parse_phases(cursor: &mut LineCursor<'_>, count: u32) -> Result<Vec<Phase>> {
    let mut phases = Vec::new();

    for index in 1..=count {
        let line = cursor
            .next_line()?
            .ok_or(CtfError::TruncatedPhaseTable {
                declared: count,
                found: index - 1,
            })?;

        // Phase indices are positional and never read from the row
        let phase = parse_phase_line(&line, index)?;
        trace!(index, name = %phase.name, "parsed phase row");
        phases.push(phase);
    }

    debug!("Parsed {} phase rows", phases.len());
    Ok(phases)
}

/// Parse one phase row already stripped of surrounding whitespace
pub fn parse_phase_row(text: &str, index: u32) -> std::result::Result<Phase, FieldError> {
    let fields: Vec<&str> = text.split(CTF_DELIMITER).collect();
    if fields.len() < PHASE_MANDATORY_FIELDS {
        return Err(FieldError::MissingFields {
            what: "phase row",
            expected: PHASE_MANDATORY_FIELDS,
            found: fields.len(),
        });
    }

    let lattice_constants = parse_triplet(fields[0])?;
    let lattice_angles = parse_triplet(fields[1])?;
    let name = fields[2].trim().to_string();
    let laue_group = LaueGroup::try_from(parse_integer(fields[3])?)?;

    let mut phase = Phase {
        index,
        lattice_constants,
        lattice_angles,
        name,
        laue_group,
        space_group: 0,
        comment: String::new(),
        internal1: String::new(),
        internal2: String::new(),
    };

    match fields.as_slice() {
        [_, _, _, _, comment] => {
            phase.comment = comment.trim().to_string();
        }
        [_, _, _, _, space_group, internal1, internal2, comment] => {
            phase.space_group = parse_space_group(space_group)?;
            phase.internal1 = internal1.trim().to_string();
            phase.internal2 = internal2.trim().to_string();
            phase.comment = comment.trim().to_string();
        }
        _ => {}
    }

    Ok(phase)
}

/// An empty space group field means "not recorded"
fn parse_space_group(text: &str) -> std::result::Result<i64, FieldError> {
    if text.trim().is_empty() {
        Ok(0)
    } else {
        parse_integer(text)
    }
}

/// Parse one cursor line as a phase row, attaching its line number to failures
pub fn parse_phase_line(line: &Line, index: u32) -> Result<Phase> {
    parse_phase_row(&line.text, index)
        .map_err(|source| CtfError::invalid_format(line.number, line.text.clone(), source))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NICKEL_ROW: &str = "3.52;3.52;3.52\t90;90;90\tNickel\t11\t225\t\t\tFCC Nickel";
    const IRON_ROW: &str = "2.87;2.87;2.87\t90;90;90\tIron\t11\t0\t\t\tBCC Iron";

    #[test]
    fn test_long_form_row() {
        let phase = parse_phase_row(NICKEL_ROW, 1).unwrap();

        assert_eq!(phase.index, 1);
        assert_eq!(phase.lattice_constants, [3.52, 3.52, 3.52]);
        assert_eq!(phase.lattice_angles, [90.0, 90.0, 90.0]);
        assert_eq!(phase.name, "Nickel");
        assert_eq!(phase.laue_group, LaueGroup::CubicHigh);
        assert_eq!(phase.space_group, 225);
        assert_eq!(phase.internal1, "");
        assert_eq!(phase.internal2, "");
        assert_eq!(phase.comment, "FCC Nickel");
    }

    #[test]
    fn test_long_form_populates_internal_fields() {
        let row = "3,21;3,21;5,21\t90;90;120\tMagnesium\t9\t194\t5000\t20\tHCP Mg";
        let phase = parse_phase_row(row, 3).unwrap();

        assert_eq!(phase.lattice_constants, [3.21, 3.21, 5.21]);
        assert_eq!(phase.laue_group, LaueGroup::HexagonalHigh);
        assert_eq!(phase.space_group, 194);
        assert_eq!(phase.internal1, "5000");
        assert_eq!(phase.internal2, "20");
        assert_eq!(phase.comment, "HCP Mg");
    }

    #[test]
    fn test_short_form_row() {
        let row = "4.05;4.05;4.05\t90;90;90\tAluminium\t11\tmade by hand";
        let phase = parse_phase_row(row, 2).unwrap();

        assert_eq!(phase.comment, "made by hand");
        assert_eq!(phase.space_group, 0);
        assert_eq!(phase.internal1, "");
        assert_eq!(phase.internal2, "");
    }

    #[test]
    fn test_other_field_counts_use_defaults() {
        for row in [
            "1;1;1\t90;90;90\tA\t1",
            "1;1;1\t90;90;90\tA\t1\t225\tx",
            "1;1;1\t90;90;90\tA\t1\t225\tx\ty",
            "1;1;1\t90;90;90\tA\t1\t225\tx\ty\tz\textra",
        ] {
            let phase = parse_phase_row(row, 1).unwrap();
            assert_eq!(phase.space_group, 0, "row {row:?}");
            assert_eq!(phase.comment, "");
            assert_eq!(phase.internal1, "");
            assert_eq!(phase.internal2, "");
        }
    }

    #[test]
    fn test_empty_space_group_defaults_to_zero() {
        let row = "1;1;1\t90;90;90\tA\t1\t\ti1\ti2\tc";
        let phase = parse_phase_row(row, 1).unwrap();
        assert_eq!(phase.space_group, 0);
        assert_eq!(phase.internal1, "i1");
        assert_eq!(phase.comment, "c");
    }

    #[test]
    fn test_invalid_space_group_fails() {
        let row = "1;1;1\t90;90;90\tA\t1\tP63\ti1\ti2\tc";
        assert!(matches!(
            parse_phase_row(row, 1),
            Err(FieldError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_too_few_fields_fails() {
        assert_eq!(
            parse_phase_row("1;1;1\t90;90;90\tA", 1),
            Err(FieldError::MissingFields {
                what: "phase row",
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_out_of_range_laue_group_fails() {
        let row = "1;1;1\t90;90;90\tA\t13\tcomment";
        assert_eq!(
            parse_phase_row(row, 1),
            Err(FieldError::UnknownLaueGroup { code: 13 })
        );
    }

    #[test]
    fn test_unknown_symmetry_code_is_accepted() {
        let phase = parse_phase_row("1;1;1\t90;90;90\tA\t12\tc", 1).unwrap();
        assert_eq!(phase.laue_group, LaueGroup::UnknownSymmetry);
    }

    #[test]
    fn test_parse_phases_continues_from_cursor() {
        let text = format!("{NICKEL_ROW}\n{IRON_ROW}\nEuler1\tEuler2\n");
        let mut cursor = LineCursor::from_text(&text);

        let phases = parse_phases(&mut cursor, 2).unwrap();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].index, 1);
        assert_eq!(phases[1].index, 2);
        assert_eq!(phases[1].name, "Iron");
        assert_eq!(phases[1].space_group, 0);
        assert_eq!(phases[1].comment, "BCC Iron");

        // The body line is left for the caller
        assert_eq!(cursor.next_line().unwrap().unwrap().text, "Euler1\tEuler2");
    }

    #[test]
    fn test_index_ignores_numeric_fields_in_row() {
        let text = "1;1;1\t90;90;90\t7\t11\t7\t7\t7\t7\n";
        let mut cursor = LineCursor::from_text(text);
        let phases = parse_phases(&mut cursor, 1).unwrap();
        assert_eq!(phases[0].index, 1);
    }

    #[test]
    fn test_truncated_table() {
        let mut cursor = LineCursor::from_text(NICKEL_ROW);
        let err = parse_phases(&mut cursor, 3).unwrap_err();
        assert!(matches!(
            err,
            CtfError::TruncatedPhaseTable {
                declared: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn test_huge_declared_count_is_truncated_not_reserved() {
        let mut cursor = LineCursor::from_text(NICKEL_ROW);
        let err = parse_phases(&mut cursor, u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            CtfError::TruncatedPhaseTable {
                declared: u32::MAX,
                found: 1
            }
        ));
    }

    #[test]
    fn test_row_error_carries_line_number() {
        let text = format!("{NICKEL_ROW}\nbad row\n");
        let mut cursor = LineCursor::from_text(&text);
        let err = parse_phases(&mut cursor, 2).unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_zero_phases_reads_nothing() {
        let mut cursor = LineCursor::from_text(NICKEL_ROW);
        assert!(parse_phases(&mut cursor, 0).unwrap().is_empty());
        assert_eq!(cursor.consumed(), 0);
    }

    #[test]
    fn test_parse_phase_line() {
        let line = Line {
            number: 12,
            text: "x;y;z\t90;90;90\tA\t1".to_string(),
        };
        let err = parse_phase_line(&line, 1).unwrap_err();
        assert_eq!(err.line(), Some(12));
    }
}
