//! Keywords, markers, units and lookup tables for the CTF header grammar.

// =============================================================================
// Line structure
// =============================================================================

/// Field separator for every header and phase line
pub const CTF_DELIMITER: char = '\t';

/// Separator between the members of a lattice triplet
pub const TRIPLET_DELIMITER: char = ';';

/// Prefix of every metadata key produced from a CTF file
pub const KEY_PREFIX: &str = "SOURCE";

// =============================================================================
// Line markers
// =============================================================================

/// File-type banner, written with or without a leading colon
pub const CTF_CHANNEL_TEXT_FILE: &str = "Channel Text File";
pub const CTF_COLON_CHANNEL_TEXT_FILE: &str = ":Channel Text File";

pub const CTF_PRJ: &str = "Prj";
pub const CTF_PHASES: &str = "Phases";

/// Literal that opens the instrument line packing several values at fixed offsets
pub const CTF_LONG_TEXT: &str = "Euler angles refer to Sample Coordinate system (CS0)!";

// =============================================================================
// Keywords
// =============================================================================

pub const CTF_MAG: &str = "Mag";
pub const CTF_COVERAGE: &str = "Coverage";
pub const CTF_DEVICE: &str = "Device";
pub const CTF_KV: &str = "KV";
pub const CTF_TILT_ANGLE: &str = "TiltAngle";
pub const CTF_TILT_AXIS: &str = "TiltAxis";

pub const CTF_AUTHOR: &str = "Author";
pub const CTF_JOB_MODE: &str = "JobMode";
pub const CTF_X_CELLS: &str = "XCells";
pub const CTF_Y_CELLS: &str = "YCells";
pub const CTF_Z_CELLS: &str = "ZCells";
pub const CTF_X_STEP: &str = "XStep";
pub const CTF_Y_STEP: &str = "YStep";
pub const CTF_Z_STEP: &str = "ZStep";
pub const CTF_ACQ_E1: &str = "AcqE1";
pub const CTF_ACQ_E2: &str = "AcqE2";
pub const CTF_ACQ_E3: &str = "AcqE3";
pub const CTF_EULER: &str = "Euler";

/// Token offsets of (Mag, Coverage, Device, KV, TiltAngle, TiltAxis) on the long-text line
pub const LONG_TEXT_OFFSETS: [usize; 6] = [2, 4, 6, 8, 10, 12];

/// Minimum token count of the long-text line
pub const LONG_TEXT_MIN_TOKENS: usize = 13;

// =============================================================================
// Phase table
// =============================================================================

/// Constants, angles, name and Laue group are required in every row
pub const PHASE_MANDATORY_FIELDS: usize = 4;

/// Row shape carrying only a trailing comment
pub const PHASE_SHORT_FORM_FIELDS: usize = 5;

/// Row shape carrying space group, two internal fields and a comment
pub const PHASE_LONG_FORM_FIELDS: usize = 8;

/// Per-phase keys, in emission order
pub mod phase_keys {
    pub const LAUE_GROUP: &str = "LaueGroup";
    pub const INTERNAL1: &str = "Internal1";
    pub const INTERNAL2: &str = "Internal2";
    pub const LATTICE_ANGLES: &str = "LatticeAngles";
    pub const LATTICE_CONSTANTS: &str = "LatticeConstants";
    pub const NAME: &str = "Name";
    pub const SPACE_GROUP: &str = "SpaceGroup";
    pub const COMMENT: &str = "Comment";
}

// =============================================================================
// Units
// =============================================================================

pub mod units {
    pub const MICRONS: &str = "µm";
    pub const DEGREES: &str = "°";
    pub const ANGSTROM: &str = "Å";
}

// =============================================================================
// Laue classes
// =============================================================================

/// Display names of the Laue classes, indexed by code 1..=12
pub const LAUE_CLASS_NAMES: [(u32, &str); 12] = [
    (1, "Triclinic -1"),
    (2, "Monoclinic 2/m"),
    (3, "Orthorhombic mmm"),
    (4, "Tetragonal-Low 4/m"),
    (5, "Tetragonal-High 4/mmm"),
    (6, "Trigonal-Low -3"),
    (7, "Trigonal-High -3m"),
    (8, "Hexagonal-Low 6/m"),
    (9, "Hexagonal-High 6/mmm"),
    (10, "Cubic-Low m-3"),
    (11, "Cubic-High m-3m"),
    (12, "Unknown Symmetry"),
];

/// Class name used when the lookup has no entry
pub const UNKNOWN_CLASS_NAME: &str = "Unknown";

// =============================================================================
// File discovery
// =============================================================================

/// Extensions accepted by default (compared case-insensitively, without the dot)
pub const DEFAULT_EXTENSIONS: &[&str] = &["ctf"];

/// Config file name inside the user config directory
pub const CONFIG_DIR_NAME: &str = "ctf-header";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
