//! Flattening of a parsed [`Header`] into the final metadata sequence.

use crate::constants::{KEY_PREFIX, LAUE_CLASS_NAMES, UNKNOWN_CLASS_NAME, phase_keys, units};
use crate::models::{Header, MetadataEntry, MetadataValue, Phase};

/// Resolves the crystal class name shown in each phase's annotation
pub trait ClassNameLookup {
    fn class_name(&self, phase_index: u32) -> Option<&str>;
}

/// Default lookup over the twelve Laue class display names
#[derive(Debug, Clone, Copy, Default)]
pub struct LaueClassTable;

impl ClassNameLookup for LaueClassTable {
    fn class_name(&self, phase_index: u32) -> Option<&str> {
        LAUE_CLASS_NAMES
            .iter()
            .find(|(code, _)| *code == phase_index)
            .map(|(_, name)| *name)
    }
}

impl<F> ClassNameLookup for F
where
    F: Fn(u32) -> Option<&'static str>,
{
    fn class_name(&self, phase_index: u32) -> Option<&str> {
        self(phase_index)
    }
}

/// Header entries followed by eight entries per phase, in ascending phase order.
///
/// Unknown entries stay on the header and are not part of the sequence.
pub fn emit_metadata(header: &Header, lookup: &dyn ClassNameLookup) -> Vec<MetadataEntry> {
    let mut entries = Vec::with_capacity(header.entries.len() + header.phases.len() * 8);
    entries.extend(header.entries.iter().cloned());

    for phase in header.phases.values() {
        entries.extend(phase_entries(phase, lookup));
    }

    entries
}

fn phase_entries(phase: &Phase, lookup: &dyn ClassNameLookup) -> Vec<MetadataEntry> {
    let class_name = lookup
        .class_name(phase.index)
        .unwrap_or(UNKNOWN_CLASS_NAME);
    let annotation = format!("Phase {}, {}", phase.index, class_name);
    let key = |name: &str| format!("{}/Phases/Phase {}/{}", KEY_PREFIX, phase.index, name);
    let entry = |name: &str, value: MetadataValue, unit: Option<&str>| {
        MetadataEntry::new(key(name), value, Some(annotation.clone()), unit)
    };

    vec![
        entry(phase_keys::LAUE_GROUP, phase.laue_group.name().into(), None),
        entry(phase_keys::INTERNAL1, phase.internal1.clone().into(), None),
        entry(phase_keys::INTERNAL2, phase.internal2.clone().into(), None),
        entry(
            phase_keys::LATTICE_ANGLES,
            phase.lattice_angles.into(),
            Some(units::DEGREES),
        ),
        entry(
            phase_keys::LATTICE_CONSTANTS,
            phase.lattice_constants.into(),
            Some(units::ANGSTROM),
        ),
        entry(phase_keys::NAME, phase.name.clone().into(), None),
        entry(phase_keys::SPACE_GROUP, phase.space_group.into(), None),
        entry(phase_keys::COMMENT, phase.comment.clone().into(), None),
    ]
}
