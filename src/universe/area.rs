//! Universe area classification by id range.
//!
//! Region, constellation and solar-system ids are allocated in disjoint
//! million-wide blocks per kind of space. Anything outside the known blocks
//! is treated as regular space.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaTag {
    Eve,
    Wormhole,
    Abyssal,
    Void,
    Hidden,
}

impl AreaTag {
    pub fn as_str(self) -> &'static str {
        match self {
            AreaTag::Eve => "eve",
            AreaTag::Wormhole => "wh",
            AreaTag::Abyssal => "abyssal",
            AreaTag::Void => "void",
            AreaTag::Hidden => "hidden",
        }
    }
}

impl fmt::Display for AreaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open `[start, end)` id ranges, one row per hierarchy level
const AREA_RANGES: &[(i64, i64, AreaTag)] = &[
    // Regions
    (10_000_000, 11_000_000, AreaTag::Eve),
    (11_000_000, 12_000_000, AreaTag::Wormhole),
    (12_000_000, 13_000_000, AreaTag::Abyssal),
    (14_000_000, 15_000_000, AreaTag::Void),
    (19_000_000, 20_000_000, AreaTag::Hidden),
    // Constellations
    (20_000_000, 21_000_000, AreaTag::Eve),
    (21_000_000, 22_000_000, AreaTag::Wormhole),
    (22_000_000, 23_000_000, AreaTag::Abyssal),
    (24_000_000, 25_000_000, AreaTag::Void),
    (26_000_000, 27_000_000, AreaTag::Hidden),
    // Solar systems
    (30_000_000, 31_000_000, AreaTag::Eve),
    (31_000_000, 32_000_000, AreaTag::Wormhole),
    (32_000_000, 33_000_000, AreaTag::Abyssal),
    (34_000_000, 35_000_000, AreaTag::Void),
    (36_000_000, 37_000_000, AreaTag::Hidden),
];

/// Classify a region, constellation or solar-system id
pub fn classify(id: i64) -> AreaTag {
    AREA_RANGES
        .iter()
        .find(|(start, end, _)| (*start..*end).contains(&id))
        .map(|(_, _, tag)| *tag)
        .unwrap_or(AreaTag::Eve)
}
