//! Minimal projections of already-ingested ancestors.
//!
//! Each stage records only the handful of fields its descendants need, so
//! memory grows with the number of parents and not with record size.

use rustc_hash::{FxHashMap, FxHashSet};

use super::names::{moon_name, planet_name};
use super::rows::StargateRow;

#[derive(Debug, Clone, PartialEq)]
pub struct SystemInfo {
    pub constellation_id: i64,
    pub region_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanetInfo {
    pub celestial_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoonInfo {
    /// Planet the moon orbits
    pub orbit_id: i64,
    pub orbit_index: u32,
}

/// Ancestor caches threaded from each stage into the next
#[derive(Debug, Default)]
pub struct UniverseLookups {
    pub regions: FxHashSet<i64>,
    /// constellation id -> region id
    pub constellations: FxHashMap<i64, i64>,
    pub systems: FxHashMap<i64, SystemInfo>,
    pub planets: FxHashMap<i64, PlanetInfo>,
    pub moons: FxHashMap<i64, MoonInfo>,
}

impl UniverseLookups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesized name of a planet, if both it and its system are known
    pub fn planet_name(&self, system: &SystemInfo, planet_id: i64) -> Option<String> {
        self.planets
            .get(&planet_id)
            .map(|p| planet_name(&system.name, p.celestial_index))
    }

    /// Synthesized name of a moon, resolved through its planet
    pub fn moon_name(&self, system: &SystemInfo, moon_id: i64) -> Option<String> {
        let moon = self.moons.get(&moon_id)?;
        let planet = self.planet_name(system, moon.orbit_id)?;
        Some(moon_name(&planet, moon.orbit_index))
    }
}

/// Station naming inputs that are not part of the universe hierarchy
#[derive(Debug, Default)]
pub struct StationLookups {
    pub corporations: FxHashMap<i64, String>,
    pub operations: FxHashMap<i64, String>,
}

/// Stargates of one run, indexed by id for destination resolution
#[derive(Debug, Default)]
pub struct StargateArena {
    gates: Vec<StargateRow>,
    index: FxHashMap<i64, usize>,
}

impl StargateArena {
    pub fn new(gates: Vec<StargateRow>) -> Self {
        let index = gates
            .iter()
            .enumerate()
            .map(|(slot, gate)| (gate.id, slot))
            .collect();
        Self { gates, index }
    }

    pub fn get(&self, id: i64) -> Option<&StargateRow> {
        self.index.get(&id).map(|&slot| &self.gates[slot])
    }

    /// The gate `gate` leads to, if it was written in the same run
    pub fn destination(&self, gate: &StargateRow) -> Option<&StargateRow> {
        self.get(gate.destination_id)
    }

    pub fn gates(&self) -> &[StargateRow] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}
