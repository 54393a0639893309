//! Record-to-row transforms.
//!
//! Each function maps one source record to a row, or to `None` when a
//! required ancestor is missing from the caches. Transforms that feed later
//! stages also record the record's projection in the cache they are given.

use super::area::classify;
use super::lookup::{MoonInfo, PlanetInfo, StationLookups, SystemInfo, UniverseLookups};
use super::names::{belt_name, moon_name, planet_name, star_name, stargate_name, station_name};
use super::observatories::has_jove_observatory;
use super::rows::*;
use crate::parser::{
    ConstellationRecord, OrbitalRecord, PlanetRecord, RegionRecord, SolarsystemRecord,
    StarRecord, StargateRecord, StationRecord,
};

const UNKNOWN_CORPORATION: &str = "Unknown Corporation";

pub fn region(rec: RegionRecord, lookups: &mut UniverseLookups) -> Option<RegionRow> {
    lookups.regions.insert(rec.id);

    Some(RegionRow {
        id: rec.id,
        name: rec.name.into_en(),
        area: classify(rec.id),
    })
}

pub fn constellation(
    rec: ConstellationRecord,
    lookups: &mut UniverseLookups,
) -> Option<ConstellationRow> {
    if !lookups.regions.contains(&rec.region_id) {
        return None;
    }
    lookups.constellations.insert(rec.id, rec.region_id);

    Some(ConstellationRow {
        id: rec.id,
        region_id: rec.region_id,
        name: rec.name.into_en(),
        area: classify(rec.id),
    })
}

pub fn solarsystem(
    rec: SolarsystemRecord,
    lookups: &mut UniverseLookups,
) -> Option<SolarsystemRow> {
    // The constellation must be known and belong to the system's region
    if lookups.constellations.get(&rec.constellation_id) != Some(&rec.region_id) {
        return None;
    }

    let name = rec.name.into_en();
    lookups.systems.insert(
        rec.id,
        SystemInfo {
            constellation_id: rec.constellation_id,
            region_id: rec.region_id,
            name: name.clone(),
        },
    );

    Some(SolarsystemRow {
        id: rec.id,
        constellation_id: rec.constellation_id,
        region_id: rec.region_id,
        has_jove_observatory: has_jove_observatory(&name),
        name,
        area: classify(rec.id),
        security: rec.security_status,
        position: rec.position,
    })
}

pub fn star(rec: StarRecord, lookups: &UniverseLookups) -> Option<CelestialRow> {
    let sys = lookups.systems.get(&rec.solar_system_id)?;

    Some(CelestialRow {
        id: rec.id,
        solarsystem_id: rec.solar_system_id,
        constellation_id: sys.constellation_id,
        region_id: sys.region_id,
        name: star_name(&sys.name),
        type_id: Some(rec.type_id),
        group: CelestialGroup::Star,
        parent_id: None,
    })
}

pub fn planet(rec: PlanetRecord, lookups: &mut UniverseLookups) -> Option<CelestialRow> {
    let sys = lookups.systems.get(&rec.solar_system_id)?;

    let row = CelestialRow {
        id: rec.id,
        solarsystem_id: rec.solar_system_id,
        constellation_id: sys.constellation_id,
        region_id: sys.region_id,
        name: planet_name(&sys.name, rec.celestial_index),
        type_id: Some(rec.type_id),
        group: CelestialGroup::Planet,
        parent_id: None,
    };

    lookups.planets.insert(
        rec.id,
        PlanetInfo {
            celestial_index: rec.celestial_index,
        },
    );
    Some(row)
}

pub fn moon(rec: OrbitalRecord, lookups: &mut UniverseLookups) -> Option<CelestialRow> {
    let sys = lookups.systems.get(&rec.solar_system_id)?;
    let planet = lookups.planet_name(sys, rec.orbit_id)?;

    let row = CelestialRow {
        id: rec.id,
        solarsystem_id: rec.solar_system_id,
        constellation_id: sys.constellation_id,
        region_id: sys.region_id,
        name: moon_name(&planet, rec.orbit_index),
        type_id: rec.type_id,
        group: CelestialGroup::Moon,
        parent_id: Some(rec.orbit_id),
    };

    lookups.moons.insert(
        rec.id,
        MoonInfo {
            orbit_id: rec.orbit_id,
            orbit_index: rec.orbit_index,
        },
    );
    Some(row)
}

pub fn asteroid_belt(rec: OrbitalRecord, lookups: &UniverseLookups) -> Option<CelestialRow> {
    let sys = lookups.systems.get(&rec.solar_system_id)?;
    let planet = lookups.planet_name(sys, rec.orbit_id)?;

    Some(CelestialRow {
        id: rec.id,
        solarsystem_id: rec.solar_system_id,
        constellation_id: sys.constellation_id,
        region_id: sys.region_id,
        name: belt_name(&planet, rec.orbit_index),
        type_id: None,
        group: CelestialGroup::AsteroidBelt,
        parent_id: Some(rec.orbit_id),
    })
}

/// Stations need only their system; an unresolvable orbit leaves the
/// station unparented rather than dropping it.
pub fn station(
    rec: StationRecord,
    lookups: &UniverseLookups,
    names: &StationLookups,
) -> Option<StationRow> {
    let sys = lookups.systems.get(&rec.solar_system_id)?;

    let orbit_name = lookups
        .planet_name(sys, rec.orbit_id)
        .or_else(|| lookups.moon_name(sys, rec.orbit_id));
    let parent_id = orbit_name.as_ref().map(|_| rec.orbit_id);

    let corp_name = names
        .corporations
        .get(&rec.owner_id)
        .map(String::as_str)
        .unwrap_or(UNKNOWN_CORPORATION);

    let operation_name = if rec.use_operation_name {
        rec.operation_id
            .and_then(|id| names.operations.get(&id))
            .map(String::as_str)
    } else {
        None
    };

    Some(StationRow {
        id: rec.id,
        solarsystem_id: rec.solar_system_id,
        constellation_id: sys.constellation_id,
        region_id: sys.region_id,
        name: station_name(
            orbit_name.as_deref(),
            corp_name,
            operation_name,
            rec.use_operation_name,
        ),
        type_id: rec.type_id,
        parent_id,
    })
}

pub fn stargate(rec: StargateRecord, lookups: &UniverseLookups) -> Option<StargateRow> {
    let sys = lookups.systems.get(&rec.solar_system_id)?;
    let name = lookups
        .systems
        .get(&rec.destination.solar_system_id)
        .map(|dest| stargate_name(&dest.name));

    Some(StargateRow {
        id: rec.id,
        solarsystem_id: rec.solar_system_id,
        destination_id: rec.destination.stargate_id,
        constellation_id: sys.constellation_id,
        region_id: sys.region_id,
        name,
        position: rec.position,
        type_id: rec.type_id,
    })
}

/// Edge for one gate. An unresolved destination leaves the far side null
/// and counts as crossing a region border.
pub fn connection(from: &StargateRow, to: Option<&StargateRow>) -> ConnectionRow {
    ConnectionRow {
        from_stargate_id: from.id,
        from_solarsystem_id: from.solarsystem_id,
        from_constellation_id: from.constellation_id,
        from_region_id: from.region_id,
        to_stargate_id: from.destination_id,
        to_solarsystem_id: to.map(|t| t.solarsystem_id),
        to_constellation_id: to.map(|t| t.constellation_id),
        to_region_id: to.map(|t| t.region_id),
        is_regional: to.map_or(true, |t| t.region_id != from.region_id),
    }
}
