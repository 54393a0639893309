//! Persistable universe rows

use super::area::AreaTag;
use crate::parser::Position;
use crate::schema::{
    TableSchema, CELESTIALS, CONSTELLATIONS, REGIONS, SOLARSYSTEMS, SOLARSYSTEM_CONNECTIONS,
    STARGATES, STATIONS,
};
use crate::writer::{SqlValue, TableRow};

/// Celestial group discriminants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelestialGroup {
    Star,
    Planet,
    Moon,
    AsteroidBelt,
}

impl CelestialGroup {
    pub fn group_id(self) -> i64 {
        match self {
            CelestialGroup::Star => 6,
            CelestialGroup::Planet => 7,
            CelestialGroup::Moon => 8,
            CelestialGroup::AsteroidBelt => 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionRow {
    pub id: i64,
    pub name: String,
    pub area: AreaTag,
}

impl TableRow for RegionRow {
    fn schema() -> &'static TableSchema {
        &REGIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.name.as_str().into(),
            self.area.as_str().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationRow {
    pub id: i64,
    pub region_id: i64,
    pub name: String,
    pub area: AreaTag,
}

impl TableRow for ConstellationRow {
    fn schema() -> &'static TableSchema {
        &CONSTELLATIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.region_id.into(),
            self.name.as_str().into(),
            self.area.as_str().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolarsystemRow {
    pub id: i64,
    pub constellation_id: i64,
    pub region_id: i64,
    pub name: String,
    pub area: AreaTag,
    pub security: f64,
    pub position: Position,
    pub has_jove_observatory: bool,
}

impl TableRow for SolarsystemRow {
    fn schema() -> &'static TableSchema {
        &SOLARSYSTEMS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.constellation_id.into(),
            self.region_id.into(),
            self.name.as_str().into(),
            self.area.as_str().into(),
            self.security.into(),
            self.position.x.into(),
            self.position.y.into(),
            self.position.z.into(),
            self.has_jove_observatory.into(),
        ]
    }
}

/// Star, planet, moon or asteroid belt
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialRow {
    pub id: i64,
    pub solarsystem_id: i64,
    pub constellation_id: i64,
    pub region_id: i64,
    pub name: String,
    pub type_id: Option<i64>,
    pub group: CelestialGroup,
    /// Planet id for moons and belts
    pub parent_id: Option<i64>,
}

impl TableRow for CelestialRow {
    fn schema() -> &'static TableSchema {
        &CELESTIALS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.solarsystem_id.into(),
            self.constellation_id.into(),
            self.region_id.into(),
            self.name.as_str().into(),
            self.type_id.into(),
            self.group.group_id().into(),
            self.parent_id.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationRow {
    pub id: i64,
    pub solarsystem_id: i64,
    pub constellation_id: i64,
    pub region_id: i64,
    pub name: String,
    pub type_id: i64,
    /// Orbited planet or moon
    pub parent_id: Option<i64>,
}

impl TableRow for StationRow {
    fn schema() -> &'static TableSchema {
        &STATIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.solarsystem_id.into(),
            self.constellation_id.into(),
            self.region_id.into(),
            self.name.as_str().into(),
            self.type_id.into(),
            self.parent_id.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StargateRow {
    pub id: i64,
    pub solarsystem_id: i64,
    /// May point at a gate not written yet
    pub destination_id: i64,
    pub constellation_id: i64,
    pub region_id: i64,
    pub name: Option<String>,
    pub position: Position,
    pub type_id: i64,
}

impl TableRow for StargateRow {
    fn schema() -> &'static TableSchema {
        &STARGATES
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.solarsystem_id.into(),
            self.destination_id.into(),
            self.constellation_id.into(),
            self.region_id.into(),
            self.name.as_deref().into(),
            self.position.x.into(),
            self.position.y.into(),
            self.position.z.into(),
            self.type_id.into(),
        ]
    }
}

/// Denormalized gate-to-gate edge
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionRow {
    pub from_stargate_id: i64,
    pub from_solarsystem_id: i64,
    pub from_constellation_id: i64,
    pub from_region_id: i64,
    pub to_stargate_id: i64,
    pub to_solarsystem_id: Option<i64>,
    pub to_constellation_id: Option<i64>,
    pub to_region_id: Option<i64>,
    pub is_regional: bool,
}

impl TableRow for ConnectionRow {
    fn schema() -> &'static TableSchema {
        &SOLARSYSTEM_CONNECTIONS
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.from_stargate_id.into(),
            self.from_solarsystem_id.into(),
            self.from_constellation_id.into(),
            self.from_region_id.into(),
            self.to_stargate_id.into(),
            self.to_solarsystem_id.into(),
            self.to_constellation_id.into(),
            self.to_region_id.into(),
            self.is_regional.into(),
        ]
    }
}
