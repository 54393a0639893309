//! Typed SDE records.
//!
//! Only the fields the universe pipeline reads are declared; serde ignores
//! the rest of each line.

use serde::Deserialize;

/// Localized text object; only the English value is kept
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Localized {
    #[serde(default)]
    pub en: Option<String>,
}

impl Localized {
    pub fn into_en(self) -> String {
        self.en.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    #[serde(rename = "_key")]
    pub id: i64,
    #[serde(default)]
    pub name: Localized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConstellationRecord {
    #[serde(rename = "_key")]
    pub id: i64,
    #[serde(rename = "regionID")]
    pub region_id: i64,
    #[serde(default)]
    pub name: Localized,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarsystemRecord {
    #[serde(rename = "_key")]
    pub id: i64,
    #[serde(rename = "constellationID")]
    pub constellation_id: i64,
    #[serde(rename = "regionID")]
    pub region_id: i64,
    #[serde(default)]
    pub name: Localized,
    pub security_status: f64,
    pub position: Position,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StarRecord {
    #[serde(rename = "_key")]
    pub id: i64,
    #[serde(rename = "solarSystemID")]
    pub solar_system_id: i64,
    #[serde(rename = "typeID")]
    pub type_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetRecord {
    #[serde(rename = "_key")]
    pub id: i64,
    #[serde(rename = "solarSystemID")]
    pub solar_system_id: i64,
    pub celestial_index: u32,
    #[serde(rename = "typeID")]
    pub type_id: i64,
}

/// Moons and asteroid belts share this shape; belts carry no type
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalRecord {
    #[serde(rename = "_key")]
    pub id: i64,
    #[serde(rename = "solarSystemID")]
    pub solar_system_id: i64,
    #[serde(rename = "orbitID")]
    pub orbit_id: i64,
    pub orbit_index: u32,
    #[serde(rename = "typeID", default)]
    pub type_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    #[serde(rename = "_key")]
    pub id: i64,
    #[serde(rename = "solarSystemID")]
    pub solar_system_id: i64,
    #[serde(rename = "orbitID")]
    pub orbit_id: i64,
    #[serde(rename = "ownerID")]
    pub owner_id: i64,
    #[serde(rename = "operationID", default)]
    pub operation_id: Option<i64>,
    #[serde(default)]
    pub use_operation_name: bool,
    #[serde(rename = "typeID")]
    pub type_id: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StargateDestination {
    #[serde(rename = "stargateID")]
    pub stargate_id: i64,
    #[serde(rename = "solarSystemID")]
    pub solar_system_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StargateRecord {
    #[serde(rename = "_key")]
    pub id: i64,
    #[serde(rename = "solarSystemID")]
    pub solar_system_id: i64,
    #[serde(rename = "typeID")]
    pub type_id: i64,
    pub position: Position,
    pub destination: StargateDestination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorporationRecord {
    #[serde(rename = "_key")]
    pub id: i64,
    #[serde(default)]
    pub name: Localized,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationOperationRecord {
    #[serde(rename = "_key")]
    pub id: i64,
    #[serde(default)]
    pub operation_name: Localized,
}
