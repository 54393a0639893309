//! Table schema definitions for the universe graph

use super::types::*;

// =============================================================================
// Containment hierarchy
// =============================================================================

pub static REGIONS: TableSchema = TableSchema {
    name: "regions",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::required("type", ColumnType::Text),
    ],
    unique_keys: &["id"],
    foreign_keys: &[],
    indexes: &["type"],
};

pub static CONSTELLATIONS: TableSchema = TableSchema {
    name: "constellations",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("region_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::required("type", ColumnType::Text),
    ],
    unique_keys: &["id"],
    foreign_keys: &[ForeignKey::new("region_id", "regions")],
    indexes: &[],
};

pub static SOLARSYSTEMS: TableSchema = TableSchema {
    name: "solarsystems",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("constellation_id", ColumnType::Integer),
        Column::required("region_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::required("type", ColumnType::Text),
        Column::required("security", ColumnType::Real),
        Column::required("pos_x", ColumnType::Real),
        Column::required("pos_y", ColumnType::Real),
        Column::required("pos_z", ColumnType::Real),
        Column::required("has_jove_observatory", ColumnType::Boolean),
    ],
    unique_keys: &["id"],
    foreign_keys: &[
        ForeignKey::new("constellation_id", "constellations"),
        ForeignKey::new("region_id", "regions"),
    ],
    indexes: &["name"],
};

// =============================================================================
// Bodies inside a solar system
// =============================================================================

pub static CELESTIALS: TableSchema = TableSchema {
    name: "celestials",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("solarsystem_id", ColumnType::Integer),
        Column::required("constellation_id", ColumnType::Integer),
        Column::required("region_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::new("type_id", ColumnType::Integer),
        Column::required("group_id", ColumnType::Integer),
        Column::new("parent_id", ColumnType::Integer),
    ],
    unique_keys: &["id"],
    foreign_keys: &[
        ForeignKey::new("solarsystem_id", "solarsystems"),
        ForeignKey::new("parent_id", "celestials"),
    ],
    indexes: &["group_id"],
};

pub static STATIONS: TableSchema = TableSchema {
    name: "stations",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("solarsystem_id", ColumnType::Integer),
        Column::required("constellation_id", ColumnType::Integer),
        Column::required("region_id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::required("type_id", ColumnType::Integer),
        Column::new("parent_id", ColumnType::Integer),
    ],
    unique_keys: &["id"],
    foreign_keys: &[
        ForeignKey::new("solarsystem_id", "solarsystems"),
        ForeignKey::new("parent_id", "celestials"),
    ],
    indexes: &[],
};

// =============================================================================
// Stargate graph
// =============================================================================

pub static STARGATES: TableSchema = TableSchema {
    name: "stargates",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("solarsystem_id", ColumnType::Integer),
        Column::required("destination_id", ColumnType::Integer),
        Column::required("constellation_id", ColumnType::Integer),
        Column::required("region_id", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
        Column::required("position_x", ColumnType::Real),
        Column::required("position_y", ColumnType::Real),
        Column::required("position_z", ColumnType::Real),
        Column::required("type_id", ColumnType::Integer),
    ],
    unique_keys: &["id"],
    foreign_keys: &[
        ForeignKey::new("solarsystem_id", "solarsystems"),
        // Self-referential: written with enforcement suspended
        ForeignKey::new("destination_id", "stargates"),
    ],
    indexes: &[],
};

pub static SOLARSYSTEM_CONNECTIONS: TableSchema = TableSchema {
    name: "solarsystem_connections",
    columns: &[
        Column::required("from_stargate_id", ColumnType::Integer),
        Column::required("from_solarsystem_id", ColumnType::Integer),
        Column::required("from_constellation_id", ColumnType::Integer),
        Column::required("from_region_id", ColumnType::Integer),
        Column::required("to_stargate_id", ColumnType::Integer),
        Column::new("to_solarsystem_id", ColumnType::Integer),
        Column::new("to_constellation_id", ColumnType::Integer),
        Column::new("to_region_id", ColumnType::Integer),
        Column::required("is_regional", ColumnType::Boolean),
    ],
    unique_keys: &["from_stargate_id"],
    foreign_keys: &[ForeignKey::new("from_stargate_id", "stargates")],
    indexes: &["from_solarsystem_id", "to_solarsystem_id"],
};

// =============================================================================
// Schema Registry
// =============================================================================

/// All table schemas in dependency order
pub static ALL_TABLES: &[&TableSchema] = &[
    &REGIONS,
    &CONSTELLATIONS,
    &SOLARSYSTEMS,
    &CELESTIALS,
    &STATIONS,
    &STARGATES,
    &SOLARSYSTEM_CONNECTIONS,
];
