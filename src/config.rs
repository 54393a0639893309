//! Run configuration

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Rows per write batch when none is given
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Rows between progress updates within a stage
pub const PROGRESS_STEP: u64 = 1000;

/// Record file names inside an SDE export directory
pub mod files {
    pub const REGIONS: &str = "mapRegions.jsonl";
    pub const CONSTELLATIONS: &str = "mapConstellations.jsonl";
    pub const SOLARSYSTEMS: &str = "mapSolarSystems.jsonl";
    pub const STARS: &str = "mapStars.jsonl";
    pub const PLANETS: &str = "mapPlanets.jsonl";
    pub const MOONS: &str = "mapMoons.jsonl";
    pub const ASTEROID_BELTS: &str = "mapAsteroidBelts.jsonl";
    pub const STATIONS: &str = "npcStations.jsonl";
    pub const STARGATES: &str = "mapStargates.jsonl";
    pub const CORPORATIONS: &str = "npcCorporations.jsonl";
    pub const STATION_OPERATIONS: &str = "stationOperations.jsonl";

    pub const ALL: [&str; 11] = [
        REGIONS,
        CONSTELLATIONS,
        SOLARSYSTEMS,
        STARS,
        PLANETS,
        MOONS,
        ASTEROID_BELTS,
        STATIONS,
        STARGATES,
        CORPORATIONS,
        STATION_OPERATIONS,
    ];
}

/// Everything one seeding run needs
#[derive(Debug, Clone, PartialEq)]
pub struct SeedConfig {
    /// Directory holding the JSONL export
    pub input_dir: PathBuf,
    /// SQLite database, created if missing and never truncated
    pub database: PathBuf,
    pub batch_size: usize,
}

impl SeedConfig {
    pub fn new(input_dir: impl Into<PathBuf>, database: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            database: database.into(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("Batch size must be at least 1");
        }
        if !self.input_dir.is_dir() {
            bail!("Input directory not found: {:?}", self.input_dir);
        }
        Ok(())
    }
}
