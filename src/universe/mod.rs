//! EVE universe hierarchy: classification, naming, transforms and the staged
//! seeding run that ties them to a store.

pub mod area;
pub mod lookup;
pub mod memory;
pub mod names;
pub mod observatories;
pub mod rows;
pub mod seeder;
pub mod transform;

pub use area::{classify, AreaTag};
pub use lookup::{StargateArena, StationLookups, UniverseLookups};
pub use memory::{MemoryRating, MemoryStats};
pub use rows::*;
pub use seeder::{SeedReport, Stage, StageReport, UniverseSeeder, UniverseStore};

use anyhow::Result;
use tracing::info;

use crate::config::SeedConfig;
use crate::parser::DirSource;
use crate::ui::Ui;
use crate::writer::SqliteStore;

/// Seed the universe tables of `config.database` from `config.input_dir`.
///
/// Existing rows are updated in place; a failed stage leaves everything
/// written by earlier stages committed.
pub fn seed_universe(config: &SeedConfig, ui: &mut impl Ui) -> Result<SeedReport> {
    config.validate()?;
    info!(
        input = ?config.input_dir,
        database = ?config.database,
        batch_size = config.batch_size,
        "Seeding universe"
    );

    let source = DirSource::new(&config.input_dir);
    let mut store = SqliteStore::open(&config.database)?;
    store.create_tables()?;

    let report = UniverseSeeder::new(&source, &mut store, ui, config.batch_size).run()?;
    store.finalize()?;

    info!(
        records = report.total(),
        orphans = report.orphans(),
        pruned = report.pruned_connections,
        "Universe seeded"
    );
    Ok(report)
}
