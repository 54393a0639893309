//! Staged universe ingestion.
//!
//! Stages run strictly in order; each one fills the caches its descendants
//! read before the next begins.

use anyhow::{Context, Result};
use indicatif::HumanBytes;
use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::lookup::{StargateArena, StationLookups, UniverseLookups};
use super::memory::{format_delta, MemoryStats, MemoryTracker};
use super::rows::*;
use super::transform;
use crate::config::{files, PROGRESS_STEP};
use crate::parser::{CorporationRecord, RecordSource, StationOperationRecord};
use crate::ui::{Phase, Ui};
use crate::writer::{
    stream_upsert, ConnectionPruner, Integrity, Repository, StargateSource, StreamCount,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Regions,
    Constellations,
    Solarsystems,
    Stars,
    Planets,
    Moons,
    AsteroidBelts,
    Stations,
    Stargates,
    Connections,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::Regions,
        Stage::Constellations,
        Stage::Solarsystems,
        Stage::Stars,
        Stage::Planets,
        Stage::Moons,
        Stage::AsteroidBelts,
        Stage::Stations,
        Stage::Stargates,
        Stage::Connections,
    ];

    /// Record file streamed by this stage; connections are derived from storage
    pub fn source_file(self) -> Option<&'static str> {
        match self {
            Stage::Regions => Some(files::REGIONS),
            Stage::Constellations => Some(files::CONSTELLATIONS),
            Stage::Solarsystems => Some(files::SOLARSYSTEMS),
            Stage::Stars => Some(files::STARS),
            Stage::Planets => Some(files::PLANETS),
            Stage::Moons => Some(files::MOONS),
            Stage::AsteroidBelts => Some(files::ASTEROID_BELTS),
            Stage::Stations => Some(files::STATIONS),
            Stage::Stargates => Some(files::STARGATES),
            Stage::Connections => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Regions => "Regions",
            Stage::Constellations => "Constellations",
            Stage::Solarsystems => "Solar Systems",
            Stage::Stars => "Stars",
            Stage::Planets => "Planets",
            Stage::Moons => "Moons",
            Stage::AsteroidBelts => "Asteroid Belts",
            Stage::Stations => "Stations",
            Stage::Stargates => "Stargates",
            Stage::Connections => "Connections",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub stage: Stage,
    pub written: u64,
    /// Orphaned records dropped by the stage
    pub skipped: u64,
    pub elapsed: Duration,
    /// Process resident memory once the stage finished
    pub resident_bytes: u64,
    /// Highest resident memory seen since the run started
    pub peak_bytes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub stages: Vec<StageReport>,
    /// Stale connection rows removed by the final stage
    pub pruned_connections: usize,
    pub memory: MemoryStats,
}

impl SeedReport {
    pub fn get(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|r| r.stage == stage)
    }

    pub fn written(&self, stage: Stage) -> u64 {
        self.get(stage).map_or(0, |r| r.written)
    }

    pub fn total(&self) -> u64 {
        self.stages.iter().map(|r| r.written).sum()
    }

    pub fn orphans(&self) -> u64 {
        self.stages.iter().map(|r| r.skipped).sum()
    }

    pub fn elapsed(&self) -> Duration {
        self.stages.iter().map(|r| r.elapsed).sum()
    }
}

/// Everything the pipeline writes to or reads back from
pub trait UniverseStore:
    Repository<RegionRow>
    + Repository<ConstellationRow>
    + Repository<SolarsystemRow>
    + Repository<CelestialRow>
    + Repository<StationRow>
    + Repository<StargateRow>
    + Repository<ConnectionRow>
    + StargateSource<StargateRow>
    + ConnectionPruner
{
}

impl<T> UniverseStore for T where
    T: Repository<RegionRow>
        + Repository<ConstellationRow>
        + Repository<SolarsystemRow>
        + Repository<CelestialRow>
        + Repository<StationRow>
        + Repository<StargateRow>
        + Repository<ConnectionRow>
        + StargateSource<StargateRow>
        + ConnectionPruner
{
}

/// Runs every stage against one record source and one store
pub struct UniverseSeeder<'a, Src, S, U> {
    source: &'a Src,
    store: &'a mut S,
    ui: &'a mut U,
    batch_size: usize,
}

impl<'a, Src, S, U> UniverseSeeder<'a, Src, S, U>
where
    Src: RecordSource,
    S: UniverseStore,
    U: Ui,
{
    pub fn new(source: &'a Src, store: &'a mut S, ui: &'a mut U, batch_size: usize) -> Self {
        Self {
            source,
            store,
            ui,
            batch_size: batch_size.max(1),
        }
    }

    pub fn run(mut self) -> Result<SeedReport> {
        let mut lookups = UniverseLookups::new();
        let mut stargate_ids = FxHashSet::default();
        let mut report = SeedReport::default();
        let mut memory = MemoryTracker::start();
        info!(start_bytes = memory.start_bytes(), "Memory tracking started");

        for stage in Stage::ALL {
            self.ui.set_phase(Phase::Seeding(stage));
            let start = Instant::now();

            let count = self
                .run_stage(
                    stage,
                    &mut lookups,
                    &mut stargate_ids,
                    &mut report,
                )
                .with_context(|| format!("Stage {} failed", stage))?;

            let elapsed = start.elapsed();
            let sample = memory.sample();
            let stage_report = StageReport {
                stage,
                written: count.written,
                skipped: count.skipped,
                elapsed,
                resident_bytes: sample.resident,
                peak_bytes: sample.peak,
            };
            info!(
                stage = %stage,
                written = stage_report.written,
                skipped = stage_report.skipped,
                elapsed_ms = elapsed.as_millis() as u64,
                resident_bytes = sample.resident,
                peak_bytes = sample.peak,
                "Stage complete"
            );
            self.ui.clear_progress();
            self.ui.log(format!(
                "{}: {} records ({} orphans skipped), memory {} ({}), peak {}",
                stage,
                stage_report.written,
                stage_report.skipped,
                HumanBytes(sample.resident),
                format_delta(sample.resident as i64 - memory.start_bytes() as i64),
                HumanBytes(sample.peak)
            ));
            report.stages.push(stage_report);
        }

        report.memory = memory.finish();
        info!(
            records = report.total(),
            start_bytes = report.memory.start,
            peak_bytes = report.memory.peak,
            delta_bytes = report.memory.delta(),
            rating = %report.memory.rating(),
            "Memory usage"
        );
        self.ui.set_phase(Phase::Complete);
        Ok(report)
    }

    fn run_stage(
        &mut self,
        stage: Stage,
        lookups: &mut UniverseLookups,
        stargate_ids: &mut FxHashSet<i64>,
        report: &mut SeedReport,
    ) -> Result<StreamCount> {
        match stage {
            Stage::Regions => self.stream(stage, Integrity::Enforced, |rec| {
                transform::region(rec, lookups)
            }),
            Stage::Constellations => self.stream(stage, Integrity::Enforced, |rec| {
                transform::constellation(rec, lookups)
            }),
            Stage::Solarsystems => self.stream(stage, Integrity::Enforced, |rec| {
                transform::solarsystem(rec, lookups)
            }),
            Stage::Stars => self.stream(stage, Integrity::Enforced, |rec| {
                transform::star(rec, lookups)
            }),
            Stage::Planets => self.stream(stage, Integrity::Enforced, |rec| {
                transform::planet(rec, lookups)
            }),
            Stage::Moons => self.stream(stage, Integrity::Enforced, |rec| {
                transform::moon(rec, lookups)
            }),
            Stage::AsteroidBelts => self.stream(stage, Integrity::Enforced, |rec| {
                transform::asteroid_belt(rec, lookups)
            }),
            Stage::Stations => {
                let names = self.load_station_names()?;
                self.stream(stage, Integrity::Enforced, |rec| {
                    transform::station(rec, lookups, &names)
                })
            }
            Stage::Stargates => self.stream(stage, Integrity::Suspended, |rec| {
                let row = transform::stargate(rec, lookups)?;
                stargate_ids.insert(row.id);
                Some(row)
            }),
            Stage::Connections => {
                let (count, pruned) = self.seed_connections(stargate_ids)?;
                report.pruned_connections = pruned;
                Ok(count)
            }
        }
    }

    /// Stream the stage's source file through `map` into the store
    fn stream<T, R, F>(&mut self, stage: Stage, integrity: Integrity, map: F) -> Result<StreamCount>
    where
        T: DeserializeOwned,
        S: Repository<R>,
        F: FnMut(T) -> Option<R>,
    {
        let file = stage
            .source_file()
            .with_context(|| format!("{} has no source file", stage))?;
        let records = self.source.records::<T>(file)?;
        let ui = &mut *self.ui;

        stream_upsert(
            &mut *self.store,
            records,
            self.batch_size,
            integrity,
            map,
            |written| {
                if written % PROGRESS_STEP == 0 {
                    ui.set_progress(written, 0, stage.name());
                }
            },
        )
    }

    fn load_station_names(&self) -> Result<StationLookups> {
        let mut names = StationLookups::default();

        for corp in self.source.records::<CorporationRecord>(files::CORPORATIONS)? {
            let corp = corp?;
            names.corporations.insert(corp.id, corp.name.into_en());
        }

        for op in self
            .source
            .records::<StationOperationRecord>(files::STATION_OPERATIONS)?
        {
            let op = op?;
            names.operations.insert(op.id, op.operation_name.into_en());
        }

        debug!(
            corporations = names.corporations.len(),
            operations = names.operations.len(),
            "Loaded station naming lookups"
        );
        Ok(names)
    }

    /// Rebuild every connection from the stargates written in this run
    fn seed_connections(&mut self, stargate_ids: &FxHashSet<i64>) -> Result<(StreamCount, usize)> {
        let gates: Vec<StargateRow> = self
            .store
            .load_stargates()?
            .into_iter()
            .filter(|gate| stargate_ids.contains(&gate.id))
            .collect();
        let arena = StargateArena::new(gates);
        debug!(stargates = arena.len(), "Resolving stargate destinations");

        let mut keys = FxHashSet::default();
        let mut dangling = 0u64;
        let count = stream_upsert(
            &mut *self.store,
            arena.gates().iter().map(Ok::<_, anyhow::Error>),
            self.batch_size,
            Integrity::Enforced,
            |gate| {
                let destination = arena.destination(gate);
                if destination.is_none() {
                    dangling += 1;
                }
                keys.insert(gate.id);
                Some(transform::connection(gate, destination))
            },
            |_| {},
        )?;

        if dangling > 0 {
            debug!(dangling, "Stargates with unresolved destinations");
        }

        let pruned = self.store.prune_connections(&keys)?;
        if pruned > 0 {
            info!(pruned, "Removed stale connections");
        }

        Ok((count, pruned))
    }
}
