//! End-to-end seeding runs against JSONL fixtures and an SQLite file.
//!
//! Each test writes a small universe into a temporary directory, seeds a
//! fresh database from it and checks the stored rows with plain queries.

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use eve_universe_seeder::config::files;
use eve_universe_seeder::ui::SilentUi;
use eve_universe_seeder::{seed_universe, SeedConfig, SeedReport, Stage};

// =============================================================================
// Fixtures
// =============================================================================

const THE_FORGE: i64 = 10000002;
const METROPOLIS: i64 = 10000042;
const JITA: i64 = 30000142;
const HEK: i64 = 30002053;
const JITA_GATE: i64 = 50001248;
const HEK_GATE: i64 = 50001249;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Two regions joined by one stargate pair
    fn new() -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fixture.write(
            files::REGIONS,
            &[
                r#"{"_key":10000002,"name":{"en":"The Forge"}}"#,
                r#"{"_key":10000042,"name":{"en":"Metropolis"}}"#,
            ],
        );
        fixture.write(
            files::CONSTELLATIONS,
            &[
                r#"{"_key":20000020,"regionID":10000002,"name":{"en":"Kimotoro"}}"#,
                r#"{"_key":20000302,"regionID":10000042,"name":{"en":"Hed"}}"#,
            ],
        );
        fixture.write(
            files::SOLARSYSTEMS,
            &[
                r#"{"_key":30000142,"constellationID":20000020,"regionID":10000002,"name":{"en":"Jita"},"securityStatus":0.9459,"position":{"x":-1.29e17,"y":6.07e16,"z":1.17e17}}"#,
                r#"{"_key":30002053,"constellationID":20000302,"regionID":10000042,"name":{"en":"Hek"},"securityStatus":0.5,"position":{"x":1.0,"y":2.0,"z":3.0}}"#,
            ],
        );
        fixture.write(
            files::STARS,
            &[r#"{"_key":40009076,"solarSystemID":30000142,"typeID":45041}"#],
        );
        fixture.write(
            files::PLANETS,
            &[r#"{"_key":40009077,"solarSystemID":30000142,"celestialIndex":4,"typeID":13}"#],
        );
        fixture.write(
            files::MOONS,
            &[r#"{"_key":40009087,"solarSystemID":30000142,"orbitID":40009077,"orbitIndex":4,"typeID":14}"#],
        );
        fixture.write(files::ASTEROID_BELTS, &[]);
        fixture.write(
            files::CORPORATIONS,
            &[r#"{"_key":1000035,"name":{"en":"Caldari Navy"}}"#],
        );
        fixture.write(
            files::STATION_OPERATIONS,
            &[r#"{"_key":26,"operationName":{"en":"Assembly Plant"}}"#],
        );
        fixture.write(
            files::STATIONS,
            &[r#"{"_key":60003760,"solarSystemID":30000142,"orbitID":40009087,"ownerID":1000035,"operationID":26,"useOperationName":true,"typeID":1531}"#],
        );
        fixture.write(
            files::STARGATES,
            &[
                r#"{"_key":50001248,"solarSystemID":30000142,"typeID":29635,"position":{"x":1.0,"y":1.0,"z":1.0},"destination":{"stargateID":50001249,"solarSystemID":30002053}}"#,
                r#"{"_key":50001249,"solarSystemID":30002053,"typeID":29635,"position":{"x":2.0,"y":2.0,"z":2.0},"destination":{"stargateID":50001248,"solarSystemID":30000142}}"#,
            ],
        );
        fixture
    }

    /// One region holding Jita with a star, planet IV, its first moon and a
    /// station, and no stargates
    fn minimal() -> Self {
        let fixture = Self::new();
        fixture.write(files::REGIONS, &[r#"{"_key":10000002,"name":{"en":"The Forge"}}"#]);
        fixture.write(
            files::CONSTELLATIONS,
            &[r#"{"_key":20000020,"regionID":10000002,"name":{"en":"Kimotoro"}}"#],
        );
        fixture.write(
            files::SOLARSYSTEMS,
            &[r#"{"_key":30000142,"constellationID":20000020,"regionID":10000002,"name":{"en":"Jita"},"securityStatus":0.9459,"position":{"x":1.0,"y":2.0,"z":3.0}}"#],
        );
        fixture.write(
            files::MOONS,
            &[r#"{"_key":40009078,"solarSystemID":30000142,"orbitID":40009077,"orbitIndex":1,"typeID":14}"#],
        );
        fixture.write(
            files::STATIONS,
            &[r#"{"_key":60003760,"solarSystemID":30000142,"orbitID":40009078,"ownerID":1000035,"operationID":26,"useOperationName":true,"typeID":1531}"#],
        );
        fixture.write(files::STARGATES, &[]);
        fixture
    }

    fn write(&self, name: &str, lines: &[&str]) {
        let mut body = lines.join("\n");
        body.push('\n');
        fs::write(self.dir.path().join(name), body).unwrap();
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn db_path(&self) -> PathBuf {
        self.dir.path().join("universe.db")
    }

    fn seed(&self) -> anyhow::Result<SeedReport> {
        self.seed_with_batch(1000)
    }

    fn seed_with_batch(&self, batch_size: usize) -> anyhow::Result<SeedReport> {
        let config = SeedConfig::new(self.path(), self.db_path()).with_batch_size(batch_size);
        seed_universe(&config, &mut SilentUi::new())
    }

    fn connection(&self) -> Connection {
        Connection::open(self.db_path()).unwrap()
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

/// Every row of every table, rendered as text for whole-database comparison
fn dump(conn: &Connection) -> Vec<String> {
    let tables = [
        "regions",
        "constellations",
        "solarsystems",
        "celestials",
        "stations",
        "stargates",
        "solarsystem_connections",
    ];
    let mut out = Vec::new();
    for table in tables {
        let mut stmt = conn
            .prepare(&format!("SELECT * FROM {} ORDER BY 1", table))
            .unwrap();
        let width = stmt.column_count();
        let rows = stmt
            .query_map([], |row| {
                let mut cells = Vec::with_capacity(width);
                for i in 0..width {
                    let value: rusqlite::types::Value = row.get(i)?;
                    cells.push(format!("{:?}", value));
                }
                Ok(format!("{}: {}", table, cells.join(", ")))
            })
            .unwrap();
        for row in rows {
            out.push(row.unwrap());
        }
    }
    out
}

// =============================================================================
// Full runs
// =============================================================================

#[test]
fn test_jita_end_to_end() {
    let fixture = Fixture::new();
    let report = fixture.seed().unwrap();
    let conn = fixture.connection();

    assert_eq!(count(&conn, "regions"), 2);
    assert_eq!(count(&conn, "constellations"), 2);
    assert_eq!(count(&conn, "solarsystems"), 2);
    assert_eq!(count(&conn, "celestials"), 3);
    assert_eq!(count(&conn, "stations"), 1);
    assert_eq!(report.orphans(), 0);

    let (name, area): (String, String) = conn
        .query_row("SELECT name, type FROM regions WHERE id = ?1", [THE_FORGE], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(name, "The Forge");
    assert_eq!(area, "eve");

    let security: f64 = conn
        .query_row("SELECT security FROM solarsystems WHERE id = ?1", [JITA], |r| r.get(0))
        .unwrap();
    assert!((security - 0.9459).abs() < 1e-9);

    let names: Vec<String> = conn
        .prepare("SELECT name FROM celestials ORDER BY group_id")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();
    assert_eq!(names, vec!["Jita", "Jita IV", "Jita IV - Moon IV"]);

    let station: String = conn
        .query_row("SELECT name FROM stations WHERE id = 60003760", [], |r| r.get(0))
        .unwrap();
    assert!(station.contains("Jita IV - Moon IV"));
    assert!(station.contains("Caldari Navy"));
}

#[test]
fn test_single_system_end_to_end() {
    let fixture = Fixture::minimal();
    let report = fixture.seed().unwrap();
    let conn = fixture.connection();

    assert_eq!(count(&conn, "regions"), 1);
    assert_eq!(count(&conn, "constellations"), 1);
    assert_eq!(count(&conn, "solarsystems"), 1);
    assert_eq!(count(&conn, "celestials"), 3);
    assert_eq!(count(&conn, "stations"), 1);
    assert_eq!(count(&conn, "stargates"), 0);
    assert_eq!(count(&conn, "solarsystem_connections"), 0);
    assert_eq!(report.total(), 7);
    assert_eq!(report.orphans(), 0);

    let names: Vec<String> = conn
        .prepare("SELECT name FROM celestials ORDER BY group_id")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();
    assert_eq!(names, vec!["Jita", "Jita IV", "Jita IV - Moon I"]);

    let (station, parent): (String, i64) = conn
        .query_row("SELECT name, parent_id FROM stations WHERE id = 60003760", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(station, "Jita IV - Moon I Caldari Navy Assembly Plant");
    assert_eq!(parent, 40009078);
}

#[test]
fn test_rerun_is_idempotent() {
    let fixture = Fixture::new();
    let first = fixture.seed().unwrap();
    let before = dump(&fixture.connection());

    let second = fixture.seed().unwrap();
    let after = dump(&fixture.connection());

    assert_eq!(before, after);
    assert_eq!(first.total(), second.total());
    assert_eq!(second.pruned_connections, 0);
}

#[test]
fn test_small_batches_store_the_same_rows() {
    let large = Fixture::new();
    large.seed().unwrap();

    let small = Fixture::new();
    small.seed_with_batch(1).unwrap();

    assert_eq!(dump(&large.connection()), dump(&small.connection()));
}

#[test]
fn test_upsert_refreshes_changed_rows() {
    let fixture = Fixture::new();
    fixture.seed().unwrap();

    fixture.write(
        files::REGIONS,
        &[
            r#"{"_key":10000002,"name":{"en":"The Forge (renamed)"}}"#,
            r#"{"_key":10000042,"name":{"en":"Metropolis"}}"#,
        ],
    );
    fixture.seed().unwrap();

    let conn = fixture.connection();
    let name: String = conn
        .query_row("SELECT name FROM regions WHERE id = ?1", [THE_FORGE], |r| r.get(0))
        .unwrap();
    assert_eq!(name, "The Forge (renamed)");
    assert_eq!(count(&conn, "regions"), 2);
}

// =============================================================================
// Stargate graph
// =============================================================================

#[test]
fn test_cross_region_connection_pair() {
    let fixture = Fixture::new();
    fixture.seed().unwrap();
    let conn = fixture.connection();

    let mut stmt = conn
        .prepare(
            "SELECT from_solarsystem_id, to_stargate_id, to_solarsystem_id, to_region_id, is_regional
             FROM solarsystem_connections WHERE from_stargate_id = ?1",
        )
        .unwrap();
    let mut fetch = |gate: i64| -> (i64, i64, Option<i64>, Option<i64>, bool) {
        stmt.query_row([gate], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?))
        })
        .unwrap()
    };

    let jita_side = fetch(JITA_GATE);
    let hek_side = fetch(HEK_GATE);

    assert_eq!(jita_side, (JITA, HEK_GATE, Some(HEK), Some(METROPOLIS), true));
    assert_eq!(hek_side, (HEK, JITA_GATE, Some(JITA), Some(THE_FORGE), true));
}

#[test]
fn test_stargate_named_after_destination() {
    let fixture = Fixture::new();
    fixture.seed().unwrap();

    let name: Option<String> = fixture
        .connection()
        .query_row("SELECT name FROM stargates WHERE id = ?1", [JITA_GATE], |r| r.get(0))
        .unwrap();
    assert_eq!(name.as_deref(), Some("Stargate (Hek)"));
}

#[test]
fn test_dangling_destination_leaves_far_side_null() {
    let fixture = Fixture::new();
    fixture.write(
        files::STARGATES,
        &[r#"{"_key":50001248,"solarSystemID":30000142,"typeID":29635,"position":{"x":1.0,"y":1.0,"z":1.0},"destination":{"stargateID":59999999,"solarSystemID":39999999}}"#],
    );
    fixture.seed().unwrap();
    let conn = fixture.connection();

    let row: (i64, Option<i64>, Option<i64>, Option<i64>, bool) = conn
        .query_row(
            "SELECT to_stargate_id, to_solarsystem_id, to_constellation_id, to_region_id, is_regional
             FROM solarsystem_connections WHERE from_stargate_id = ?1",
            [JITA_GATE],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
        .unwrap();
    assert_eq!(row, (59999999, None, None, None, true));

    let name: Option<String> = conn
        .query_row("SELECT name FROM stargates WHERE id = ?1", [JITA_GATE], |r| r.get(0))
        .unwrap();
    assert_eq!(name, None);
}

#[test]
fn test_removed_gate_prunes_its_connection() {
    let fixture = Fixture::new();
    fixture.seed().unwrap();

    fixture.write(
        files::STARGATES,
        &[r#"{"_key":50001248,"solarSystemID":30000142,"typeID":29635,"position":{"x":1.0,"y":1.0,"z":1.0},"destination":{"stargateID":50001249,"solarSystemID":30002053}}"#],
    );
    let report = fixture.seed().unwrap();
    let conn = fixture.connection();

    assert_eq!(report.pruned_connections, 1);
    assert_eq!(count(&conn, "solarsystem_connections"), 1);
    // Stargate rows are never deleted
    assert_eq!(count(&conn, "stargates"), 2);

    let to_system: Option<i64> = conn
        .query_row(
            "SELECT to_solarsystem_id FROM solarsystem_connections WHERE from_stargate_id = ?1",
            [JITA_GATE],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(to_system, None);
}

// =============================================================================
// Orphans and failures
// =============================================================================

#[test]
fn test_orphans_are_skipped_and_counted() {
    let fixture = Fixture::new();
    fixture.write(
        files::PLANETS,
        &[
            r#"{"_key":40009077,"solarSystemID":30000142,"celestialIndex":4,"typeID":13}"#,
            r#"{"_key":40999001,"solarSystemID":39999999,"celestialIndex":1,"typeID":13}"#,
        ],
    );
    fixture.write(
        files::ASTEROID_BELTS,
        &[r#"{"_key":40999002,"solarSystemID":30000142,"orbitID":40999001,"orbitIndex":1}"#],
    );

    let report = fixture.seed().unwrap();
    let planets = report.get(Stage::Planets).unwrap();
    let belts = report.get(Stage::AsteroidBelts).unwrap();

    assert_eq!((planets.written, planets.skipped), (1, 1));
    assert_eq!((belts.written, belts.skipped), (0, 1));
    assert_eq!(report.orphans(), 2);
    assert_eq!(count(&fixture.connection(), "celestials"), 3);
}

#[test]
fn test_malformed_line_fails_stage_and_keeps_earlier_stages() {
    let fixture = Fixture::new();
    fixture.write(
        files::PLANETS,
        &[
            r#"{"_key":40009077,"solarSystemID":30000142,"celestialIndex":4,"typeID":13}"#,
            r#"{"_key":40009078,"solarSystemID":"#,
        ],
    );

    let err = fixture.seed().unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Stage Planets failed"), "{}", message);
    assert!(message.contains("line 2"), "{}", message);

    let conn = fixture.connection();
    assert_eq!(count(&conn, "regions"), 2);
    assert_eq!(count(&conn, "solarsystems"), 2);
    assert_eq!(count(&conn, "stations"), 0);
}

#[test]
fn test_missing_source_file_is_fatal() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.path().join(files::STARS)).unwrap();

    let err = fixture.seed().unwrap_err();
    assert!(format!("{:#}", err).contains("Stage Stars failed"));
}
