use anyhow::{Context, Result};
use rusqlite::Connection;
use rustc_hash::FxHashSet;
use std::path::Path;
use tracing::debug;

use super::repository::{ConnectionPruner, Integrity, Repository, StargateSource, TableRow};
use super::schema_gen::{generate_create_table, generate_indexes, generate_upsert};
use crate::parser::Position;
use crate::schema::{TableSchema, ALL_TABLES, SOLARSYSTEM_CONNECTIONS, STARGATES};
use crate::universe::StargateRow;

/// Maximum ids per DELETE statement, kept under SQLite's parameter limit
const DELETE_CHUNK_SIZE: usize = 500;

/// SQLite-backed universe store.
///
/// Opening never truncates: rows from earlier runs stay and are refreshed by
/// key on the next run.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;",
        )?;

        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Create all universe tables and indexes that do not exist yet
    pub fn create_tables(&self) -> Result<()> {
        self.create_tables_for(ALL_TABLES)
    }

    pub fn create_tables_for(&self, schemas: &[&TableSchema]) -> Result<()> {
        debug!(tables = schemas.len(), "Creating tables");

        for schema in schemas {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                self.conn
                    .execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }

        Ok(())
    }

    /// Number of rows currently in `table`
    pub fn count(&self, table: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let n: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .with_context(|| format!("Failed to count rows in {}", table))?;
        Ok(n as u64)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run PRAGMA optimize once a run is complete
    pub fn finalize(self) -> Result<()> {
        self.conn.execute_batch("PRAGMA optimize;")?;
        Ok(())
    }

    fn set_foreign_keys(&self, enabled: bool) -> Result<()> {
        let sql = if enabled {
            "PRAGMA foreign_keys = ON;"
        } else {
            "PRAGMA foreign_keys = OFF;"
        };
        self.conn
            .execute_batch(sql)
            .context("Failed to toggle foreign key enforcement")
    }

    fn write_batch<R: TableRow>(&mut self, rows: &[R]) -> Result<()> {
        let schema = R::schema();
        let sql = generate_upsert(schema);
        let width = schema.columns.len();

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&sql)?;
            for row in rows {
                let values = row.values();
                debug_assert_eq!(values.len(), width, "row width for {}", schema.name);
                for (idx, value) in values.iter().enumerate() {
                    value.bind_to(idx + 1, &mut stmt)?;
                }
                stmt.raw_execute()
                    .with_context(|| format!("Failed to upsert into {}", schema.name))?;
            }
        }
        tx.commit()
            .with_context(|| format!("Failed to commit batch for {}", schema.name))?;

        Ok(())
    }
}

impl<R: TableRow> Repository<R> for SqliteStore {
    fn upsert(&mut self, rows: &[R], integrity: Integrity) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        match integrity {
            Integrity::Enforced => self.write_batch(rows),
            Integrity::Suspended => {
                // The pragma is a no-op inside a transaction, so toggle around it
                self.set_foreign_keys(false)?;
                let result = self.write_batch(rows);
                self.set_foreign_keys(true)?;
                result
            }
        }
    }
}

impl StargateSource<StargateRow> for SqliteStore {
    fn load_stargates(&mut self) -> Result<Vec<StargateRow>> {
        let sql = format!("SELECT {} FROM {}", STARGATES.column_names().join(", "), STARGATES.name);
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(StargateRow {
                    id: row.get("id")?,
                    solarsystem_id: row.get("solarsystem_id")?,
                    destination_id: row.get("destination_id")?,
                    constellation_id: row.get("constellation_id")?,
                    region_id: row.get("region_id")?,
                    name: row.get("name")?,
                    position: Position {
                        x: row.get("position_x")?,
                        y: row.get("position_y")?,
                        z: row.get("position_z")?,
                    },
                    type_id: row.get("type_id")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to load stargates")?;

        Ok(rows)
    }
}

impl ConnectionPruner for SqliteStore {
    fn prune_connections(&mut self, keep: &FxHashSet<i64>) -> Result<usize> {
        let key = SOLARSYSTEM_CONNECTIONS.unique_keys[0];
        let select = format!("SELECT {} FROM {}", key, SOLARSYSTEM_CONNECTIONS.name);

        let stale: Vec<i64> = {
            let mut stmt = self.conn.prepare(&select)?;
            let ids = stmt
                .query_map([], |row| row.get::<_, i64>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            ids.into_iter().filter(|id| !keep.contains(id)).collect()
        };

        if stale.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        for chunk in stale.chunks(DELETE_CHUNK_SIZE) {
            let placeholders: Vec<&str> = chunk.iter().map(|_| "?").collect();
            let sql = format!(
                "DELETE FROM {} WHERE {} IN ({})",
                SOLARSYSTEM_CONNECTIONS.name,
                key,
                placeholders.join(", ")
            );
            tx.execute(&sql, rusqlite::params_from_iter(chunk.iter()))
                .context("Failed to delete stale connections")?;
        }
        tx.commit()?;

        Ok(stale.len())
    }
}
