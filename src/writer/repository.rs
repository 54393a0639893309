use anyhow::Result;
use rustc_hash::FxHashSet;

use crate::schema::TableSchema;

/// A single bound value in a row
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Real(f) => stmt.raw_bind_parameter(idx, f)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Integer(i64::from(v))
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// A row type that knows which table it lives in.
///
/// `values()` must yield one value per column of `schema()`, in column order.
pub trait TableRow {
    fn schema() -> &'static TableSchema;

    fn values(&self) -> Vec<SqlValue>;
}

/// Referential-integrity mode for one batch write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integrity {
    Enforced,
    /// Foreign keys are not checked while the batch transaction runs
    Suspended,
}

/// Idempotent insert-or-update of one row kind.
///
/// Implementations must write the whole slice atomically: either every row
/// is visible afterwards or none is.
pub trait Repository<R> {
    fn upsert(&mut self, rows: &[R], integrity: Integrity) -> Result<()>;
}

/// Read access to persisted stargates for the connection pass
pub trait StargateSource<R> {
    fn load_stargates(&mut self) -> Result<Vec<R>>;
}

/// Deletes derived connection rows that are no longer backed by a stargate
pub trait ConnectionPruner {
    /// Returns the number of rows removed
    fn prune_connections(&mut self, keep: &FxHashSet<i64>) -> Result<usize>;
}
