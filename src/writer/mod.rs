pub mod batch;
pub mod repository;
pub mod schema_gen;
pub mod sqlite;

pub use batch::*;
pub use repository::*;
pub use sqlite::SqliteStore;
