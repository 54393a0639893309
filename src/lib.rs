pub mod cli;
pub mod config;
pub mod download;
pub mod parser;
pub mod schema;
pub mod ui;
pub mod universe;
pub mod writer;

pub use cli::{Cli, Commands};
pub use config::SeedConfig;
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
pub use universe::{seed_universe, SeedReport, Stage};
