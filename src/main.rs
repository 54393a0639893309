use anyhow::Result;
use eve_universe_seeder::{
    cli::{Cli, Commands},
    download::ensure_sde_downloaded,
    seed_universe,
    universe::memory::format_delta,
    ConsoleUi, SeedConfig, SeedReport, Stage,
};
use indicatif::HumanBytes;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Seed {
            input_dir,
            database,
            batch_size,
        } => {
            let config = SeedConfig::new(input_dir, database).with_batch_size(batch_size);
            let report = seed_universe(&config, &mut ConsoleUi::new())?;
            print_summary(&report, &config.database);
        }

        Commands::Sync {
            database,
            force,
            cache_dir,
            batch_size,
        } => {
            let mut ui = ConsoleUi::new();
            let (input_dir, build_number) = ensure_sde_downloaded(cache_dir, force, &mut ui)?;

            let config = SeedConfig::new(input_dir, database).with_batch_size(batch_size);
            let report = seed_universe(&config, &mut ui)?;
            print_summary(&report, &config.database);
            println!("SDE build {}", build_number);
        }

        Commands::Stages => {
            println!("Pipeline stages:\n");
            for (n, stage) in Stage::ALL.iter().enumerate() {
                let source = stage.source_file().unwrap_or("(derived from stargates)");
                println!("  {:>2}. {:<16} {}", n + 1, stage.name(), source);
            }
        }
    }

    Ok(())
}

fn print_summary(report: &SeedReport, database: &Path) {
    println!(
        "\n{:<16} {:>10} {:>10} {:>10} {:>12}",
        "Stage", "Records", "Orphans", "Seconds", "Resident"
    );
    for stage in &report.stages {
        println!(
            "{:<16} {:>10} {:>10} {:>10.2} {:>12}",
            stage.stage.name(),
            stage.written,
            stage.skipped,
            stage.elapsed.as_secs_f64(),
            HumanBytes(stage.resident_bytes).to_string()
        );
    }
    println!(
        "{:<16} {:>10} {:>10} {:>10.2} {:>12}",
        "Total",
        report.total(),
        report.orphans(),
        report.elapsed().as_secs_f64(),
        HumanBytes(report.memory.end).to_string()
    );
    if report.pruned_connections > 0 {
        println!("Removed {} stale connections", report.pruned_connections);
    }

    let memory = &report.memory;
    println!(
        "\nMemory: start {}, peak {}, delta {} over {} records ({})",
        HumanBytes(memory.start),
        HumanBytes(memory.peak),
        format_delta(memory.delta()),
        report.total(),
        memory.rating()
    );
    println!("Seeded {:?}", database);
}
