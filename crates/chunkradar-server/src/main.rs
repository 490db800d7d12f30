//! Chunk Radar — flashcard study server persisting to JSON files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use chunkradar_core::ChunkRadarConfig;
use chunkradar_server::{build_router, migrate, AppState};

const USAGE: &str = "\
Chunk Radar — flashcard study server

Usage: chunkradar [command] [data-dir]

Commands:
  (none)       Start the server
  validate     Check the data directory
  migrate      Convert a legacy data directory
  help         Show this help message

The data directory defaults to $CHUNKRADAR_DATA_DIR, then ../data next to
the executable, then ./data.";

enum Command {
    Serve,
    Validate(PathBuf),
    Migrate(PathBuf),
    Help,
    Unknown(String),
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let Some(name) = args.next() else {
            return Command::Serve;
        };
        let mut dir = || args.next().map(PathBuf::from).unwrap_or_else(default_data_dir);
        match name.trim_start_matches("--") {
            "validate" => Command::Validate(dir()),
            "migrate" => Command::Migrate(dir()),
            "help" | "-h" => Command::Help,
            _ => Command::Unknown(name),
        }
    }
}

fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHUNKRADAR_DATA_DIR") {
        return PathBuf::from(dir);
    }
    std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .map(|exe_dir| exe_dir.join("../data"))
        .filter(|dir| dir.exists())
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Command::parse(std::env::args().skip(1)) {
        Command::Serve => {
            serve(default_data_dir()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate(dir) => {
            let report = migrate::validate(&dir);
            migrate::print_report(&report);
            Ok(exit_code(report.layout_valid))
        }
        Command::Migrate(dir) => {
            let report = migrate::run_migration(&dir);
            migrate::print_report(&report);
            Ok(exit_code(report.errors.is_empty()))
        }
        Command::Help => {
            println!("{}", USAGE);
            Ok(ExitCode::SUCCESS)
        }
        Command::Unknown(name) => {
            eprintln!("Unknown command: {}. Use 'chunkradar help' for usage.", name);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn serve(data_dir: PathBuf) -> anyhow::Result<()> {
    info!("Data directory: {}", data_dir.display());

    let config = ChunkRadarConfig::from_env(&data_dir)?;
    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(config));

    // Migrates a legacy layout and creates the default group before serving.
    let groups = state.catalog.list_groups()?;
    info!("{} groups loaded", groups.len());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Chunk Radar server listening on {}", addr);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
