//! Audentra batch allocation runner.
//!
//! Feeds the engine two pre-parsed row tables (JSON), runs one allocation
//! pass, renders the report through the console renderer and prints the
//! machine-readable summary payload to stdout. Workbook parsing and the
//! HTTP surface are external collaborators and stay out of this binary.

#![forbid(unsafe_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use audentra_application::{AllocationService, build_audit_universe, build_parameter_table};
use audentra_core::{AppError, AppResult};
use audentra_domain::{Cell, RawTable};
use audentra_infrastructure::ConsoleReportRenderer;

use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct RunnerConfig {
    parameters_path: PathBuf,
    universe_path: PathBuf,
}

fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = RunnerConfig::load()?;
    let parameters_raw = load_table(&config.parameters_path)?;
    let universe_raw = load_table(&config.universe_path)?;

    let parameters = build_parameter_table(&parameters_raw)?;
    let universe = build_audit_universe(&universe_raw)?;

    info!(
        total_mandays = parameters.total_mandays(),
        departments = parameters.parameters().len(),
        audit_units = universe.len(),
        "audentra-runner started"
    );

    let service =
        AllocationService::new().with_renderer(Arc::new(ConsoleReportRenderer::new()));
    let report = service.run(&parameters, universe)?;

    let payload = serde_json::to_string_pretty(&report.summary).map_err(|error| {
        AppError::Internal(format!("failed to serialize run summary: {error}"))
    })?;
    println!("{payload}");

    Ok(())
}

fn load_table(path: &Path) -> AppResult<RawTable> {
    let contents = fs::read_to_string(path).map_err(|error| {
        AppError::Validation(format!(
            "failed to read input table '{}': {error}",
            path.display()
        ))
    })?;

    let rows: Vec<Vec<Cell>> = serde_json::from_str(&contents).map_err(|error| {
        AppError::Validation(format!(
            "failed to parse input table '{}': {error}",
            path.display()
        ))
    })?;

    Ok(RawTable::new(rows))
}

impl RunnerConfig {
    fn load() -> AppResult<Self> {
        let parameters_path = PathBuf::from(required_env("PARAMETERS_TABLE_PATH")?);
        let universe_path = PathBuf::from(required_env("UNIVERSE_TABLE_PATH")?);

        Ok(Self {
            parameters_path,
            universe_path,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
