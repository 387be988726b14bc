//! World engine binary for Abyssal.
//!
//! Wires the tick pipeline to its `PostgreSQL` world store and runs it
//! on wall-clock boundaries until the process is stopped.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `abyssal-config.yaml`
//! 3. Connect to `PostgreSQL` and run migrations
//! 4. Build the income model from config
//! 5. Assemble the tick engine over the standard stage pipeline
//! 6. Run the scheduler loop

mod error;

use std::path::Path;

use abyssal_core::config::EngineConfig;
use abyssal_core::income;
use abyssal_core::orchestrator::{standard_stages, TickEngine};
use abyssal_core::scheduler::Scheduler;
use abyssal_db::{PgWorldStore, PostgresPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point for the world engine.
///
/// # Errors
///
/// Returns an error if any startup step fails; the scheduler loop itself
/// only ends on a clock fault.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration first so its log level can seed the filter.
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG overrides the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!("abyssal-engine starting");
    info!(
        tick_interval_secs = config.game.tick_interval_secs,
        income_model = config.game.income.model,
        "Configuration loaded"
    );

    // 3. Connect to PostgreSQL and bring the schema up to date.
    let pool = PostgresPool::connect_url(&config.infrastructure.postgres_url)
        .await
        .map_err(EngineError::from)?;
    pool.run_migrations().await.map_err(EngineError::from)?;

    // 4. Build the income model.
    let income_model = income::from_config(&config.game.income).map_err(EngineError::from)?;

    // 5. Assemble the tick engine.
    let store = PgWorldStore::new(pool.clone());
    let mut engine = TickEngine::new(store, standard_stages(income_model));
    info!("Tick engine assembled, entering scheduler loop");

    // 6. Run until stopped. Failed ticks are logged and skipped inside
    //    the scheduler; only a clock fault ends the loop.
    let scheduler = Scheduler::new(config.game.tick_interval_secs).map_err(EngineError::from)?;
    let result = scheduler.run(&mut engine).await;

    pool.close().await;
    result.map_err(EngineError::from)?;

    info!("abyssal-engine shutdown complete");
    Ok(())
}

/// Load the engine configuration from `abyssal-config.yaml`.
///
/// Looks for the config file relative to the current working directory
/// and falls back to defaults when it is absent.
fn load_config() -> Result<EngineConfig, EngineError> {
    let config_path = Path::new("abyssal-config.yaml");
    if config_path.exists() {
        Ok(EngineConfig::from_file(config_path)?)
    } else {
        Ok(EngineConfig::default())
    }
}
