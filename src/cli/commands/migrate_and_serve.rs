use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use tracing::{debug, error, info, trace};

use super::seed_catalog::{load_catalog, upsert_catalog};
use super::serve::run_server;
use crate::config::initialize_app_state_with_url;

pub async fn migrate_and_serve(database_url: &str, bind_address: &str) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");
    debug!("Database URL: {}", database_url);
    debug!("Bind address: {}", bind_address);

    // Initialize application state
    trace!("Initializing application state");
    let state = match initialize_app_state_with_url(database_url).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    info!("Running database migrations");
    trace!("Executing migration up command");
    match Migrator::up(&state.db, None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
            debug!("All pending migrations have been applied");
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    // Reference data is required by every write path
    let catalog = load_catalog(None)?;
    let summary = upsert_catalog(&state.db, &catalog).await?;
    info!(
        "Catalog ready: {} categories, {} benchmarks",
        summary.categories, summary.benchmarks
    );

    run_server(state, bind_address).await
}
