use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, error, info, trace};

use super::seed_catalog::{load_catalog, upsert_catalog};

/// Creates the schema and loads the built-in emission catalog.
pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing carbon ledger database");
    debug!("Database URL: {}", database_url);

    trace!("Attempting to connect to database");
    let db: DatabaseConnection = match Database::connect(database_url).await {
        Ok(connection) => {
            info!("Successfully connected to database");
            debug!("Database connection established");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    info!("Running database migrations");
    trace!("Executing migration up command");
    match Migrator::up(&db, None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
            debug!("All pending migrations have been applied");
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    let catalog = load_catalog(None)?;
    let summary = upsert_catalog(&db, &catalog).await?;
    info!(
        "Seeded {} categories and {} industry benchmarks",
        summary.categories, summary.benchmarks
    );

    db.close().await?;
    info!("Database initialization completed successfully!");
    trace!("init_database function completed");

    Ok(())
}
