#[cfg(test)]
pub mod test_utils {
    use crate::cli::commands::seed_catalog::{load_catalog, upsert_catalog};
    use crate::config::Settings;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use compute::SeaOrmStore;
    use migration::{Migrator, MigratorTrait};
    use moka::future::Cache;
    use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        db.execute_unprepared("PRAGMA foreign_keys = ON;")
            .await
            .expect("Failed to enable foreign keys");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing, with the built-in catalog seeded and
    /// two users that own no business yet
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        let catalog = load_catalog(None).expect("Failed to load built-in catalog");
        upsert_catalog(&db, &catalog)
            .await
            .expect("Failed to seed catalog");

        for username in ["test_user1", "test_user2"] {
            model::entities::user::ActiveModel {
                username: Set(username.to_string()),
                ..Default::default()
            }
            .insert(&db)
            .await
            .expect("Failed to create test user");
        }

        AppState {
            store: Arc::new(SeaOrmStore::new(db.clone())),
            db,
            cache: Cache::new(100),
            settings: Arc::new(Settings::default()),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        create_router(setup_test_app_state().await)
    }
}
